use serde::{Deserialize, Serialize};

use crate::capabilities::LocationResponse;
use crate::catalog::{option_value, CatalogError, CityName, Item, ItemId, RegionCode};
use crate::config::ServiceConfig;
use crate::contact::ContactField;
use crate::model::ScreenId;
use crate::region::CityRequest;
use crate::submission::{SubmissionError, SubmissionId};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Screen lifecycle
    ScreenOpened {
        config: ServiceConfig,
    },
    ScreenClosed,
    BackRequested,

    // Form input. Select values arrive as the shell's option strings.
    StateSelected {
        #[serde(with = "option_value", default)]
        code: Option<RegionCode>,
    },
    CitySelected {
        #[serde(with = "option_value", default)]
        name: Option<CityName>,
    },
    ItemToggled {
        id: ItemId,
    },
    MapClicked {
        latitude: f64,
        longitude: f64,
    },
    FieldChanged {
        field: ContactField,
        value: String,
    },
    SubmitRequested,

    // Capability responses, tagged with the screen that asked
    ItemsLoaded {
        screen: ScreenId,
        result: Result<Vec<Item>, CatalogError>,
    },
    StatesLoaded {
        screen: ScreenId,
        result: Result<Vec<RegionCode>, CatalogError>,
    },
    CitiesLoaded {
        screen: ScreenId,
        request: CityRequest,
        result: Result<Vec<CityName>, CatalogError>,
    },
    InitialPositionResolved {
        screen: ScreenId,
        response: LocationResponse,
    },
    SubmissionSettled {
        screen: ScreenId,
        id: SubmissionId,
        result: Result<(), SubmissionError>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ScreenOpened { .. } => "screen_opened",
            Self::ScreenClosed => "screen_closed",
            Self::BackRequested => "back_requested",
            Self::StateSelected { .. } => "state_selected",
            Self::CitySelected { .. } => "city_selected",
            Self::ItemToggled { .. } => "item_toggled",
            Self::MapClicked { .. } => "map_clicked",
            Self::FieldChanged { .. } => "field_changed",
            Self::SubmitRequested => "submit_requested",
            Self::ItemsLoaded { .. } => "items_loaded",
            Self::StatesLoaded { .. } => "states_loaded",
            Self::CitiesLoaded { .. } => "cities_loaded",
            Self::InitialPositionResolved { .. } => "initial_position_resolved",
            Self::SubmissionSettled { .. } => "submission_settled",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::BackRequested
                | Self::StateSelected { .. }
                | Self::CitySelected { .. }
                | Self::ItemToggled { .. }
                | Self::MapClicked { .. }
                | Self::FieldChanged { .. }
                | Self::SubmitRequested
        )
    }

    /// Screen a capability response belongs to.
    #[must_use]
    pub fn origin(&self) -> Option<&ScreenId> {
        match self {
            Self::ItemsLoaded { screen, .. }
            | Self::StatesLoaded { screen, .. }
            | Self::CitiesLoaded { screen, .. }
            | Self::InitialPositionResolved { screen, .. }
            | Self::SubmissionSettled { screen, .. } => Some(screen),
            _ => None,
        }
    }
}
