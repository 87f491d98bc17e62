// lib.rs - Collection point registration core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod event;
pub mod model;
pub mod position;
pub mod region;
pub mod selection;
pub mod submission;

use serde::{Deserialize, Serialize};

pub use app::App;
pub use capabilities::{Capabilities, Effect, Route};
pub use catalog::{CatalogError, CityName, Item, ItemId, RegionCode};
pub use config::{ConfigError, ServiceConfig};
pub use contact::{ContactField, ContactFields};
pub use crux_core::App as CruxApp;
pub use event::Event;
pub use model::{CreatePointScreen, Model, ScreenId};
pub use position::Coordinate;
pub use submission::{SubmissionError, SubmissionPayload};

pub const DEFAULT_MAP_ZOOM: f64 = 15.0;
pub const POINT_REGISTERED_MESSAGE: &str = "Collection point registered!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Rejected,
    Serialization,
    Configuration,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Rejected => "REJECTED",
            Self::Serialization => "SERIALIZATION_ERROR",
            Self::Configuration => "CONFIGURATION_ERROR",
        }
    }

    #[must_use]
    pub const fn user_facing_message(self) -> &'static str {
        match self {
            Self::Network => {
                "Unable to connect. Please check your internet connection and try again."
            }
            Self::Rejected => "The collection point could not be registered. Please try again.",
            Self::Serialization => {
                "A data error occurred. Please contact support if this persists."
            }
            Self::Configuration => "The app is misconfigured. Please contact support.",
        }
    }
}

impl From<&SubmissionError> for ErrorKind {
    fn from(e: &SubmissionError) -> Self {
        match e {
            SubmissionError::Transport { .. } => Self::Network,
            SubmissionError::Rejected { .. } => Self::Rejected,
            SubmissionError::Encoding { .. } => Self::Serialization,
        }
    }
}

impl From<&ConfigError> for ErrorKind {
    fn from(_: &ConfigError) -> Self {
        Self::Configuration
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserFacingError {
    pub code: String,
    pub message: String,
}

impl UserFacingError {
    fn of(kind: ErrorKind) -> Self {
        Self {
            code: kind.code().to_string(),
            message: kind.user_facing_message().to_string(),
        }
    }
}

impl From<&SubmissionError> for UserFacingError {
    fn from(e: &SubmissionError) -> Self {
        Self::of(ErrorKind::from(e))
    }
}

impl From<&ConfigError> for UserFacingError {
    fn from(e: &ConfigError) -> Self {
        Self::of(ErrorKind::from(e))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ItemTile {
    pub id: ItemId,
    pub title: String,
    pub image_url: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
    pub marker: Coordinate,
}

/// Everything the shell needs to draw the form.
///
/// Select boxes use the placeholder value `"0"` for "nothing selected".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatePointView {
    pub name: String,
    pub email: String,
    pub whatsapp: String,

    pub map: MapView,

    pub states: Vec<String>,
    pub selected_state: String,
    pub cities: Vec<String>,
    pub selected_city: String,
    pub cities_loading: bool,

    pub items: Vec<ItemTile>,

    pub can_submit: bool,
    pub is_submitting: bool,
    pub submitted: bool,
    pub error: Option<UserFacingError>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub screen: Option<CreatePointView>,
}

pub mod app {
    use tracing::{debug, info, warn};

    use super::{
        CreatePointView, ItemTile, MapView, UserFacingError, ViewModel, DEFAULT_MAP_ZOOM,
        POINT_REGISTERED_MESSAGE,
    };
    use crate::capabilities::{http, Capabilities, LocationResponse, Route};
    use crate::catalog::UNSET_OPTION_VALUE;
    use crate::config::ServiceConfig;
    use crate::event::Event;
    use crate::model::{CreatePointScreen, Model};
    use crate::position::Coordinate;
    use crate::region::CityLoad;
    use crate::submission::{Settlement, SubmissionPayload, SubmissionPhase};

    #[derive(Default)]
    pub struct App;

    impl App {
        fn open_screen(config: &ServiceConfig, model: &mut Model, caps: &Capabilities) {
            let screen = CreatePointScreen::open(config);
            info!(screen = %screen.id, "create point screen opened");

            match &screen.endpoints {
                Ok(endpoints) => {
                    http::load_items(&caps.http, endpoints, screen.id.clone());
                    http::load_states(&caps.http, endpoints, screen.id.clone());
                }
                Err(e) => warn!(error = %e, "invalid service configuration, catalogs not loaded"),
            }

            let origin = screen.id.clone();
            caps.location
                .current_position(move |response| Event::InitialPositionResolved {
                    screen: origin,
                    response,
                });

            // Replacing an open screen orphans its pending responses.
            model.screen = Some(screen);
        }

        fn submit(screen: &mut CreatePointScreen, caps: &Capabilities) {
            let endpoints = match &screen.endpoints {
                Ok(endpoints) => endpoints,
                Err(e) => {
                    warn!(error = %e, "submit ignored, no valid endpoints");
                    return;
                }
            };

            let payload = SubmissionPayload::snapshot(
                &screen.contact,
                &screen.regions,
                &screen.position,
                &screen.selection,
            );

            let id = match screen.submission.begin() {
                Ok(id) => id,
                Err(refused) => {
                    info!(reason = %refused, "submit ignored");
                    return;
                }
            };

            info!(submission = %id, items = payload.items.len(), "submitting collection point");
            if let Err(e) =
                http::create_point(&caps.http, endpoints, screen.id.clone(), id.clone(), &payload)
            {
                warn!(error = %e, "create request not sent");
                screen.submission.settle(&id, Err(e));
            }
        }

        fn update_screen(event: Event, screen: &mut CreatePointScreen, caps: &Capabilities) {
            match event {
                Event::StateSelected { code } => {
                    if let Some(request) = screen.regions.select_state(code) {
                        if let Ok(endpoints) = &screen.endpoints {
                            http::load_cities(&caps.http, endpoints, screen.id.clone(), request);
                        }
                    }
                }

                Event::CitySelected { name } => {
                    screen.regions.select_city(name);
                }

                Event::ItemToggled { id } => {
                    let selected = screen.selection.toggle(id);
                    debug!(
                        item = %id,
                        selected,
                        total = screen.selection.len(),
                        "item toggled"
                    );
                }

                Event::MapClicked { latitude, longitude } => {
                    screen.position.pick(Coordinate::new(latitude, longitude));
                }

                Event::FieldChanged { field, value } => {
                    screen.contact.set(field, value);
                }

                Event::SubmitRequested => Self::submit(screen, caps),

                Event::ItemsLoaded { result, .. } => match result {
                    Ok(items) => {
                        info!(count = items.len(), "item catalog loaded");
                        screen.items = items;
                    }
                    Err(e) => warn!(error = %e, "item catalog unavailable"),
                },

                Event::StatesLoaded { result, .. } => match result {
                    Ok(states) => {
                        info!(count = states.len(), "state list loaded");
                        screen.regions.set_states(states);
                    }
                    Err(e) => warn!(error = %e, "state list unavailable"),
                },

                Event::CitiesLoaded {
                    request, result, ..
                } => match screen.regions.apply_cities(&request, result) {
                    CityLoad::Applied { count } => {
                        debug!(state = %request.state, count, "city list loaded");
                    }
                    CityLoad::Superseded => {}
                    CityLoad::Failed(e) => {
                        warn!(state = %request.state, error = %e, "city list unavailable");
                    }
                },

                Event::InitialPositionResolved { response, .. } => match response {
                    LocationResponse::Position(coordinate) => {
                        if !screen.position.set_initial(coordinate) {
                            debug!("initial position already set");
                        }
                    }
                    LocationResponse::Unavailable => {
                        debug!("device location unavailable, keeping default framing");
                    }
                },

                Event::SubmissionSettled { id, result, .. } => {
                    match screen.submission.settle(&id, result) {
                        Settlement::Succeeded => {
                            info!(submission = %id, "collection point registered");
                            caps.alert.show(POINT_REGISTERED_MESSAGE);
                            caps.navigation.navigate(Route::Home);
                        }
                        Settlement::Failed(e) => {
                            warn!(submission = %id, error = %e, "collection point not registered");
                        }
                        Settlement::Unexpected => {
                            debug!(submission = %id, "ignoring response for another submission");
                        }
                    }
                }

                Event::ScreenOpened { .. } | Event::ScreenClosed | Event::BackRequested => {}
            }
        }

        fn screen_view(screen: &CreatePointScreen) -> CreatePointView {
            let regions = &screen.regions;
            let phase = screen.submission.phase();

            let error = screen
                .config_error()
                .map(UserFacingError::from)
                .or_else(|| screen.submission.last_error().map(UserFacingError::from));

            CreatePointView {
                name: screen.contact.name.clone(),
                email: screen.contact.email.clone(),
                whatsapp: screen.contact.whatsapp.clone(),
                map: MapView {
                    center: screen.position.initial(),
                    zoom: DEFAULT_MAP_ZOOM,
                    marker: screen.position.selected(),
                },
                states: regions
                    .available_states()
                    .iter()
                    .map(|s| s.as_str().to_string())
                    .collect(),
                selected_state: regions
                    .selected_state()
                    .map_or_else(|| UNSET_OPTION_VALUE.to_string(), ToString::to_string),
                cities: regions
                    .available_cities()
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
                selected_city: regions
                    .selected_city()
                    .map_or_else(|| UNSET_OPTION_VALUE.to_string(), ToString::to_string),
                cities_loading: regions.is_loading_cities(),
                items: screen
                    .items
                    .iter()
                    .map(|item| ItemTile {
                        id: item.id,
                        title: item.title.clone(),
                        image_url: item.image_url.clone(),
                        selected: screen.selection.contains(item.id),
                    })
                    .collect(),
                can_submit: screen.endpoints.is_ok()
                    && matches!(phase, SubmissionPhase::Idle | SubmissionPhase::Failed(_)),
                is_submitting: screen.submission.is_in_flight(),
                submitted: matches!(phase, SubmissionPhase::Submitted),
                error,
            }
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            let event_name = event.name();
            if event.is_user_initiated() {
                debug!(event = event_name, "user action");
            }

            match event {
                Event::ScreenOpened { config } => Self::open_screen(&config, model, caps),

                Event::ScreenClosed => {
                    if let Some(screen) = model.screen.take() {
                        info!(screen = %screen.id, "create point screen closed");
                    }
                }

                Event::BackRequested => {
                    caps.navigation.navigate(Route::Home);
                    return;
                }

                event => {
                    let screen = match event.origin() {
                        Some(origin) => model.screen_mut(origin),
                        None => model.screen.as_mut(),
                    };
                    let Some(screen) = screen else {
                        debug!(event = event_name, "no matching screen, dropping event");
                        return;
                    };
                    Self::update_screen(event, screen, caps);
                }
            }

            caps.render.render();
        }

        fn view(&self, model: &Model) -> ViewModel {
            ViewModel {
                screen: model.screen.as_ref().map(Self::screen_view),
            }
        }
    }

}
