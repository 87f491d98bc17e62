//! Screen-scoped model.
//!
//! `CreatePointScreen` is built when the screen opens and dropped when it
//! closes. Capability responses name the screen that asked; once the screen is
//! gone or replaced, they no longer match anything in the model.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::catalog::Item;
use crate::config::{ConfigError, Endpoints, ServiceConfig};
use crate::contact::ContactFields;
use crate::position::PositionPicker;
use crate::region::RegionCascade;
use crate::selection::ItemSelection;
use crate::submission::SubmissionCoordinator;

/// Identity of one opened screen. Responses addressed to another screen are dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(pub String);

impl ScreenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All state of the create-point screen. Built on entry, dropped on exit.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreatePointScreen {
    pub id: ScreenId,
    pub endpoints: Result<Endpoints, ConfigError>,

    // Loaded once, read-only afterwards
    pub items: Vec<Item>,

    pub regions: RegionCascade,
    pub selection: ItemSelection,
    pub position: PositionPicker,
    pub contact: ContactFields,
    pub submission: SubmissionCoordinator,
}

impl CreatePointScreen {
    pub fn open(config: &ServiceConfig) -> Self {
        Self {
            id: ScreenId::generate(),
            endpoints: config.endpoints(),
            items: Vec::new(),
            regions: RegionCascade::new(),
            selection: ItemSelection::new(),
            position: PositionPicker::new(),
            contact: ContactFields::default(),
            submission: SubmissionCoordinator::new(),
        }
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        self.endpoints.as_ref().err()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Model {
    pub screen: Option<CreatePointScreen>,
}

impl Model {
    /// The open screen, if `id` still names it.
    pub fn screen_mut(&mut self, id: &ScreenId) -> Option<&mut CreatePointScreen> {
        self.screen.as_mut().filter(|screen| &screen.id == id)
    }
}
