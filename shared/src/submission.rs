//! Snapshot-and-submit.
//!
//! The payload is assembled from the owners' current values at the moment of
//! the submit action and never touched afterwards. The coordinator tracks the
//! single outstanding create request.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{ItemId, UNSET_OPTION_VALUE};
use crate::contact::ContactFields;
use crate::position::PositionPicker;
use crate::region::RegionCascade;
use crate::selection::ItemSelection;

/// Body of `POST points`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub uf: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub items: Vec<ItemId>,
}

impl SubmissionPayload {
    /// Reads every owner once. Unset state or city are sent as the placeholder value.
    #[must_use]
    pub fn snapshot(
        contact: &ContactFields,
        regions: &RegionCascade,
        position: &PositionPicker,
        selection: &ItemSelection,
    ) -> Self {
        let coordinate = position.selected();
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            whatsapp: contact.whatsapp.clone(),
            uf: regions
                .selected_state()
                .map_or_else(|| UNSET_OPTION_VALUE.to_string(), |s| s.as_str().to_string()),
            city: regions
                .selected_city()
                .map_or_else(|| UNSET_OPTION_VALUE.to_string(), |c| c.as_str().to_string()),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            items: selection.snapshot(),
        }
    }
}

/// Identifies one create request; doubles as its idempotency key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("create request failed: {message}")]
    Transport { message: String },

    #[error("create request rejected with HTTP {status}")]
    Rejected { status: u16 },

    #[error("could not encode submission: {message}")]
    Encoding { message: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    InFlight {
        id: SubmissionId,
    },
    Failed(SubmissionError),
    Submitted,
}

/// Why a submit action was not started.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SubmitRefused {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the point was already submitted")]
    AlreadySubmitted,
}

/// Result of settling a create request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Acknowledge once and navigate away once.
    Succeeded,
    Failed(SubmissionError),
    /// The response does not belong to the outstanding request.
    Unexpected,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmissionCoordinator {
    phase: SubmissionPhase,
}

impl SubmissionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, SubmissionPhase::InFlight { .. })
    }

    pub fn last_error(&self) -> Option<&SubmissionError> {
        match &self.phase {
            SubmissionPhase::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Arms a new create request. Clears any previous failure.
    pub fn begin(&mut self) -> Result<SubmissionId, SubmitRefused> {
        match self.phase {
            SubmissionPhase::InFlight { .. } => Err(SubmitRefused::InFlight),
            SubmissionPhase::Submitted => Err(SubmitRefused::AlreadySubmitted),
            SubmissionPhase::Idle | SubmissionPhase::Failed(_) => {
                let id = SubmissionId::generate();
                self.phase = SubmissionPhase::InFlight { id: id.clone() };
                Ok(id)
            }
        }
    }

    pub fn settle(&mut self, id: &SubmissionId, result: Result<(), SubmissionError>) -> Settlement {
        match &self.phase {
            SubmissionPhase::InFlight { id: current } if current == id => {}
            _ => return Settlement::Unexpected,
        }

        match result {
            Ok(()) => {
                self.phase = SubmissionPhase::Submitted;
                Settlement::Succeeded
            }
            Err(e) => {
                self.phase = SubmissionPhase::Failed(e.clone());
                Settlement::Failed(e)
            }
        }
    }
}
