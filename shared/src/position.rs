//! Map position: where the map opens and where the point goes.

use serde::{Deserialize, Serialize};

/// Map coordinate. Any pair is accepted; nothing checks it lies on land or in range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Initial map framing plus the coordinate that will be submitted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PositionPicker {
    initial: Coordinate,
    initial_resolved: bool,
    selected: Coordinate,
}

impl PositionPicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial(&self) -> Coordinate {
        self.initial
    }

    pub fn selected(&self) -> Coordinate {
        self.selected
    }

    /// Records the device's best guess. Only the first value is kept.
    pub fn set_initial(&mut self, coordinate: Coordinate) -> bool {
        if self.initial_resolved {
            return false;
        }
        self.initial = coordinate;
        self.initial_resolved = true;
        true
    }

    pub fn pick(&mut self, coordinate: Coordinate) {
        self.selected = coordinate;
    }
}
