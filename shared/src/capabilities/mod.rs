//! Capabilities the core asks the shell to perform.
//!
//! We use Crux's built-in Render and Http capabilities directly; location,
//! navigation and alerts are small custom capabilities.

mod alert;
pub mod http;
mod location;
mod navigation;

pub use self::alert::{Alert, AlertOperation};
pub use self::location::{Location, LocationOperation, LocationResponse};
pub use self::navigation::{Navigation, NavigationOperation, Route};

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub http: Http<Event>,
    pub location: Location<Event>,
    pub navigation: Navigation<Event>,
    pub alert: Alert<Event>,
}
