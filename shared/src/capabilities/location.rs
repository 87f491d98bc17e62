//! One-shot device location query.
//!
//! The shell answers with a position or `Unavailable`; a denied permission, a
//! timeout or a missing sensor all look the same to the core.

use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use serde::{Deserialize, Serialize};

use crate::position::Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationOperation {
    CurrentPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LocationResponse {
    Position(Coordinate),
    Unavailable,
}

impl Operation for LocationOperation {
    type Output = LocationResponse;
}

#[derive(Capability)]
pub struct Location<Ev> {
    context: CapabilityContext<LocationOperation, Ev>,
}

impl<Ev> Location<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<LocationOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn current_position<F>(&self, make_event: F)
    where
        F: FnOnce(LocationResponse) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let response = ctx.request_from_shell(LocationOperation::CurrentPosition).await;
            ctx.update_app(make_event(response));
        });
    }
}
