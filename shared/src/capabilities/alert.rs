use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertOperation {
    Show { message: String },
}

impl Operation for AlertOperation {
    type Output = ();
}

/// Blocking user acknowledgement (a native alert dialog in the shell).
#[derive(Capability)]
pub struct Alert<Ev> {
    context: CapabilityContext<AlertOperation, Ev>,
}

impl<Ev> Alert<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<AlertOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(AlertOperation::Show { message }).await;
        });
    }
}
