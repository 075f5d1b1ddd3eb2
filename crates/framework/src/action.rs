use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::effect::Outcome;
use crate::state::State;

/// Identifies one dispatched action and the argument it was called with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ActionDescriptor {
    pub fn new(name: impl Into<String>, data: Option<Value>) -> Self {
        ActionDescriptor {
            name: name.into(),
            data,
        }
    }

    /// Descriptor for an action dispatched without an argument.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

/// An action handler: `(state, actions, data) -> outcome`.
pub type Handler = Arc<dyn Fn(&State, &Dispatcher, Option<&Value>) -> Outcome + Send + Sync>;

/// Cloneable handle for dispatching further actions from handlers, effects,
/// views and `init`.
///
/// Dispatches are queued. A dispatch made inside a handler runs as soon as
/// that handler returns; any other dispatch runs on the runtime's next step.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<ActionDescriptor>,
}

impl Dispatcher {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<ActionDescriptor>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Dispatcher { tx }, rx)
    }

    pub fn dispatch(&self, name: impl Into<String>, data: Option<Value>) {
        let call = ActionDescriptor::new(name, data);
        if let Err(err) = self.tx.send(call) {
            tracing::warn!(action = %err.0.name, "dispatch after runtime shutdown dropped");
        }
    }
}
