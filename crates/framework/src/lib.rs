pub mod action;
pub mod app;
pub mod effect;
pub mod error;
pub mod hook;
pub mod runtime;
pub mod state;
pub mod ui;
pub mod validate;

pub use action::{ActionDescriptor, Dispatcher};
pub use app::{App, Mixin};
pub use effect::{Effect, Outcome, Update};
pub use error::FrameworkError;
pub use hook::{Hook, NoHook};
pub use runtime::AppRuntime;
pub use state::State;
pub use validate::AppValidator;
