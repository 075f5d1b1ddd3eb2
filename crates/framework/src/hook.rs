use crate::action::ActionDescriptor;
use crate::state::State;

/// Interception point around every dispatch, commit and render.
///
/// `on_action` fires before the handler runs. `on_commit` fires once the
/// action's final state has been merged, which for a deferred action is after
/// its innermost effect resolved. `on_render` fires after each view call.
pub trait Hook<V>: Send {
    fn on_action(&mut self, _action: &ActionDescriptor) {}

    fn on_commit(&mut self, _action: &ActionDescriptor, _state: &State) {}

    fn on_render(&mut self, _view: &V) {}
}

/// A hook that observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHook;

impl<V> Hook<V> for NoHook {}
