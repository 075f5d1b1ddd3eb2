use serde::{Deserialize, Serialize};
use stepwise_framework::{ActionDescriptor, State};

/// Which observable event completes a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitOn {
    /// A state commit with no actions left pending.
    Update,
    /// A view render with no actions left pending.
    Render,
}

/// Everything observed during one step: states, actions and views.
///
/// `states` always opens with the state the step started from. `reset`
/// truncates it to the latest snapshot so consecutive steps are bracketed by
/// their before and after states.
#[derive(Debug, Clone)]
pub struct TrackingRecord<V> {
    states: Vec<State>,
    actions: Vec<ActionDescriptor>,
    views: Vec<V>,
    pending_actions: usize,
    on: Option<WaitOn>,
}

impl<V> Default for TrackingRecord<V> {
    fn default() -> Self {
        TrackingRecord {
            states: Vec::new(),
            actions: Vec::new(),
            views: Vec::new(),
            pending_actions: 0,
            on: None,
        }
    }
}

impl<V> TrackingRecord<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    pub fn views(&self) -> &[V] {
        &self.views
    }

    /// Actions dispatched but not yet committed.
    pub fn pending_actions(&self) -> usize {
        self.pending_actions
    }

    /// The completion event currently armed, if any.
    pub fn on(&self) -> Option<WaitOn> {
        self.on
    }

    pub fn first_state(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last_state(&self) -> Option<&State> {
        self.states.last()
    }

    /// Names of the recorded actions, in dispatch order.
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name.as_str()).collect()
    }

    pub(crate) fn track_state(&mut self, state: State) {
        self.states.push(state);
    }

    pub(crate) fn start_action(&mut self, action: ActionDescriptor) {
        self.pending_actions += 1;
        self.actions.push(action);
    }

    pub(crate) fn end_action(&mut self) {
        self.pending_actions = self.pending_actions.saturating_sub(1);
    }

    pub(crate) fn track_view(&mut self, view: V) {
        self.views.push(view);
    }

    pub(crate) fn arm(&mut self, event: WaitOn) {
        self.on = Some(event);
    }

    /// Fire the armed completion if it waits on `event` and nothing is pending.
    /// One-shot: a fired completion is disarmed.
    pub(crate) fn fire(&mut self, event: WaitOn) -> bool {
        if self.pending_actions == 0 && self.on == Some(event) {
            self.on = None;
            true
        } else {
            false
        }
    }

    /// Prepare for the next step.
    pub fn reset(&mut self) {
        let start = self.states.len().saturating_sub(1);
        self.states.drain(..start);
        self.actions.clear();
        self.views.clear();
        self.pending_actions = 0;
        self.on = None;
    }
}
