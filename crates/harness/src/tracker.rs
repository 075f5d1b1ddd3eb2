use stepwise_framework::{ActionDescriptor, Hook, State};
use tracing::{debug, trace};

use crate::record::{TrackingRecord, WaitOn};

/// Hook that feeds a [`TrackingRecord`] and signals step completion.
#[derive(Debug)]
pub struct Tracker<V> {
    record: TrackingRecord<V>,
    settled: bool,
}

impl<V> Default for Tracker<V> {
    fn default() -> Self {
        Tracker {
            record: TrackingRecord::new(),
            settled: false,
        }
    }
}

impl<V> Tracker<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &TrackingRecord<V> {
        &self.record
    }

    /// Whether the armed completion has fired since the last `arm`.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn arm(&mut self, event: WaitOn) {
        self.settled = false;
        self.record.arm(event);
    }

    pub fn track_state(&mut self, state: State) {
        self.record.track_state(state);
    }

    pub fn reset(&mut self) {
        self.settled = false;
        self.record.reset();
        trace!(states = self.record.states().len(), "record reset");
    }

    fn notify(&mut self, event: WaitOn) {
        if self.record.fire(event) {
            debug!(?event, states = self.record.states().len(), "step settled");
            self.settled = true;
        }
    }
}

impl<V: Clone + Send> Hook<V> for Tracker<V> {
    fn on_action(&mut self, action: &ActionDescriptor) {
        self.record.start_action(action.clone());
        trace!(action = %action.name, pending = self.record.pending_actions(), "action started");
    }

    fn on_commit(&mut self, action: &ActionDescriptor, state: &State) {
        self.record.track_state(state.clone());
        self.record.end_action();
        trace!(action = %action.name, pending = self.record.pending_actions(), "action ended");
        self.notify(WaitOn::Update);
    }

    fn on_render(&mut self, view: &V) {
        self.record.track_view(view.clone());
        self.notify(WaitOn::Render);
    }
}
