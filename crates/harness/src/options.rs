use std::time::Duration;

use crate::record::WaitOn;

/// Options for a harness session.
#[derive(Debug, Clone, Default)]
pub struct HarnessOptions {
    /// Which event completes a step. `None` picks `Render` when the app has a
    /// view and `Update` otherwise.
    pub wait_on: Option<WaitOn>,
    /// Upper bound on how long one step may wait for its effects. `None`
    /// waits indefinitely.
    pub step_timeout: Option<Duration>,
}

impl HarnessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wait_on(mut self, event: WaitOn) -> Self {
        self.wait_on = Some(event);
        self
    }

    pub fn step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = Some(timeout);
        self
    }
}
