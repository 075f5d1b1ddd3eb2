use serde_json::Value;
use stepwise_framework::{App, AppRuntime, State};
use tracing::{debug, warn};

use crate::error::HarnessError;
use crate::options::HarnessOptions;
use crate::record::{TrackingRecord, WaitOn};
use crate::step::Step;
use crate::tracker::Tracker;

/// Drives named actions against a running app, one step at a time.
///
/// Each step dispatches its action, waits until every action it set in motion
/// has committed (and, for apps with a view, rendered), hands the record to
/// the step's assertion, then resets the record for the next step.
pub struct Harness<V> {
    runtime: AppRuntime<V, Tracker<V>>,
    wait_on: WaitOn,
    options: HarnessOptions,
}

impl<V: Clone + Send + 'static> Harness<V> {
    /// Start `app` under the harness.
    ///
    /// `initial_state` replaces the app's own state when given. Actions the
    /// app's `init` dispatches are settled before this returns, so the first
    /// step starts from the post-init state.
    pub async fn new(
        app: App<V>,
        initial_state: Option<State>,
        options: HarnessOptions,
    ) -> Result<Self, HarnessError> {
        let wait_on = options.wait_on.unwrap_or(if app.has_view() {
            WaitOn::Render
        } else {
            WaitOn::Update
        });
        let app = match initial_state {
            Some(state) => app.state(state),
            None => app,
        };

        let mut runtime = AppRuntime::new(app, Tracker::new())?;
        let initial = runtime.state().clone();
        runtime.hook_mut().track_state(initial);
        runtime.settle().await?;
        runtime.hook_mut().reset();

        debug!(?wait_on, state = %runtime.state(), "harness ready");
        Ok(Harness {
            runtime,
            wait_on,
            options,
        })
    }

    pub fn record(&self) -> &TrackingRecord<V> {
        self.runtime.hook().record()
    }

    pub fn state(&self) -> &State {
        self.runtime.state()
    }

    pub fn wait_on(&self) -> WaitOn {
        self.wait_on
    }

    /// Get the runtime for direct inspection.
    pub fn runtime(&self) -> &AppRuntime<V, Tracker<V>> {
        &self.runtime
    }

    /// Run one step to completion.
    ///
    /// The record is reset whether the step passed or failed, so the harness
    /// stays usable after an error. Effects a failed step left in flight keep
    /// running; whatever they commit later is recorded by the step driving
    /// them at that time.
    pub async fn run(&mut self, step: Step<V>) -> Result<(), HarnessError> {
        let (name, data, assertion) = step.into_parts();
        if !self.runtime.has_action(&name) {
            return Err(HarnessError::UnknownAction(name));
        }

        debug!(action = %name, wait_on = ?self.wait_on, "step started");
        self.runtime.hook_mut().arm(self.wait_on);
        let verdict = match self.dispatch_and_drive(&name, data).await {
            Ok(()) => assertion(self.runtime.hook().record()).map_err(HarnessError::Assertion),
            Err(err) => {
                warn!(action = %name, error = %err, "step failed before settling");
                Err(err)
            }
        };
        self.runtime.hook_mut().reset();
        verdict
    }

    /// Run steps in order, stopping at the first failure.
    pub async fn run_all(
        &mut self,
        steps: impl IntoIterator<Item = Step<V>>,
    ) -> Result<(), HarnessError> {
        for step in steps {
            self.run(step).await?;
        }
        Ok(())
    }

    async fn dispatch_and_drive(
        &mut self,
        name: &str,
        data: Option<Value>,
    ) -> Result<(), HarnessError> {
        self.runtime.dispatch(name, data)?;
        match self.options.step_timeout {
            Some(after) => tokio::time::timeout(after, self.drive(name))
                .await
                .map_err(|_| HarnessError::Timeout {
                    action: name.to_string(),
                    after,
                })?,
            None => self.drive(name).await,
        }
    }

    async fn drive(&mut self, name: &str) -> Result<(), HarnessError> {
        while !self.runtime.hook().is_settled() {
            if !self.runtime.step().await? {
                return Err(HarnessError::Stalled(name.to_string()));
            }
        }
        Ok(())
    }
}
