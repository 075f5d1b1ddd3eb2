//! Step-by-step test harness for stepwise applications.
//!
//! ```ignore
//! use serde_json::json;
//! use stepwise_framework::App;
//! use stepwise_harness::{test_app, Step};
//!
//! let app: App<()> = App::new().action("hello", |_, _, _| json!({ "message": "hello world" }));
//! test_app(app, None, [Step::new("hello", |record| {
//!     assert_eq!(record.states(), &[json!({}), json!({ "message": "hello world" })]);
//! })])
//! .await?;
//! ```

pub mod error;
pub mod harness;
pub mod options;
pub mod record;
pub mod step;
#[cfg(test)]
mod tests;
pub mod tracker;

pub use error::HarnessError;
pub use harness::Harness;
pub use options::HarnessOptions;
pub use record::{TrackingRecord, WaitOn};
pub use step::Step;
pub use tracker::Tracker;

use stepwise_framework::{App, State};

/// Run `steps` against `app` in order and resolve once every assertion passed.
///
/// `initial_state` replaces the app's own state when given. Fails with
/// `unknown action: <name>` on the first step naming an action the app lacks;
/// later steps never run.
pub async fn test_app<V: Clone + Send + 'static>(
    app: App<V>,
    initial_state: Option<State>,
    steps: impl IntoIterator<Item = Step<V>>,
) -> Result<(), HarnessError> {
    test_app_with(HarnessOptions::default(), app, initial_state, steps).await
}

/// [`test_app`] with explicit options.
pub async fn test_app_with<V: Clone + Send + 'static>(
    options: HarnessOptions,
    app: App<V>,
    initial_state: Option<State>,
    steps: impl IntoIterator<Item = Step<V>>,
) -> Result<(), HarnessError> {
    let mut harness = Harness::new(app, initial_state, options).await?;
    harness.run_all(steps).await
}
