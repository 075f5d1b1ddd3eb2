use std::time::Duration;

use stepwise_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// An assertion reported failure; displays the assertion's own message.
    #[error("{0}")]
    Assertion(String),

    #[error("action `{0}` went idle before its completion fired")]
    Stalled(String),

    #[error("action `{action}` did not settle within {after:?}")]
    Timeout { action: String, after: Duration },

    #[error(transparent)]
    Framework(#[from] FrameworkError),
}
