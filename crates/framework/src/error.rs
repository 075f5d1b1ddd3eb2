use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameworkError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("state error: {0}")]
    State(String),

    #[error("effect for action `{0}` was dropped before it resolved")]
    EffectAbandoned(String),
}
