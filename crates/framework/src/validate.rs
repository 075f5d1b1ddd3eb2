use serde_json::Value;

use crate::app::App;
use crate::error::FrameworkError;
use crate::state::State;

/// Validates that an application description can be started.
///
/// Rules:
/// - the state must be a JSON object (or null, which starts as `{}`)
/// - action names must be non-empty and contain no whitespace
pub struct AppValidator;

#[derive(Debug)]
pub struct ValidationResult {
    pub action_count: usize,
    pub has_view: bool,
    pub errors: Vec<String>,
}

impl AppValidator {
    /// Validate an application description.
    pub fn validate<V>(app: &App<V>) -> Result<ValidationResult, FrameworkError> {
        let state = app.initial_state();
        Self::validate_parts(&state, app.action_names(), app.has_view())
    }

    /// Whether this app can be started.
    pub fn is_valid_app<V>(app: &App<V>) -> bool {
        Self::validate(app).is_ok()
    }

    pub(crate) fn validate_parts<'a>(
        state: &State,
        action_names: impl IntoIterator<Item = &'a str>,
        has_view: bool,
    ) -> Result<ValidationResult, FrameworkError> {
        let mut result = ValidationResult {
            action_count: 0,
            has_view,
            errors: Vec::new(),
        };

        match state {
            Value::Object(_) | Value::Null => {}
            other => result.errors.push(format!(
                "state must be an object, got {}",
                type_name(other)
            )),
        }

        for name in action_names {
            result.action_count += 1;
            if name.is_empty() {
                result.errors.push("action name must not be empty".into());
            } else if name.chars().any(char::is_whitespace) {
                result
                    .errors
                    .push(format!("action name `{name}` must not contain whitespace"));
            }
        }

        if !result.errors.is_empty() {
            return Err(FrameworkError::Validation(result.errors.join("; ")));
        }

        Ok(result)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
