use std::fmt;

use serde_json::Value;
use stepwise_framework::State;

use crate::record::TrackingRecord;

/// Verification run against the record once a step has settled.
pub type Assertion<V> = Box<dyn FnOnce(&TrackingRecord<V>) -> Result<(), String> + Send>;

/// One harness invocation: action name, optional payload, assertion.
pub struct Step<V> {
    name: String,
    data: Option<Value>,
    assertion: Assertion<V>,
}

impl<V: 'static> Step<V> {
    /// A step whose assertion signals failure by panicking (`assert_eq!` and friends).
    pub fn new<F>(name: impl Into<String>, assertion: F) -> Self
    where
        F: FnOnce(&TrackingRecord<V>) + Send + 'static,
    {
        Step {
            name: name.into(),
            data: None,
            assertion: Box::new(move |record: &TrackingRecord<V>| -> Result<(), String> {
                assertion(record);
                Ok(())
            }),
        }
    }

    /// A step whose assertion reports failure as an error value.
    pub fn try_new<F, E>(name: impl Into<String>, assertion: F) -> Self
    where
        F: FnOnce(&TrackingRecord<V>) -> Result<(), E> + Send + 'static,
        E: fmt::Display,
    {
        Step {
            name: name.into(),
            data: None,
            assertion: Box::new(move |record: &TrackingRecord<V>| -> Result<(), String> {
                assertion(record).map_err(|e| e.to_string())
            }),
        }
    }

    /// A step that only checks the recorded states.
    pub fn expect_states(name: impl Into<String>, expected: Vec<State>) -> Self {
        Self::try_new(name, move |record: &TrackingRecord<V>| {
            if record.states() == expected.as_slice() {
                Ok(())
            } else {
                Err(format!(
                    "states mismatch:\n  expected: {}\n  actual:   {}",
                    Value::Array(expected),
                    Value::Array(record.states().to_vec())
                ))
            }
        })
    }

    /// A step without an assertion; useful to move the app into position.
    pub fn dispatch(name: impl Into<String>) -> Self {
        Self::new(name, |_: &TrackingRecord<V>| {})
    }

    /// Pass `data` as the action's argument.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub(crate) fn into_parts(self) -> (String, Option<Value>, Assertion<V>) {
        (self.name, self.data, self.assertion)
    }
}

impl<V> fmt::Debug for Step<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
