use serde_json::{Map, Value};

use crate::error::FrameworkError;

/// Application state is a JSON object.
pub type State = Value;

/// State snapshot recorded after each commit.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub cycle: u64,
    pub state: State,
    pub json: String,
}

/// State machine that owns the current application state and its history.
pub struct StateMachine {
    current: State,
    history: Vec<StateSnapshot>,
    cycle: u64,
    max_history: usize,
}

impl StateMachine {
    pub fn new(initial_state: State) -> Self {
        let initial_state = match initial_state {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        let json = serde_json::to_string(&initial_state).unwrap_or_default();
        let snapshot = StateSnapshot {
            cycle: 0,
            state: initial_state.clone(),
            json,
        };
        StateMachine {
            current: initial_state,
            history: vec![snapshot],
            cycle: 0,
            max_history: 1000,
        }
    }

    /// Bound the number of retained snapshots (minimum 1).
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history.max(1);
        self.trim();
        self
    }

    pub fn current(&self) -> &State {
        &self.current
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn history(&self) -> &[StateSnapshot] {
        &self.history
    }

    /// Shallow-merge a partial state into the current one and record the result.
    ///
    /// `null` leaves every field untouched but still counts as a cycle.
    pub fn merge(&mut self, partial: State) -> Result<&State, FrameworkError> {
        let mut next = self.current.clone();
        match (partial, &mut next) {
            (Value::Null, _) => {}
            (Value::Object(fields), Value::Object(target)) => {
                for (key, value) in fields {
                    target.insert(key, value);
                }
            }
            (other, _) => {
                return Err(FrameworkError::State(format!(
                    "cannot merge non-object value into state: {other}"
                )));
            }
        }
        self.transition(next);
        Ok(&self.current)
    }

    /// Replace the state wholesale. Records the snapshot.
    pub fn transition(&mut self, new_state: State) {
        self.cycle += 1;
        let json = serde_json::to_string(&new_state).unwrap_or_default();
        self.history.push(StateSnapshot {
            cycle: self.cycle,
            state: new_state.clone(),
            json,
        });
        self.trim();
        self.current = new_state;
    }

    /// Serialize the current state to pretty JSON.
    pub fn snapshot(&self) -> String {
        serde_json::to_string_pretty(&self.current).unwrap_or_default()
    }

    fn trim(&mut self) {
        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(..excess);
        }
    }
}
