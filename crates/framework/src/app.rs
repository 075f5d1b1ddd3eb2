use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::action::{Dispatcher, Handler};
use crate::effect::Outcome;
use crate::hook::Hook;
use crate::state::State;

/// A view function: `(state, actions) -> view value`.
pub type View<V> = Arc<dyn Fn(&State, &Dispatcher) -> V + Send + Sync>;

/// Runs once after the runtime starts; typically dispatches setup actions.
pub type Init = Box<dyn FnOnce(&State, &Dispatcher) + Send>;

enum StateSource {
    Value(State),
    Factory(Box<dyn Fn() -> State + Send + Sync>),
}

impl StateSource {
    fn resolve(&self) -> State {
        match self {
            StateSource::Value(state) => state.clone(),
            StateSource::Factory(factory) => factory(),
        }
    }
}

fn wrap_handler<F, O>(handler: F) -> Handler
where
    F: Fn(&State, &Dispatcher, Option<&Value>) -> O + Send + Sync + 'static,
    O: Into<Outcome>,
{
    Arc::new(
        move |state: &State, actions: &Dispatcher, data: Option<&Value>| -> Outcome {
            handler(state, actions, data).into()
        },
    )
}

/// A reusable bundle of state fields, actions and hooks.
///
/// Applied with [`App::mixin`]. Mixin state fields act as defaults: the
/// app's own state wins on conflicting keys. Mixin actions replace app
/// actions of the same name. Hooks are appended after the app's.
pub struct Mixin<V> {
    state: Map<String, Value>,
    actions: BTreeMap<String, Handler>,
    hooks: Vec<Box<dyn Hook<V>>>,
}

impl<V> Default for Mixin<V> {
    fn default() -> Self {
        Mixin {
            state: Map::new(),
            actions: BTreeMap::new(),
            hooks: Vec::new(),
        }
    }
}

impl<V> Mixin<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add default state fields. Only object fields are taken; anything else is ignored.
    pub fn state(mut self, state: State) -> Self {
        if let Value::Object(fields) = state {
            self.state.extend(fields);
        }
        self
    }

    pub fn action<F, O>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&State, &Dispatcher, Option<&Value>) -> O + Send + Sync + 'static,
        O: Into<Outcome>,
    {
        self.actions.insert(name.into(), wrap_handler(handler));
        self
    }

    pub fn hook(mut self, hook: impl Hook<V> + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }
}

impl<V> fmt::Debug for Mixin<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mixin")
            .field("state", &self.state.keys().collect::<Vec<_>>())
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// Application description: state, action handlers, optional view, hooks and init.
pub struct App<V> {
    state: StateSource,
    defaults: Map<String, Value>,
    actions: BTreeMap<String, Handler>,
    view: Option<View<V>>,
    hooks: Vec<Box<dyn Hook<V>>>,
    init: Option<Init>,
}

/// Everything the runtime takes ownership of when it starts.
pub(crate) struct AppParts<V> {
    pub state: State,
    pub actions: BTreeMap<String, Handler>,
    pub view: Option<View<V>>,
    pub hooks: Vec<Box<dyn Hook<V>>>,
    pub init: Option<Init>,
}

impl<V> Default for App<V> {
    fn default() -> Self {
        App {
            state: StateSource::Value(Value::Null),
            defaults: Map::new(),
            actions: BTreeMap::new(),
            view: None,
            hooks: Vec::new(),
            init: None,
        }
    }
}

impl<V> App<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(mut self, state: State) -> Self {
        self.state = StateSource::Value(state);
        self
    }

    /// Produce the initial state lazily, once per runtime.
    pub fn state_with<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> State + Send + Sync + 'static,
    {
        self.state = StateSource::Factory(Box::new(factory));
        self
    }

    pub fn action<F, O>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&State, &Dispatcher, Option<&Value>) -> O + Send + Sync + 'static,
        O: Into<Outcome>,
    {
        self.actions.insert(name.into(), wrap_handler(handler));
        self
    }

    pub fn view<F>(mut self, view: F) -> Self
    where
        F: Fn(&State, &Dispatcher) -> V + Send + Sync + 'static,
    {
        self.view = Some(Arc::new(view));
        self
    }

    /// Register a hook. Hooks fire in registration order.
    pub fn hook(mut self, hook: impl Hook<V> + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn init<F>(mut self, init: F) -> Self
    where
        F: FnOnce(&State, &Dispatcher) + Send + 'static,
    {
        self.init = Some(Box::new(init));
        self
    }

    /// Apply a reusable bundle of state, actions and hooks.
    pub fn mixin(mut self, mixin: Mixin<V>) -> Self {
        let Mixin {
            state,
            actions,
            hooks,
        } = mixin;
        self.defaults.extend(state);
        self.actions.extend(actions);
        self.hooks.extend(hooks);
        self
    }

    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Evaluate the configured state without consuming the description.
    pub fn initial_state(&self) -> State {
        let state = self.state.resolve();
        if self.defaults.is_empty() {
            return state;
        }
        match state {
            Value::Null => Value::Object(self.defaults.clone()),
            Value::Object(fields) => {
                let mut merged = self.defaults.clone();
                merged.extend(fields);
                Value::Object(merged)
            }
            other => other,
        }
    }

    pub(crate) fn into_parts(self) -> AppParts<V> {
        AppParts {
            state: self.initial_state(),
            actions: self.actions,
            view: self.view,
            hooks: self.hooks,
            init: self.init,
        }
    }
}

impl<V> fmt::Debug for App<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .field("view", &self.view.is_some())
            .field("hooks", &self.hooks.len())
            .field("init", &self.init.is_some())
            .finish()
    }
}
