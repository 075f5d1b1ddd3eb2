use std::collections::BTreeMap;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::action::{ActionDescriptor, Dispatcher, Handler};
use crate::app::{App, AppParts, View};
use crate::effect::{Abandoned, Outcome};
use crate::error::FrameworkError;
use crate::hook::{Hook, NoHook};
use crate::state::{State, StateMachine, StateSnapshot};
use crate::validate::AppValidator;

type InFlight = BoxFuture<'static, (ActionDescriptor, Result<Outcome, Abandoned>)>;

/// Snapshot of one commit for inspection.
#[derive(Debug, Clone)]
pub struct CycleRecord {
    pub cycle: u64,
    pub action: ActionDescriptor,
    pub state_before: State,
    pub state_after: State,
    pub rendered: bool,
}

/// The application runtime: drives the dispatch → commit → render cycle.
///
/// `H` is the primary hook. It fires after every hook registered on the
/// [`App`] and stays reachable through [`AppRuntime::hook`], which is how an
/// observer reads back what it recorded.
pub struct AppRuntime<V, H = NoHook> {
    state_machine: StateMachine,
    actions: BTreeMap<String, Handler>,
    view: Option<View<V>>,
    hooks: Vec<Box<dyn Hook<V>>>,
    hook: H,
    dispatcher: Dispatcher,
    queue: mpsc::UnboundedReceiver<ActionDescriptor>,
    in_flight: FuturesUnordered<InFlight>,
    cycle_log: Vec<CycleRecord>,
}

impl<V, H: Hook<V>> AppRuntime<V, H> {
    /// Start an application: validate it, render the initial view, run `init`.
    ///
    /// Actions dispatched by `init` are queued; they run on the next
    /// [`step`](Self::step) or [`settle`](Self::settle).
    pub fn new(app: App<V>, hook: H) -> Result<Self, FrameworkError> {
        let AppParts {
            state,
            actions,
            view,
            hooks,
            init,
        } = app.into_parts();

        let validated =
            AppValidator::validate_parts(&state, actions.keys().map(String::as_str), view.is_some())?;

        let (dispatcher, queue) = Dispatcher::channel();
        let mut runtime = AppRuntime {
            state_machine: StateMachine::new(state),
            actions,
            view,
            hooks,
            hook,
            dispatcher,
            queue,
            in_flight: FuturesUnordered::new(),
            cycle_log: Vec::new(),
        };

        debug!(
            actions = validated.action_count,
            has_view = validated.has_view,
            "app runtime started"
        );

        runtime.render();
        if let Some(init) = init {
            init(runtime.state_machine.current(), &runtime.dispatcher);
        }

        Ok(runtime)
    }

    /// Get the current application state.
    pub fn state(&self) -> &State {
        self.state_machine.current()
    }

    /// Get the current cycle number.
    pub fn cycle(&self) -> u64 {
        self.state_machine.cycle()
    }

    pub fn cycle_log(&self) -> &[CycleRecord] {
        &self.cycle_log
    }

    pub fn history(&self) -> &[StateSnapshot] {
        self.state_machine.history()
    }

    /// Get the state snapshot as JSON.
    pub fn snapshot(&self) -> String {
        self.state_machine.snapshot()
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    /// Number of effects parked and not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    /// Call the view on the current state without notifying hooks.
    pub fn view(&self) -> Option<V> {
        self.view
            .as_ref()
            .map(|view| view(self.state_machine.current(), &self.dispatcher))
    }

    /// Dispatch an action by name.
    ///
    /// An immediate outcome is committed (and rendered) before this returns.
    /// A deferred one is parked until [`step`](Self::step) drives it. Actions
    /// the handler dispatches synchronously run before its outcome is applied.
    pub fn dispatch(&mut self, name: &str, data: Option<Value>) -> Result<(), FrameworkError> {
        self.dispatch_call(ActionDescriptor::new(name, data))
    }

    /// Make progress on queued dispatches and in-flight effects.
    ///
    /// Queued dispatches run first. If effects are in flight, waits for the
    /// next queued dispatch or effect resolution, whichever is ready first
    /// (queued dispatches win ties). Returns `false` when there was nothing
    /// to do.
    pub async fn step(&mut self) -> Result<bool, FrameworkError> {
        let drained = self.drain_queue()?;
        if self.in_flight.is_empty() {
            return Ok(drained > 0);
        }

        tokio::select! {
            biased;
            Some(call) = self.queue.recv() => {
                self.dispatch_call(call)?;
            }
            Some((call, resolved)) = self.in_flight.next() => {
                let outcome = resolved
                    .map_err(|Abandoned| FrameworkError::EffectAbandoned(call.name.clone()))?;
                trace!(
                    action = %call.name,
                    deferred = outcome.is_deferred(),
                    "effect resolved"
                );
                self.apply(call, outcome)?;
            }
            else => return Ok(drained > 0),
        }

        Ok(true)
    }

    /// Drive until nothing is queued and no effect is in flight.
    pub async fn settle(&mut self) -> Result<(), FrameworkError> {
        while self.step().await? {}
        Ok(())
    }

    fn dispatch_call(&mut self, call: ActionDescriptor) -> Result<(), FrameworkError> {
        let handler = self
            .actions
            .get(&call.name)
            .cloned()
            .ok_or_else(|| FrameworkError::UnknownAction(call.name.clone()))?;

        debug!(action = %call.name, has_data = call.data.is_some(), "dispatch");
        for hook in &mut self.hooks {
            hook.on_action(&call);
        }
        self.hook.on_action(&call);

        let outcome = handler(self.state_machine.current(), &self.dispatcher, call.data.as_ref());
        // Actions the handler dispatched start before its own outcome lands.
        self.drain_queue()?;
        self.apply(call, outcome)
    }

    fn apply(&mut self, call: ActionDescriptor, outcome: Outcome) -> Result<(), FrameworkError> {
        match outcome {
            Outcome::Immediate(partial) => self.commit(call, partial),
            Outcome::Deferred(effect) => {
                trace!(
                    action = %call.name,
                    in_flight = self.in_flight.len() + 1,
                    "effect parked"
                );
                self.in_flight
                    .push(effect.into_future().map(move |resolved| (call, resolved)).boxed());
                Ok(())
            }
        }
    }

    fn commit(&mut self, call: ActionDescriptor, partial: State) -> Result<(), FrameworkError> {
        let state_before = self.state_machine.current().clone();
        self.state_machine.merge(partial)?;
        let state_after = self.state_machine.current().clone();
        let cycle = self.state_machine.cycle();
        debug!(action = %call.name, cycle, "state committed");

        for hook in &mut self.hooks {
            hook.on_commit(&call, &state_after);
        }
        self.hook.on_commit(&call, &state_after);

        let rendered = self.render();
        self.cycle_log.push(CycleRecord {
            cycle,
            action: call,
            state_before,
            state_after,
            rendered,
        });
        Ok(())
    }

    fn drain_queue(&mut self) -> Result<usize, FrameworkError> {
        let mut drained = 0;
        while let Ok(call) = self.queue.try_recv() {
            self.dispatch_call(call)?;
            drained += 1;
        }
        Ok(drained)
    }

    fn render(&mut self) -> bool {
        let Some(view) = &self.view else {
            return false;
        };
        let rendered = view(self.state_machine.current(), &self.dispatcher);
        trace!(cycle = self.state_machine.cycle(), "view rendered");
        for hook in &mut self.hooks {
            hook.on_render(&rendered);
        }
        self.hook.on_render(&rendered);
        true
    }
}
