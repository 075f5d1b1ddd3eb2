use std::fmt;
use std::future::Future;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::oneshot;

use crate::state::State;

/// What an action handler produces.
///
/// `Immediate` is shallow-merged into the current state right away. `Deferred`
/// parks an effect; when it resolves it yields another `Outcome`, so effects
/// may defer again any number of times before a state is finally committed.
#[derive(Debug)]
pub enum Outcome {
    Immediate(State),
    Deferred(Effect),
}

impl Outcome {
    /// An outcome that commits without changing any field.
    pub fn unchanged() -> Self {
        Outcome::Immediate(State::Null)
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Outcome::Deferred(_))
    }
}

impl From<State> for Outcome {
    fn from(state: State) -> Self {
        Outcome::Immediate(state)
    }
}

impl From<Effect> for Outcome {
    fn from(effect: Effect) -> Self {
        Outcome::Deferred(effect)
    }
}

/// The effect's `Update` handle was dropped without being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abandoned;

/// A one-shot deferred computation returned by an action handler.
pub struct Effect {
    inner: BoxFuture<'static, Result<Outcome, Abandoned>>,
}

impl Effect {
    /// Start a callback-style effect.
    ///
    /// `start` runs immediately and receives the `Update` handle. It may
    /// resolve the handle synchronously, move it into a spawned task, or hand
    /// it to anything else that eventually calls it.
    pub fn new<F>(start: F) -> Self
    where
        F: FnOnce(Update),
    {
        let (tx, rx) = oneshot::channel();
        start(Update { tx });
        Effect {
            inner: rx.map(|received| received.map_err(|_| Abandoned)).boxed(),
        }
    }

    /// Wrap a future that yields the next outcome.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        Effect {
            inner: future.map(Ok).boxed(),
        }
    }

    pub(crate) fn into_future(self) -> BoxFuture<'static, Result<Outcome, Abandoned>> {
        self.inner
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Effect(..)")
    }
}

/// One-shot handle through which a callback-style effect commits its result.
#[derive(Debug)]
pub struct Update {
    tx: oneshot::Sender<Outcome>,
}

impl Update {
    /// Commit a (partial) state.
    pub fn set(self, state: State) {
        self.resolve(Outcome::Immediate(state));
    }

    /// Defer again with a nested effect.
    pub fn defer(self, effect: Effect) {
        self.resolve(Outcome::Deferred(effect));
    }

    pub fn resolve(self, outcome: Outcome) {
        // The receiver is gone only when the runtime itself was dropped.
        let _ = self.tx.send(outcome);
    }
}
