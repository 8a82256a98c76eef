//! Serializing owner of one state value.

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::error::ShutdownError;
use crate::session::ScopeHandle;

use super::reducer::Reducer;

/// Holds the current state of one screen and applies intents to it.
///
/// Reducer applications never overlap: every submit goes through the same
/// gate, so intents from one caller land in submission order and intents
/// from different callers land in arrival order. Snapshots are published
/// through a `watch` channel, which gives observers conflated, in-order
/// delivery without taking the gate.
///
/// Cloning is cheap and yields another handle to the same container, which
/// is how spawned tasks feed result intents back in.
pub struct StateContainer<R: Reducer> {
    inner: Arc<ContainerInner<R>>,
}

struct ContainerInner<R: Reducer> {
    gate: Mutex<()>,
    sender: watch::Sender<R::State>,
    scope: ScopeHandle,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer> Clone for StateContainer<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> StateContainer<R> {
    /// Create a container starting from `State::default()`.
    pub fn new(scope: ScopeHandle) -> Self {
        Self::with_state(R::State::default(), scope)
    }

    pub fn with_state(initial: R::State, scope: ScopeHandle) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            inner: Arc::new(ContainerInner {
                gate: Mutex::new(()),
                sender,
                scope,
                _reducer: PhantomData,
            }),
        }
    }

    /// Apply `intent` to the current state and publish the result.
    pub fn submit(&self, intent: R::Intent) -> Result<(), ShutdownError> {
        self.dispatch(intent).map(|_| ())
    }

    /// Like [`submit`](Self::submit), but hands back the state this intent
    /// produced. Since the gate is held for the whole transition, the
    /// returned value is exactly what the reducer computed, which makes it
    /// usable for check-and-set decisions.
    ///
    /// A panicking reducer propagates to the caller and leaves the
    /// published state untouched.
    pub fn dispatch(&self, intent: R::Intent) -> Result<R::State, ShutdownError> {
        let _gate = self.inner.gate.lock();
        self.inner.scope.ensure_active()?;

        tracing::trace!(intent = ?intent, "Applying intent");
        let current = self.inner.sender.borrow().clone();
        let next = R::reduce(current, intent);

        self.inner.sender.send_if_modified(|slot| {
            if *slot == next {
                false
            } else {
                *slot = next.clone();
                true
            }
        });
        Ok(next)
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> R::State {
        self.inner.sender.borrow().clone()
    }

    /// Stream of states: the current value first, then every change.
    pub fn observe(&self) -> StateObserver<R::State> {
        let mut receiver = self.inner.sender.subscribe();
        receiver.mark_changed();
        StateObserver {
            receiver,
            scope: self.inner.scope.clone(),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.scope.is_torn_down()
    }
}

/// Conflated view of a container's state.
///
/// A slow observer may skip intermediate snapshots but always catches up to
/// the latest one, and never sees them out of order. The stream ends once
/// the owning scope is torn down.
pub struct StateObserver<S> {
    receiver: watch::Receiver<S>,
    scope: ScopeHandle,
}

impl<S: Clone> StateObserver<S> {
    /// Latest published value, without marking it seen.
    pub fn current(&self) -> S {
        self.receiver.borrow().clone()
    }

    /// Next unseen snapshot; the first call yields the current value.
    pub async fn next(&mut self) -> Option<S> {
        tokio::select! {
            biased;
            changed = self.receiver.changed() => {
                changed.ok()?;
                Some(self.receiver.borrow_and_update().clone())
            }
            _ = self.scope.wait() => None,
        }
    }

    /// Wait until a snapshot satisfies `predicate` (checks the current one
    /// first). `None` if the scope ends before that happens.
    pub async fn wait_for(&mut self, mut predicate: impl FnMut(&S) -> bool) -> Option<S> {
        tokio::select! {
            biased;
            found = self.receiver.wait_for(|state| predicate(state)) => {
                found.ok().map(|state| state.clone())
            }
            _ = self.scope.wait() => None,
        }
    }
}
