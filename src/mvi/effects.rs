//! One-shot effect delivery.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::ShutdownError;
use crate::session::ScopeHandle;

/// Per-subscriber buffering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectBuffer {
    /// At most `n` undelivered effects per subscriber; `emit` waits for room.
    /// A capacity of zero is treated as one.
    Bounded(usize),
    Unbounded,
}

impl EffectBuffer {
    /// Config-style capacity: `0` means unbounded.
    pub fn from_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            EffectBuffer::Unbounded
        } else {
            EffectBuffer::Bounded(capacity)
        }
    }
}

impl Default for EffectBuffer {
    fn default() -> Self {
        EffectBuffer::Bounded(64)
    }
}

enum Outlet<E> {
    Bounded(mpsc::Sender<E>),
    Unbounded(mpsc::UnboundedSender<E>),
}

impl<E> Clone for Outlet<E> {
    fn clone(&self) -> Self {
        match self {
            Outlet::Bounded(tx) => Outlet::Bounded(tx.clone()),
            Outlet::Unbounded(tx) => Outlet::Unbounded(tx.clone()),
        }
    }
}

impl<E> Outlet<E> {
    fn is_closed(&self) -> bool {
        match self {
            Outlet::Bounded(tx) => tx.is_closed(),
            Outlet::Unbounded(tx) => tx.is_closed(),
        }
    }

    /// `false` if the subscriber went away.
    async fn deliver(&self, effect: E) -> bool {
        match self {
            Outlet::Bounded(tx) => tx.send(effect).await.is_ok(),
            Outlet::Unbounded(tx) => tx.send(effect).is_ok(),
        }
    }
}

enum Inlet<E> {
    Bounded(mpsc::Receiver<E>),
    Unbounded(mpsc::UnboundedReceiver<E>),
}

impl<E> Inlet<E> {
    async fn recv(&mut self) -> Option<E> {
        match self {
            Inlet::Bounded(rx) => rx.recv().await,
            Inlet::Unbounded(rx) => rx.recv().await,
        }
    }

    fn try_recv(&mut self) -> Option<E> {
        match self {
            Inlet::Bounded(rx) => rx.try_recv().ok(),
            Inlet::Unbounded(rx) => rx.try_recv().ok(),
        }
    }
}

/// Ordered, non-replayable fan-out of transient effects.
///
/// Each effect goes to the subscribers attached when it is emitted, in
/// emission order, once each. Late subscribers never see earlier effects,
/// and an effect emitted with nobody attached is gone for good.
pub struct EffectChannel<E> {
    inner: Arc<EffectInner<E>>,
}

struct EffectInner<E> {
    buffer: EffectBuffer,
    outlets: Mutex<Vec<Outlet<E>>>,
    emit_gate: tokio::sync::Mutex<()>,
    scope: ScopeHandle,
}

impl<E> Clone for EffectChannel<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Clone + Send + std::fmt::Debug + 'static> EffectChannel<E> {
    pub fn new(buffer: EffectBuffer, scope: ScopeHandle) -> Self {
        Self {
            inner: Arc::new(EffectInner {
                buffer,
                outlets: Mutex::new(Vec::new()),
                emit_gate: tokio::sync::Mutex::new(()),
                scope,
            }),
        }
    }

    pub fn buffer(&self) -> EffectBuffer {
        self.inner.buffer
    }

    /// Attach a new subscriber. It receives only effects emitted from now on.
    pub fn subscribe(&self) -> EffectSubscription<E> {
        let (outlet, inlet) = match self.inner.buffer {
            EffectBuffer::Bounded(capacity) => {
                let (tx, rx) = mpsc::channel(capacity.max(1));
                (Outlet::Bounded(tx), Inlet::Bounded(rx))
            }
            EffectBuffer::Unbounded => {
                let (tx, rx) = mpsc::unbounded_channel();
                (Outlet::Unbounded(tx), Inlet::Unbounded(rx))
            }
        };
        self.inner.outlets.lock().push(outlet);
        EffectSubscription {
            inlet,
            scope: self.inner.scope.clone(),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        let mut outlets = self.inner.outlets.lock();
        outlets.retain(|outlet| !outlet.is_closed());
        outlets.len()
    }

    /// Deliver `effect` to every subscriber attached right now.
    ///
    /// Emits are serialized, so two concurrent emits never interleave at any
    /// subscriber. With a bounded buffer this waits for room rather than
    /// dropping. Returns how many subscribers the effect reached.
    pub async fn emit(&self, effect: E) -> Result<usize, ShutdownError> {
        let _gate = self.inner.emit_gate.lock().await;
        self.inner.scope.ensure_active()?;

        let outlets: Vec<Outlet<E>> = {
            let mut outlets = self.inner.outlets.lock();
            outlets.retain(|outlet| !outlet.is_closed());
            outlets.clone()
        };

        if outlets.is_empty() {
            tracing::debug!(effect = ?effect, "No subscribers, effect dropped");
            return Ok(0);
        }

        let mut delivered = 0;
        for outlet in &outlets {
            let sent = tokio::select! {
                biased;
                sent = outlet.deliver(effect.clone()) => sent,
                _ = self.inner.scope.wait() => return Err(ShutdownError),
            };
            if sent {
                delivered += 1;
            }
        }
        tracing::trace!(effect = ?effect, delivered, "Effect emitted");
        Ok(delivered)
    }
}

/// Receiving end of an [`EffectChannel`]. Dropping it detaches.
pub struct EffectSubscription<E> {
    inlet: Inlet<E>,
    scope: ScopeHandle,
}

impl<E> EffectSubscription<E> {
    /// Next effect, waiting if none is buffered. `None` once the scope is
    /// torn down and the buffer is drained.
    pub async fn recv(&mut self) -> Option<E> {
        tokio::select! {
            biased;
            effect = self.inlet.recv() => effect,
            _ = self.scope.wait() => self.inlet.try_recv(),
        }
    }

    /// Next buffered effect, if any.
    pub fn try_recv(&mut self) -> Option<E> {
        self.inlet.try_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionScope;
    use std::time::Duration;

    #[test]
    fn from_capacity_zero_is_unbounded() {
        assert_eq!(EffectBuffer::from_capacity(0), EffectBuffer::Unbounded);
        assert_eq!(EffectBuffer::from_capacity(8), EffectBuffer::Bounded(8));
    }

    #[tokio::test]
    async fn emit_without_subscribers_drops() {
        let scope = SessionScope::new();
        let channel = EffectChannel::<&'static str>::new(EffectBuffer::Unbounded, scope.handle());
        assert_eq!(channel.emit("toast").await, Ok(0));

        let mut late = channel.subscribe();
        assert_eq!(late.try_recv(), None);
    }

    #[tokio::test]
    async fn dropped_subscription_is_pruned() {
        let scope = SessionScope::new();
        let channel = EffectChannel::<u32>::new(EffectBuffer::Bounded(4), scope.handle());
        let first = channel.subscribe();
        let _second = channel.subscribe();
        assert_eq!(channel.subscriber_count(), 2);

        drop(first);
        assert_eq!(channel.emit(1).await, Ok(1));
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn full_bounded_buffer_applies_backpressure() {
        let scope = SessionScope::new();
        let channel = EffectChannel::<u32>::new(EffectBuffer::Bounded(1), scope.handle());
        let mut sub = channel.subscribe();

        channel.emit(1).await.unwrap();
        let blocked = tokio::time::timeout(Duration::from_millis(50), channel.emit(2)).await;
        assert!(blocked.is_err(), "emit should wait for room");

        assert_eq!(sub.recv().await, Some(1));
        channel.emit(3).await.unwrap();
        assert_eq!(sub.recv().await, Some(3));
    }

    #[tokio::test]
    async fn emit_after_teardown_fails() {
        let scope = SessionScope::new();
        let channel = EffectChannel::<u32>::new(EffectBuffer::Unbounded, scope.handle());
        let mut sub = channel.subscribe();
        channel.emit(1).await.unwrap();
        scope.teardown();

        assert_eq!(channel.emit(2).await, Err(ShutdownError));
        assert_eq!(sub.recv().await, Some(1));
        assert_eq!(sub.recv().await, None);
    }
}
