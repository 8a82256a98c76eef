use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::error::ShutdownError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScopePhase {
    Active = 0,
    TearingDown = 1,
    Closed = 2,
}

/// Owner of a teardown boundary.
///
/// Everything a screen session creates holds a [`ScopeHandle`] cloned from
/// here; once [`SessionScope::teardown`] runs, those handles refuse further
/// work and wake every task parked in [`ScopeHandle::wait`].
pub struct SessionScope {
    torn_down: Arc<AtomicBool>,
    phase: Arc<AtomicU8>,
    notify: Arc<Notify>,
}

impl SessionScope {
    pub fn new() -> Self {
        Self {
            torn_down: Arc::new(AtomicBool::new(false)),
            phase: Arc::new(AtomicU8::new(ScopePhase::Active as u8)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Start teardown. Only the first call has any effect.
    pub fn teardown(&self) {
        if !self.torn_down.swap(true, Ordering::SeqCst) {
            self.advance(ScopePhase::TearingDown);
            self.notify.notify_waiters();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> ScopePhase {
        match self.phase.load(Ordering::SeqCst) {
            0 => ScopePhase::Active,
            1 => ScopePhase::TearingDown,
            _ => ScopePhase::Closed,
        }
    }

    pub fn advance(&self, phase: ScopePhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
        tracing::debug!(?phase, "Scope phase");
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            torn_down: Arc::clone(&self.torn_down),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl Default for SessionScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Lightweight handle for checking and awaiting teardown.
#[derive(Clone)]
pub struct ScopeHandle {
    torn_down: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ScopeHandle {
    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// `Err(ShutdownError)` once the scope is gone.
    pub fn ensure_active(&self) -> Result<(), ShutdownError> {
        if self.is_torn_down() {
            Err(ShutdownError)
        } else {
            Ok(())
        }
    }

    /// Resolves when the scope is torn down (immediately if it already is).
    pub async fn wait(&self) {
        // Register with Notify before reading the flag, otherwise a teardown
        // landing between the check and the await would be missed.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_torn_down() {
            return;
        }
        notified.await;
    }
}
