//! Clock capability and the countdown ticker.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::error::{RuntimeError, ShutdownError, ValidationError};
use crate::mvi::{StateContainer, StateObserver};
use crate::session::ScopeHandle;

use super::intent::CountdownIntent;
use super::reducer::CountdownReducer;
use super::state::CountdownState;

/// Scheduled-callback capability.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, period: Duration);
}

/// Clock backed by the tokio timer (pausable in tests).
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}

/// Countdown container plus the ticker task that drives it.
#[derive(Clone)]
pub struct Countdown {
    container: StateContainer<CountdownReducer>,
    clock: Arc<dyn Clock>,
    period: Duration,
    runs: Arc<AtomicU64>,
    scope: ScopeHandle,
}

impl Countdown {
    pub fn new(clock: Arc<dyn Clock>, period: Duration, scope: ScopeHandle) -> Self {
        Self {
            container: StateContainer::new(scope.clone()),
            clock,
            period,
            runs: Arc::new(AtomicU64::new(0)),
            scope,
        }
    }

    pub fn current(&self) -> CountdownState {
        self.container.current()
    }

    pub fn observe(&self) -> StateObserver<CountdownState> {
        self.container.observe()
    }

    /// Start counting down from `seconds`, replacing any run in progress.
    ///
    /// The returned task submits one `Tick` per period until the run
    /// finishes, is replaced or cancelled, or the scope is torn down.
    pub fn start(&self, seconds: u32) -> Result<JoinHandle<()>, RuntimeError> {
        if seconds == 0 {
            return Err(ValidationError::InvalidPayload {
                intent: "Start",
                reason: "countdown needs at least one second".to_string(),
            }
            .into());
        }
        let run = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        self.container
            .submit(CountdownIntent::Start { run, seconds })?;

        let ticker = self.clone();
        Ok(tokio::spawn(async move { ticker.tick_until_done(run).await }))
    }

    pub fn cancel(&self) -> Result<(), ShutdownError> {
        self.container.submit(CountdownIntent::Cancel)
    }

    async fn tick_until_done(&self, run: u64) {
        loop {
            tokio::select! {
                biased;
                _ = self.scope.wait() => break,
                _ = self.clock.sleep(self.period) => {}
            }
            match self.container.dispatch(CountdownIntent::Tick { run }) {
                Ok(CountdownState::Running { run: current, .. }) if current == run => {}
                Ok(state) => {
                    tracing::trace!(run, ?state, "Countdown ticker stopping");
                    break;
                }
                Err(ShutdownError) => break,
            }
        }
    }
}
