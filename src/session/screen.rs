//! Per-screen composition root.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::config::RuntimeConfig;
use crate::countdown::{Clock, Countdown, TokioClock};
use crate::error::ValidationError;
use crate::mvi::{EffectBuffer, EffectChannel, Reducer, StateContainer};
use crate::pagination::{DataSource, PageItem, PaginationEngine};

use super::scope::{ScopeHandle, ScopePhase, SessionScope};

/// Owns the scope shared by everything one screen instance creates.
///
/// Each screen builds its own session; nothing is shared between sessions.
/// Tearing the session down (explicitly or by dropping it) makes every
/// container, effect channel, engine and timer it produced refuse further
/// work and cancels their outstanding tasks.
pub struct ScreenSession {
    id: Uuid,
    name: String,
    config: RuntimeConfig,
    scope: SessionScope,
}

impl ScreenSession {
    pub fn new(name: impl Into<String>, config: RuntimeConfig) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            config,
            scope: SessionScope::new(),
        };
        tracing::debug!(session = %session.id, screen = %session.name, "Session opened");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn phase(&self) -> ScopePhase {
        self.scope.phase()
    }

    pub fn is_torn_down(&self) -> bool {
        self.scope.is_torn_down()
    }

    /// Container starting from `State::default()`.
    pub fn container<R: Reducer>(&self) -> StateContainer<R> {
        StateContainer::new(self.scope.handle())
    }

    pub fn container_with<R: Reducer>(&self, initial: R::State) -> StateContainer<R> {
        StateContainer::with_state(initial, self.scope.handle())
    }

    /// Effect channel buffered as configured.
    pub fn effects<E>(&self) -> EffectChannel<E>
    where
        E: Clone + Send + std::fmt::Debug + 'static,
    {
        let buffer = EffectBuffer::from_capacity(self.config.effects.buffer_capacity);
        EffectChannel::new(buffer, self.scope.handle())
    }

    /// Pagination engine using the configured page size.
    pub fn pagination<T: PageItem>(
        &self,
        source: Arc<dyn DataSource<T>>,
    ) -> Result<PaginationEngine<T>, ValidationError> {
        self.pagination_with_page_size(source, self.config.pagination.page_size)
    }

    pub fn pagination_with_page_size<T: PageItem>(
        &self,
        source: Arc<dyn DataSource<T>>,
        page_size: usize,
    ) -> Result<PaginationEngine<T>, ValidationError> {
        PaginationEngine::new(source, page_size, self.scope.handle())
    }

    /// Countdown ticking on the tokio clock at the configured period.
    pub fn countdown(&self) -> Countdown {
        self.countdown_with_clock(Arc::new(TokioClock))
    }

    pub fn countdown_with_clock(&self, clock: Arc<dyn Clock>) -> Countdown {
        let period = Duration::from_millis(self.config.countdown.tick_millis);
        Countdown::new(clock, period, self.scope.handle())
    }

    /// End the session. Safe to call more than once.
    pub fn teardown(&self) {
        if self.scope.is_torn_down() {
            return;
        }
        self.scope.teardown();
        self.scope.advance(ScopePhase::Closed);
        tracing::info!(session = %self.id, screen = %self.name, "Session torn down");
    }
}

impl Drop for ScreenSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
