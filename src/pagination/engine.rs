//! Drives a paged list through its data source.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::{FetchError, ShutdownError, ValidationError};
use crate::mvi::{StateContainer, StateObserver};
use crate::session::ScopeHandle;

use super::intent::{FetchTicket, PageIntent};
use super::reducer::PaginationReducer;
use super::source::DataSource;
use super::state::{PageItem, PaginationState};

/// Why a load request did not fetch anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InFlight,
    ReachedEnd,
}

/// What one `load_next_page` call ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Skipped(SkipReason),
    Loaded {
        page_index: u32,
        count: usize,
        reached_end: bool,
    },
    /// The failure is also recorded in `PaginationState::error`.
    Failed(FetchError),
    /// A reset happened while this fetch was out; its result was thrown away.
    Discarded,
}

/// Gives the fetch slot back if `load_next_page` is dropped between claiming
/// it and dispatching the result (timeout, losing `select!` arm, aborted task).
struct SlotGuard<'a, T: PageItem> {
    container: &'a StateContainer<PaginationReducer<T>>,
    ticket: Option<FetchTicket>,
}

impl<T: PageItem> SlotGuard<'_, T> {
    fn disarm(&mut self) {
        self.ticket = None;
    }
}

impl<T: PageItem> Drop for SlotGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            tracing::debug!(ticket = ticket.0, "Fetch abandoned");
            // Fails only after teardown, when nothing can load anyway.
            let _ = self
                .container
                .submit(PageIntent::FetchAbandoned { ticket });
        }
    }
}

/// Generic incremental loader with a single fetch slot.
///
/// At most one fetch per engine holds the slot at a time. `refresh` resets
/// the state, which invalidates the ticket of any fetch still out, so a late
/// result from before the reset never lands. Dropping a `load_next_page`
/// future before it finishes frees the slot again.
pub struct PaginationEngine<T: PageItem> {
    container: StateContainer<PaginationReducer<T>>,
    source: Arc<dyn DataSource<T>>,
    tickets: Arc<AtomicU64>,
    scope: ScopeHandle,
}

impl<T: PageItem> Clone for PaginationEngine<T> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            source: Arc::clone(&self.source),
            tickets: Arc::clone(&self.tickets),
            scope: self.scope.clone(),
        }
    }
}

impl<T: PageItem> PaginationEngine<T> {
    pub fn new(
        source: Arc<dyn DataSource<T>>,
        page_size: usize,
        scope: ScopeHandle,
    ) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::InvalidPageSize { page_size });
        }
        Ok(Self {
            container: StateContainer::with_state(PaginationState::initial(page_size), scope.clone()),
            source,
            tickets: Arc::new(AtomicU64::new(0)),
            scope,
        })
    }

    pub fn page_size(&self) -> usize {
        self.container.current().page_size
    }

    pub fn current(&self) -> PaginationState<T> {
        self.container.current()
    }

    pub fn observe(&self) -> StateObserver<PaginationState<T>> {
        self.container.observe()
    }

    /// Fetch the next page unless one is already out or the end was reached.
    ///
    /// A failed fetch is not an `Err`: it is recorded in state and reported
    /// as [`LoadOutcome::Failed`]. `Err` only means the session is gone.
    pub async fn load_next_page(&self) -> Result<LoadOutcome, ShutdownError> {
        let ticket = FetchTicket(self.tickets.fetch_add(1, Ordering::Relaxed) + 1);
        let claimed = self.container.dispatch(PageIntent::FetchStarted { ticket })?;

        if claimed.in_flight() != Some(ticket) {
            let reason = if claimed.is_loading {
                SkipReason::InFlight
            } else {
                SkipReason::ReachedEnd
            };
            tracing::trace!(?reason, "Load skipped");
            return Ok(LoadOutcome::Skipped(reason));
        }

        let mut slot = SlotGuard {
            container: &self.container,
            ticket: Some(ticket),
        };
        let page_index = claimed.cursor + 1;
        let page_size = claimed.page_size;
        tracing::debug!(page_index, page_size, ticket = ticket.0, "Fetching page");

        let fetched = tokio::select! {
            biased;
            _ = self.scope.wait() => return Err(ShutdownError),
            fetched = self.source.fetch_page(page_index, page_size) => fetched,
        };
        slot.disarm();

        match fetched {
            Ok(items) => {
                let count = items.len();
                let settled = self
                    .container
                    .dispatch(PageIntent::FetchSucceeded { ticket, items })?;
                if settled.last_settled() != Some(ticket) {
                    tracing::debug!(ticket = ticket.0, "Discarding stale page");
                    return Ok(LoadOutcome::Discarded);
                }
                Ok(LoadOutcome::Loaded {
                    page_index,
                    count,
                    reached_end: settled.has_reached_end,
                })
            }
            Err(err) => {
                tracing::warn!(page_index, error = %err, "Page fetch failed");
                let settled = self.container.dispatch(PageIntent::FetchFailed {
                    ticket,
                    reason: err.reason().to_string(),
                })?;
                if settled.last_settled() != Some(ticket) {
                    return Ok(LoadOutcome::Discarded);
                }
                Ok(LoadOutcome::Failed(err))
            }
        }
    }

    /// Start over from the first page.
    pub async fn refresh(&self) -> Result<LoadOutcome, ShutdownError> {
        self.container.submit(PageIntent::Reset)?;
        tracing::debug!("Pagination reset");
        self.load_next_page().await
    }

    /// Run [`load_next_page`](Self::load_next_page) as a background task.
    pub fn spawn_next_page(&self) -> JoinHandle<Result<LoadOutcome, ShutdownError>> {
        let engine = self.clone();
        tokio::spawn(async move { engine.load_next_page().await })
    }

    /// Run [`refresh`](Self::refresh) as a background task.
    pub fn spawn_refresh(&self) -> JoinHandle<Result<LoadOutcome, ShutdownError>> {
        let engine = self.clone();
        tokio::spawn(async move { engine.refresh().await })
    }
}
