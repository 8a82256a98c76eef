//! State for incremental pagination.

use std::fmt::Debug;

use crate::mvi::ScreenState;

use super::intent::FetchTicket;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Anything that can be listed in a paged screen.
pub trait PageItem: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Debug + Send + Sync + 'static> PageItem for T {}

/// Coarse view of where the loader is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationPhase {
    /// Nothing fetched yet.
    Idle,
    Loading,
    /// At least one page is in.
    Loaded,
    /// Last fetch failed; `items` still holds what was loaded before.
    Error,
}

/// Snapshot of a paged list.
///
/// `items` only grows until a reset. `cursor` counts successful fetches, so
/// the next page requested is `cursor + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState<T> {
    pub items: Vec<T>,
    pub cursor: u32,
    pub page_size: usize,
    /// True iff the most recent successful page was shorter than `page_size`.
    pub has_reached_end: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    in_flight: Option<FetchTicket>,
    last_settled: Option<FetchTicket>,
}

impl<T> PaginationState<T> {
    pub fn initial(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            page_size,
            has_reached_end: false,
            is_loading: false,
            error: None,
            in_flight: None,
            last_settled: None,
        }
    }

    /// Ticket of the fetch currently holding the slot.
    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    /// Ticket of the last fetch whose result was applied since the last reset.
    pub fn last_settled(&self) -> Option<FetchTicket> {
        self.last_settled
    }

    /// Whether a `load_next_page` would actually fetch.
    pub fn can_load_more(&self) -> bool {
        !self.is_loading && !self.has_reached_end
    }

    pub fn phase(&self) -> PaginationPhase {
        if self.is_loading {
            PaginationPhase::Loading
        } else if self.error.is_some() {
            PaginationPhase::Error
        } else if self.cursor > 0 {
            PaginationPhase::Loaded
        } else {
            PaginationPhase::Idle
        }
    }

    pub(super) fn claim(self, ticket: FetchTicket) -> Self {
        Self {
            is_loading: true,
            in_flight: Some(ticket),
            ..self
        }
    }

    /// Give the slot back without recording a result.
    pub(super) fn release(self) -> Self {
        Self {
            is_loading: false,
            in_flight: None,
            ..self
        }
    }

    pub(super) fn settle(self, ticket: FetchTicket) -> Self {
        Self {
            is_loading: false,
            in_flight: None,
            last_settled: Some(ticket),
            ..self
        }
    }
}

impl<T> Default for PaginationState<T> {
    fn default() -> Self {
        Self::initial(DEFAULT_PAGE_SIZE)
    }
}

impl<T: PageItem> ScreenState for PaginationState<T> {}
