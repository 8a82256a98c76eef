//! Intents for the pagination state machine.

use crate::mvi::Intent;

use super::state::PageItem;

/// Stamp identifying one fetch attempt.
///
/// A result is only applied while its ticket is the one recorded as in
/// flight; a reset in between makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(pub u64);

#[derive(Debug, Clone)]
pub enum PageIntent<T> {
    /// Drop everything and go back to the initial state, keeping the page size.
    Reset,

    /// Claim the single fetch slot. Ignored while loading or at the end.
    FetchStarted { ticket: FetchTicket },

    /// Page arrived.
    FetchSucceeded { ticket: FetchTicket, items: Vec<T> },

    /// Data source failed (including timeouts).
    FetchFailed { ticket: FetchTicket, reason: String },

    /// The caller stopped waiting before the fetch settled. Frees the slot
    /// without touching items, cursor or error.
    FetchAbandoned { ticket: FetchTicket },
}

impl<T: PageItem> Intent for PageIntent<T> {}
