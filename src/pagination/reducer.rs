//! Reducer for incremental pagination.

use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::intent::PageIntent;
use super::state::{PageItem, PaginationState};

/// Pure pagination transitions.
///
/// End detection compares the returned length against `page_size` literally:
/// a page longer than requested is appended in full and does not count as
/// the end.
pub struct PaginationReducer<T>(PhantomData<fn() -> T>);

impl<T: PageItem> Reducer for PaginationReducer<T> {
    type State = PaginationState<T>;
    type Intent = PageIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PageIntent::Reset => PaginationState::initial(state.page_size),

            PageIntent::FetchStarted { ticket } => {
                if state.can_load_more() {
                    state.claim(ticket)
                } else {
                    state
                }
            }

            PageIntent::FetchSucceeded { ticket, items } => {
                if state.in_flight() != Some(ticket) {
                    return state;
                }
                let page_size = state.page_size;
                let mut next = state.settle(ticket);
                next.has_reached_end = items.len() < page_size;
                next.items.extend(items);
                next.cursor += 1;
                next.error = None;
                next
            }

            PageIntent::FetchFailed { ticket, reason } => {
                if state.in_flight() != Some(ticket) {
                    return state;
                }
                let mut next = state.settle(ticket);
                next.error = Some(reason);
                next
            }

            PageIntent::FetchAbandoned { ticket } => {
                if state.in_flight() != Some(ticket) {
                    return state;
                }
                state.release()
            }
        }
    }
}
