//! Incremental pagination feature module.
//!
//! Loads a list page by page from a [`DataSource`], tracking the cursor,
//! detecting the end of data and recovering from failed fetches.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Paged list snapshot and its phase projection
//! - `intent.rs` - Fetch lifecycle events (Reset, FetchStarted, FetchSucceeded, FetchFailed)
//! - `reducer.rs` - State transitions (pure, stale results ignored)
//! - `source.rs` - The data source capability and stock implementations
//! - `engine.rs` - Drives fetches and feeds results back as intents

mod engine;
mod intent;
mod reducer;
mod source;
mod state;

pub use engine::{LoadOutcome, PaginationEngine, SkipReason};
pub use intent::{FetchTicket, PageIntent};
pub use reducer::PaginationReducer;
pub use source::{DataSource, InMemorySource, WithTimeout};
pub use state::{PageItem, PaginationPhase, PaginationState, DEFAULT_PAGE_SIZE};
