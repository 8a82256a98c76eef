//! Screen-scoped reactive state runtime.
//!
//! Every screen builds a [`session::ScreenSession`] and from it the pieces
//! it needs: a [`mvi::StateContainer`] that serializes intents through a pure
//! reducer, an [`mvi::EffectChannel`] for one-shot notifications, and, for
//! list screens, a [`pagination::PaginationEngine`] that loads pages from a
//! [`pagination::DataSource`]. Tearing the session down stops all of them.

pub mod config;
pub mod countdown;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod mvi;
pub mod pagination;
pub mod session;

pub use error::{FetchError, RuntimeError, ShutdownError, ValidationError};
