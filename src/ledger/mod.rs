//! Keyed quantity ledger feature module (shopping-cart style).
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Ledger of key → positive quantity
//! - `intent.rs` - Set, Add, Remove, Clear
//! - `reducer.rs` - State transitions (pure)

mod intent;
mod reducer;
mod state;

pub use intent::LedgerIntent;
pub use reducer::LedgerReducer;
pub use state::{LedgerKey, QuantityLedger};
