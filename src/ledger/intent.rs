//! Intents for the quantity ledger.

use crate::mvi::Intent;

use super::state::LedgerKey;

#[derive(Debug, Clone)]
pub enum LedgerIntent<K> {
    /// Replace the quantity for `key`. Zero or below removes it.
    Set { key: K, quantity: i64 },

    /// Add `delta` (may be negative) to the current quantity.
    Add { key: K, delta: i64 },

    Remove { key: K },

    Clear,
}

impl<K: LedgerKey> Intent for LedgerIntent<K> {}
