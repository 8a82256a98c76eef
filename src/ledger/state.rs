//! State for the quantity ledger.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::mvi::ScreenState;

pub trait LedgerKey: Ord + Clone + Debug + Send + Sync + 'static {}

impl<K: Ord + Clone + Debug + Send + Sync + 'static> LedgerKey for K {}

/// Map of key → quantity that never holds a non-positive quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityLedger<K: Ord> {
    entries: BTreeMap<K, i64>,
}

impl<K: Ord> QuantityLedger<K> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Store `quantity` for `key`; a quantity of zero or less removes the key.
    pub fn set(&mut self, key: K, quantity: i64) {
        if quantity <= 0 {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, quantity);
        }
    }

    /// Merge `delta` into the current quantity (missing keys count as zero).
    pub fn add(&mut self, key: K, delta: i64) {
        let current = self.quantity(&key);
        self.set(key, current.saturating_add(delta));
    }

    pub fn remove(&mut self, key: &K) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn quantity(&self, key: &K) -> i64 {
        self.entries.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Sum of all quantities.
    pub fn total(&self) -> i64 {
        self.entries.values().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> {
        self.entries.iter().map(|(key, quantity)| (key, *quantity))
    }
}

impl<K: Ord> Default for QuantityLedger<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LedgerKey> ScreenState for QuantityLedger<K> {}
