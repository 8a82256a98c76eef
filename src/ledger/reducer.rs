//! Reducer for the quantity ledger.

use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::intent::LedgerIntent;
use super::state::{LedgerKey, QuantityLedger};

pub struct LedgerReducer<K>(PhantomData<fn() -> K>);

impl<K: LedgerKey> Reducer for LedgerReducer<K> {
    type State = QuantityLedger<K>;
    type Intent = LedgerIntent<K>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LedgerIntent::Set { key, quantity } => state.set(key, quantity),
            LedgerIntent::Add { key, delta } => state.add(key, delta),
            LedgerIntent::Remove { key } => state.remove(&key),
            LedgerIntent::Clear => state.clear(),
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type R = LedgerReducer<&'static str>;

    #[test]
    fn replay_matches_manual_fold() {
        let intents = vec![
            LedgerIntent::Add { key: "a", delta: 2 },
            LedgerIntent::Set { key: "b", quantity: 4 },
            LedgerIntent::Add { key: "a", delta: -1 },
            LedgerIntent::Remove { key: "b" },
        ];
        let state = R::replay(QuantityLedger::new(), intents);
        assert_eq!(state.quantity(&"a"), 1);
        assert!(!state.contains(&"b"));
    }

    #[test]
    fn clear_empties() {
        let state = R::reduce(
            R::reduce(QuantityLedger::new(), LedgerIntent::Set { key: "a", quantity: 1 }),
            LedgerIntent::Clear,
        );
        assert!(state.is_empty());
    }
}
