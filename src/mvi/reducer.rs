//! Reducer trait.

use super::intent::Intent;
use super::state::ScreenState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure, total function: (State, Intent) -> State.
/// Anything fallible runs outside and comes back as a result intent.
pub trait Reducer: 'static {
    /// The state type this reducer operates on.
    type State: ScreenState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Left fold of [`Reducer::reduce`] over `intents`, starting at `state`.
    ///
    /// A container fed the same intents in the same order ends up in
    /// exactly this state.
    fn replay<I>(state: Self::State, intents: I) -> Self::State
    where
        I: IntoIterator<Item = Self::Intent>,
    {
        intents.into_iter().fold(state, Self::reduce)
    }
}
