//! Reducer for the countdown.

use crate::mvi::Reducer;

use super::intent::CountdownIntent;
use super::state::CountdownState;

pub struct CountdownReducer;

impl Reducer for CountdownReducer {
    type State = CountdownState;
    type Intent = CountdownIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CountdownIntent::Start { seconds: 0, .. } => CountdownState::Finished,
            CountdownIntent::Start { run, seconds } => CountdownState::Running {
                run,
                remaining: seconds,
            },

            CountdownIntent::Tick { run: tick_run } => match state {
                CountdownState::Running { run, remaining } if run == tick_run => {
                    if remaining <= 1 {
                        CountdownState::Finished
                    } else {
                        CountdownState::Running {
                            run,
                            remaining: remaining - 1,
                        }
                    }
                }
                other => other,
            },

            CountdownIntent::Cancel => match state {
                CountdownState::Running { .. } => CountdownState::Idle,
                other => other,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_transitions_to_running() {
        let state = CountdownReducer::reduce(
            CountdownState::Idle,
            CountdownIntent::Start { run: 1, seconds: 3 },
        );
        assert_eq!(state, CountdownState::Running { run: 1, remaining: 3 });
    }

    #[test]
    fn last_tick_finishes() {
        let state = CountdownReducer::reduce(
            CountdownState::Running { run: 1, remaining: 1 },
            CountdownIntent::Tick { run: 1 },
        );
        assert_eq!(state, CountdownState::Finished);
    }

    #[test]
    fn tick_from_old_run_is_ignored() {
        let state = CountdownState::Running { run: 2, remaining: 5 };
        let new = CountdownReducer::reduce(state, CountdownIntent::Tick { run: 1 });
        assert_eq!(new, state);
    }

    #[test]
    fn cancel_only_affects_running() {
        assert_eq!(
            CountdownReducer::reduce(
                CountdownState::Running { run: 1, remaining: 2 },
                CountdownIntent::Cancel
            ),
            CountdownState::Idle
        );
        assert_eq!(
            CountdownReducer::reduce(CountdownState::Finished, CountdownIntent::Cancel),
            CountdownState::Finished
        );
    }

    #[test]
    fn tick_when_idle_is_noop() {
        let new = CountdownReducer::reduce(CountdownState::Idle, CountdownIntent::Tick { run: 1 });
        assert_eq!(new, CountdownState::Idle);
    }
}
