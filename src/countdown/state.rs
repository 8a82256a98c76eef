//! State for the countdown.

use crate::mvi::ScreenState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    #[default]
    Idle,
    Running {
        run: u64,
        remaining: u32,
    },
    Finished,
}

impl ScreenState for CountdownState {}

impl CountdownState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Seconds left, for display.
    pub fn remaining(&self) -> Option<u32> {
        match self {
            Self::Running { remaining, .. } => Some(*remaining),
            _ => None,
        }
    }
}
