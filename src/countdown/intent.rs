//! Intents for the countdown.

use crate::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownIntent {
    /// Begin a new run, replacing any run in progress.
    Start { run: u64, seconds: u32 },

    /// One period elapsed for `run`. Ticks from older runs are ignored.
    Tick { run: u64 },

    Cancel,
}

impl Intent for CountdownIntent {}
