//! Countdown feature module (resend-code timers, auto-retry delays).
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Idle → Running → Finished
//! - `intent.rs` - Start, Tick, Cancel
//! - `reducer.rs` - State transitions (pure)
//! - `clock.rs` - Clock capability and the ticker task that feeds `Tick`

mod clock;
mod intent;
mod reducer;
mod state;

pub use clock::{Clock, Countdown, TokioClock};
pub use intent::CountdownIntent;
pub use reducer::CountdownReducer;
pub use state::CountdownState;
