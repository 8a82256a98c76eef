//! Base trait for intents (user/system actions).

use std::fmt::Debug;

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (button presses, pull-to-refresh)
/// - System events (fetch results, timer ticks)
///
/// Intents are processed one at a time by reducers to produce new states.
pub trait Intent: Debug + Send + 'static {}
