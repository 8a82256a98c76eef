//! Model-View-Intent (MVI) runtime primitives.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ StateContainer ──→ Reducer ──→ State ──→ observers
//!    ↑              (serialized)                          │
//!    └──── async work (fetches, timers) ←─────────────────┘
//!
//! EffectChannel ──→ subscribers   (one-shot, never replayed)
//! ```
//!
//! - **State**: Immutable snapshot, always replayable to new observers
//! - **Intent**: User actions or system events
//! - **Reducer**: Pure function that transforms state based on intents
//! - **Effect**: Transient instruction (navigation, toast) delivered once

mod container;
mod effects;
mod intent;
mod reducer;
mod state;

pub use container::{StateContainer, StateObserver};
pub use effects::{EffectBuffer, EffectChannel, EffectSubscription};
pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ScreenState;
