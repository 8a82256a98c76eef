//! Session lifecycle: teardown scopes and the per-screen composition root.

mod scope;
mod screen;

pub use scope::{ScopeHandle, ScopePhase, SessionScope};
pub use screen::ScreenSession;
