//! Base trait for screen state.

use std::fmt::Debug;

/// Marker trait for state objects held by a [`StateContainer`].
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render the screen)
/// - Comparable (PartialEq for detecting changes)
/// - Defaultable (the value a fresh container starts from)
///
/// [`StateContainer`]: super::StateContainer
pub trait ScreenState: Clone + PartialEq + Default + Debug + Send + Sync + 'static {}
