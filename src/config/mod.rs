mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CountdownConfig, EffectsConfig, PaginationConfig, RuntimeConfig};
