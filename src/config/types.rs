use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
}

/// Defaults for pagination engines created by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Items requested per page (default: 20). Must be greater than zero.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Effect channel buffering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Undelivered effects held per subscriber before `emit` waits
    /// (default: 64). `0` means unbounded.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

/// Countdown timers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Tick period in milliseconds (default: 1000). Must be greater than zero.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

fn default_page_size() -> usize {
    crate::pagination::DEFAULT_PAGE_SIZE
}

fn default_buffer_capacity() -> usize {
    64
}

fn default_tick_millis() -> u64 {
    1000
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
        }
    }
}
