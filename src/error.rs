//! Error taxonomy shared by containers, effect channels and pagination.
//!
//! Reducers never fail. Everything fallible happens outside them and is
//! either rejected up front ([`ValidationError`]), recorded in state
//! ([`FetchError`]) or returned to a caller that outlived its session
//! ([`ShutdownError`]).

use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

/// Operation attempted after the owning session scope was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Session scope has been torn down")]
pub struct ShutdownError;

/// Input rejected synchronously before any state was touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Page size must be greater than zero (got {page_size})")]
    InvalidPageSize { page_size: usize },

    #[error("Invalid payload for '{intent}': {reason}")]
    InvalidPayload {
        intent: &'static str,
        reason: String,
    },
}

/// Failure reported by a data source, including timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(format!("Fetch timed out after {:?}", after))
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Umbrella error for callers that do not care which layer failed.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Shutdown(#[from] ShutdownError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RuntimeError {
    /// Short machine-readable classification, used as a tracing field.
    pub fn error_type(&self) -> &'static str {
        match self {
            RuntimeError::Validation(_) => "validation_error",
            RuntimeError::Fetch(_) => "fetch_error",
            RuntimeError::Shutdown(_) => "shutdown_error",
            RuntimeError::Config(_) => "config_error",
        }
    }

    /// Fetch failures are recoverable by retry or refresh; nothing else is.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RuntimeError::Fetch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_displays_reason_verbatim() {
        let err = FetchError::new("network down");
        assert_eq!(err.to_string(), "network down");
        assert_eq!(err.reason(), "network down");
    }

    #[test]
    fn timeout_is_an_ordinary_fetch_error() {
        let err = RuntimeError::from(FetchError::timeout(Duration::from_secs(30)));
        assert_eq!(err.error_type(), "fetch_error");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("30s"));
    }

    #[test]
    fn sub_second_timeout_keeps_its_precision() {
        let err = FetchError::timeout(Duration::from_millis(250));
        assert_eq!(err.reason(), "Fetch timed out after 250ms");
    }

    #[test]
    fn shutdown_is_not_recoverable() {
        let err = RuntimeError::from(ShutdownError);
        assert_eq!(err.error_type(), "shutdown_error");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn invalid_page_size_message() {
        let err = ValidationError::InvalidPageSize { page_size: 0 };
        assert_eq!(
            err.to_string(),
            "Page size must be greater than zero (got 0)"
        );
    }
}
