//! Error types for Daily Log.

use thiserror::Error;

/// Common error type for Daily Log.
#[derive(Error, Debug)]
pub enum DailyLogError {
    /// Upstream provider error.
    ///
    /// Network failure, non-2xx response, timeout or an unusable body.
    /// Adapters recover from this locally (stale cache or default data).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Feed document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for configuration or user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DailyLogError {
    /// Whether this error came from an upstream provider.
    pub fn is_upstream(&self) -> bool {
        matches!(self, DailyLogError::Upstream(_))
    }
}

/// Result type alias for Daily Log operations.
pub type Result<T> = std::result::Result<T, DailyLogError>;
