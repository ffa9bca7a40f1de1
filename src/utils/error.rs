//! Error types for the trend pipeline
//!
//! Domain errors raised by the data provider and by time series tables.

use thiserror::Error;

/// Errors that can occur while talking to a trend data provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream rate limit hit
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Non-success HTTP status; only 5xx is retried
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body could not be decoded into a table
    #[error("Decoding error: {0}")]
    Decode(String),

    /// No provider is configured or reachable
    #[error("Trend provider unavailable")]
    Unavailable,

    /// Response was decoded but violates table invariants
    #[error("Invalid table: {0}")]
    Table(#[from] TableError),
}

impl ProviderError {
    /// Whether a retry may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited | Self::Timeout => true,
            Self::ServerError(status) => *status >= 500,
            _ => false,
        }
    }
}

/// Errors raised when building a [`crate::models::TimeSeriesTable`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Column length differs from the shared timestamp index
    #[error("Column '{keyword}' has {actual} samples, expected {expected}")]
    RaggedColumn {
        keyword: String,
        expected: usize,
        actual: usize,
    },

    /// Sample is negative, NaN or infinite
    #[error("Column '{keyword}' has invalid sample {value} at row {index}")]
    InvalidSample {
        keyword: String,
        index: usize,
        value: f64,
    },

    /// Keyword already present in the table
    #[error("Duplicate keyword column: {0}")]
    DuplicateKeyword(String),

    /// Timestamp index could not be parsed
    #[error("Invalid date '{0}'")]
    InvalidDate(String),
}
