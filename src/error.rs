//! Unified error handling for the edutrend crate
//!
//! Consolidates the domain errors into a single `Error` enum while keeping
//! the domain types usable on their own.
//!
//! # Architecture
//!
//! - [`TrendErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Missing or partial trend data is never an error here: the pipeline
//! degrades to mock data instead. These types cover the hard failures.
//!
//! # Usage
//!
//! ```rust,ignore
//! use edutrend::error::{Error, TrendErrorTrait};
//!
//! fn report(err: &Error) {
//!     eprintln!("[{}] {}", err.category().localized_desc(), err.localized_desc());
//! }
//! ```

use std::io;
use thiserror::Error;

use crate::i18n::t;

pub use crate::analytics::AnalysisError;
pub use crate::utils::error::{ProviderError, TableError};

/// Common trait for all edutrend error types
pub trait TrendErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get localized description for user-facing messages
    fn localized_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Provider and HTTP errors
    Network,
    /// Malformed series or response bodies
    Data,
    /// Invalid analysis parameters
    Analysis,
    /// File and export errors
    Storage,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Data => "data",
            Self::Analysis => "analysis",
            Self::Storage => "storage",
            Self::Config => "config",
        }
    }

    /// Get localized description for the category
    pub fn localized_desc(&self) -> String {
        crate::i18n::label(
            &format!("errors.category.{}", self.key()),
            &crate::i18n::current_locale(),
        )
    }
}

impl TrendErrorTrait for ProviderError {
    fn is_recoverable(&self) -> bool {
        ProviderError::is_recoverable(self)
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Http(e) => format!("{}: {e}", t!("errors.provider.http")),
            Self::RateLimited => t!("errors.provider.rate_limited").to_string(),
            Self::ServerError(code) => t!("errors.provider.server", code = code).to_string(),
            Self::Timeout => t!("errors.provider.timeout").to_string(),
            Self::Decode(msg) => format!("{}: {msg}", t!("errors.provider.decode")),
            Self::Unavailable => t!("errors.provider.unavailable").to_string(),
            Self::Table(e) => e.localized_desc(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Decode(_) | Self::Table(_) => ErrorCategory::Data,
            _ => ErrorCategory::Network,
        }
    }
}

impl TrendErrorTrait for TableError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn localized_desc(&self) -> String {
        format!("{}: {self}", t!("errors.table.invalid"))
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Data
    }
}

impl TrendErrorTrait for AnalysisError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::InvalidWindowSize(size) => {
                t!("errors.analysis.window", size = size).to_string()
            }
            Self::InvalidPolicy(msg) => format!("{}: {msg}", t!("errors.analysis.policy")),
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Analysis
    }
}

/// Unified error type for the edutrend crate
#[derive(Error, Debug)]
pub enum Error {
    /// Trend provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Time series table errors
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Analysis parameter errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl TrendErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Provider(e) => TrendErrorTrait::is_recoverable(e),
            Self::Table(_) | Self::Analysis(_) => false,
            Self::Io(_) => true,
            Self::Csv(_) | Self::Config(_) => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Provider(e) => e.localized_desc(),
            Self::Table(e) => e.localized_desc(),
            Self::Analysis(e) => e.localized_desc(),
            Self::Io(e) => format!("{}: {e}", t!("errors.io.error")),
            Self::Csv(e) => format!("{}: {e}", t!("errors.csv.error")),
            Self::Config(msg) => format!("{}: {msg}", t!("errors.config.error")),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Provider(e) => e.category(),
            Self::Table(_) => ErrorCategory::Data,
            Self::Analysis(_) => ErrorCategory::Analysis,
            Self::Io(_) | Self::Csv(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let err = Error::Provider(ProviderError::Timeout);
        assert_eq!(err.category(), ErrorCategory::Network);

        let err = Error::Provider(ProviderError::Decode("bad".into()));
        assert_eq!(err.category(), ErrorCategory::Data);

        let err = Error::Analysis(AnalysisError::InvalidWindowSize(20));
        assert_eq!(err.category(), ErrorCategory::Analysis);
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::Provider(ProviderError::RateLimited).is_recoverable());
        assert!(Error::Provider(ProviderError::ServerError(503)).is_recoverable());
        assert!(!Error::Provider(ProviderError::Unavailable).is_recoverable());
        assert!(!Error::Table(TableError::DuplicateKeyword("a".into())).is_recoverable());
    }

    #[test]
    fn test_error_conversion() {
        let unified: Error = TableError::DuplicateKeyword("a".into()).into();
        assert!(matches!(unified, Error::Table(_)));

        let unified: Error = AnalysisError::InvalidPolicy("x".into()).into();
        assert!(matches!(unified, Error::Analysis(_)));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("missing base url");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_localized_desc_is_populated() {
        let err = Error::Analysis(AnalysisError::InvalidWindowSize(20));
        assert!(!err.localized_desc().is_empty());
        assert!(!ErrorCategory::Network.localized_desc().is_empty());
    }
}
