//! edutrend - Search and video trend analytics for course planning
//!
//! Collects relative search interest for education keywords from web search
//! and video search, derives growth metrics, compares the two channels and
//! turns the result into planning recommendations.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`provider`] - Trend data providers, chunked fetching and concurrency
//! - [`mock`] - Deterministic mock series used when a source is unavailable
//! - [`models`] - Core data structures and types
//! - [`analytics`] - Growth metrics, cross signals, correlation and insights
//! - [`pipeline`] - Load-all orchestration with snapshot caching
//! - [`report`] - Summary report and topic simulator
//! - [`export`] - CSV export of metrics and raw series
//! - [`i18n`] - English and Korean display labels
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use edutrend::config::Config;
//! use edutrend::models::Timeframe;
//! use edutrend::pipeline::TrendPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = TrendPipeline::from_config(&config)?;
//!     let snapshot = pipeline.load_all(Timeframe::ThreeMonths).await;
//!     println!("{} keywords analyzed", snapshot.metrics.len());
//!     Ok(())
//! }
//! ```

// Initialize rust-i18n at crate root level
rust_i18n::i18n!("locales", fallback = "en");

pub mod analytics;
pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod i18n;
pub mod keywords;
pub mod mock;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{
        CrossSignalRow, GrowthMetricsRow, KeywordCorrelation, SignalPattern, StrategicInsights,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result, TrendErrorTrait};
    pub use crate::models::{Source, TimeSeriesTable, Timeframe};
    pub use crate::pipeline::{AnalysisSnapshot, TrendPipeline};
    pub use crate::provider::{TrendProvider, TrendRequest};
}

// Direct re-exports for convenience
pub use models::{Source, TimeSeriesTable, Timeframe};
