//! Analytics over keyword interest series
//!
//! - [`growth`]: window growth, volatility, diagnosis and recommended action
//! - [`cross_signal`]: joint web/video pattern classification
//! - [`correlation`]: Pearson correlation, normalization and smoothing
//! - [`insights`]: market stage, sustainability and priority ranking

pub mod correlation;
pub mod cross_signal;
pub mod growth;
pub mod insights;

use thiserror::Error;

pub use correlation::{
    correlate_sources, min_max_normalize, moving_average, normalize_table, pearson,
    KeywordCorrelation,
};
pub use cross_signal::{analyze_cross_signals, CrossSignalRow, SignalPattern, SignalStrength};
pub use growth::{
    calculate_growth_metrics, Action, Diagnosis, GrowthMetricsRow, PlanningInsight, SeriesStats,
    Volatility, LOW_BASE_SENTINEL,
};
pub use insights::{
    generate_insights, ConfidencePolicy, InsightSummary, KeywordInsight, MarketStage,
    PriorityKeyword, StrategicInsights, Sustainability,
};

/// Analysis errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Invalid smoothing window size: {0} (allowed 3..=14)")]
    InvalidWindowSize(usize),

    #[error("Invalid confidence policy: {0}")]
    InvalidPolicy(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
