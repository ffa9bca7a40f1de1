//! Growth metrics and diagnosis labeling
//!
//! This module turns one source's time series into per-keyword metrics:
//! - Growth rate between an early and a recent window
//! - Volatility bucket from the coefficient of variation
//! - Spike and short-term rise detection
//! - Diagnosis, recommended action and planning annotations

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::i18n::label;
use crate::keywords::Category;
use crate::models::TimeSeriesTable;

/// Growth value meaning "base too small, percentage undefined"
pub const LOW_BASE_SENTINEL: f64 = 999.0;

/// Share of rows in the early and in the recent window
pub const WINDOW_FRACTION: f64 = 0.3;

/// Below this many rows both windows cover the whole series
pub const MIN_SPLIT_ROWS: usize = 10;

/// Samples in each short-term comparison window (four weeks of daily data)
pub const SHORT_TERM_WINDOW: usize = 28;

const LOW_BASE_EARLY_MEAN: f64 = 1.0;
const LOW_BASE_RECENT_MEAN: f64 = 5.0;
const INSUFFICIENT_ZERO_RATIO: f64 = 0.3;
const REFRESH_RECENT_INTEREST: f64 = 40.0;

/// True when a growth value carries the low base sentinel
pub fn is_low_base(growth: f64) -> bool {
    growth >= LOW_BASE_SENTINEL
}

/// Mean that treats an empty slice as 0.0
pub(crate) fn mean_or_zero(values: &[f64]) -> f64 {
    let mean: f64 = values.mean();
    if mean.is_nan() {
        0.0
    } else {
        mean
    }
}

/// Sample standard deviation that treats fewer than two samples as 0.0
pub(crate) fn std_dev_or_zero(values: &[f64]) -> f64 {
    let std_dev: f64 = values.std_dev();
    if std_dev.is_nan() {
        0.0
    } else {
        std_dev
    }
}

/// Percentage change from `early_mean` to `recent_mean`
///
/// A base below 1.0 yields the sentinel when the recent mean exceeds 5.0
/// and 0.0 otherwise.
pub fn growth_rate(early_mean: f64, recent_mean: f64) -> f64 {
    if early_mean < LOW_BASE_EARLY_MEAN {
        if recent_mean > LOW_BASE_RECENT_MEAN {
            LOW_BASE_SENTINEL
        } else {
            0.0
        }
    } else {
        (recent_mean - early_mean) / early_mean * 100.0
    }
}

/// Early/recent window means and the growth rate between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGrowth {
    pub early_mean: f64,
    pub recent_mean: f64,
    pub growth_rate: f64,
}

impl WindowGrowth {
    /// Split `series` into its first and last 30% and compare the means
    ///
    /// Series shorter than [`MIN_SPLIT_ROWS`] use the whole series for both
    /// windows.
    pub fn compute(series: &[f64]) -> Self {
        let n = series.len();
        let (early, recent) = if n < MIN_SPLIT_ROWS {
            (series, series)
        } else {
            let split = (n as f64 * WINDOW_FRACTION) as usize;
            (&series[..split], &series[n - split..])
        };

        let early_mean = mean_or_zero(early);
        let recent_mean = mean_or_zero(recent);

        Self {
            early_mean,
            recent_mean,
            growth_rate: growth_rate(early_mean, recent_mean),
        }
    }
}

/// Volatility bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

impl Volatility {
    /// Bucket a coefficient of variation
    ///
    /// - `cv > 0.5`: High
    /// - `0.2 < cv <= 0.5`: Medium
    /// - otherwise: Low
    pub fn from_cv(cv: f64) -> Self {
        if cv > 0.5 {
            Self::High
        } else if cv > 0.2 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self, locale: &str) -> String {
        label(&format!("volatility.{}", self.key()), locale)
    }
}

/// Summary statistics of one keyword series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub early_mean: f64,
    pub recent_mean: f64,
    pub total_mean: f64,
    pub std_dev: f64,
    pub max_value: f64,
    pub growth_rate: f64,
    pub zero_ratio: f64,
    pub cv: f64,
    pub volatility: Volatility,
    pub is_spike: bool,
    pub is_rising_short_term: bool,
}

impl SeriesStats {
    /// Compute all diagnostics for one series
    pub fn compute(series: &[f64]) -> Self {
        let n = series.len();
        let window = WindowGrowth::compute(series);

        let total_mean = mean_or_zero(series);
        let std_dev = std_dev_or_zero(series);
        let max_value = series.iter().copied().fold(0.0, f64::max);

        let zero_ratio = if n == 0 {
            0.0
        } else {
            series.iter().filter(|&&v| v == 0.0).count() as f64 / n as f64
        };

        let cv = if total_mean > 0.0 {
            std_dev / total_mean
        } else {
            0.0
        };
        let volatility = Volatility::from_cv(cv);

        let is_spike = max_value > total_mean + 2.0 * std_dev
            || max_value > 2.5 * window.recent_mean;

        // Last four weeks against the four weeks before them
        let last_start = n.saturating_sub(SHORT_TERM_WINDOW);
        let prev_start = n.saturating_sub(2 * SHORT_TERM_WINDOW);
        let recent_short = mean_or_zero(&series[last_start..]);
        let prev_short = if prev_start < last_start {
            mean_or_zero(&series[prev_start..last_start])
        } else {
            window.early_mean
        };
        let is_rising_short_term = recent_short > prev_short * 1.1;

        Self {
            early_mean: window.early_mean,
            recent_mean: window.recent_mean,
            total_mean,
            std_dev,
            max_value,
            growth_rate: window.growth_rate,
            zero_ratio,
            cv,
            volatility,
            is_spike,
            is_rising_short_term,
        }
    }

    /// More than 30% of samples are zero
    pub fn is_insufficient(&self) -> bool {
        self.zero_ratio > INSUFFICIENT_ZERO_RATIO
    }
}

/// Trend diagnosis, in classification priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    InsufficientData,
    LowBaseSpike,
    TemporarySpike,
    SustainedRise,
    Declining,
    GradualRise,
    Flat,
}

impl Diagnosis {
    /// Classify series statistics; the first matching rule wins
    pub fn classify(stats: &SeriesStats) -> Self {
        let growth = stats.growth_rate;

        if stats.is_insufficient() {
            Self::InsufficientData
        } else if stats.early_mean < 5.0 && growth > 100.0 {
            Self::LowBaseSpike
        } else if stats.is_spike && stats.volatility == Volatility::High {
            Self::TemporarySpike
        } else if growth > 10.0
            && stats.is_rising_short_term
            && stats.volatility != Volatility::High
        {
            Self::SustainedRise
        } else if growth < -5.0 {
            Self::Declining
        } else if growth > 0.0 {
            Self::GradualRise
        } else {
            Self::Flat
        }
    }

    /// Spike-type diagnoses
    pub fn is_spike(&self) -> bool {
        matches!(self, Self::LowBaseSpike | Self::TemporarySpike)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::InsufficientData => "insufficient_data",
            Self::LowBaseSpike => "low_base_spike",
            Self::TemporarySpike => "temporary_spike",
            Self::SustainedRise => "sustained_rise",
            Self::Declining => "declining",
            Self::GradualRise => "gradual_rise",
            Self::Flat => "flat",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::InsufficientData => "⛔",
            Self::LowBaseSpike | Self::TemporarySpike => "⚠️",
            Self::SustainedRise => "✅",
            Self::Declining => "📉",
            Self::GradualRise => "📈",
            Self::Flat => "➖",
        }
    }

    pub fn label(&self, locale: &str) -> String {
        label(&format!("diagnosis.{}", self.key()), locale)
    }

    /// Why this diagnosis was chosen
    pub fn rationale(&self, locale: &str) -> String {
        label(&format!("diagnosis_reason.{}", self.key()), locale)
    }

    /// Short caution tag shown next to the diagnosis
    pub fn caution(&self, locale: &str) -> String {
        label(&format!("caution.{}", self.key()), locale)
    }
}

/// Recommended planning action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    NewCourse,
    Refresh,
    Hold,
    ShortTermTest,
    Exclude,
    InsufficientData,
}

impl Action {
    /// Derive the action from a diagnosis and its statistics
    pub fn recommend(diagnosis: Diagnosis, stats: &SeriesStats) -> Self {
        let by_interest = || {
            if stats.recent_mean > REFRESH_RECENT_INTEREST {
                Self::Refresh
            } else {
                Self::Hold
            }
        };

        match diagnosis {
            Diagnosis::SustainedRise => Self::NewCourse,
            Diagnosis::Flat => by_interest(),
            d if d.is_spike() || stats.volatility == Volatility::High => Self::ShortTermTest,
            Diagnosis::Declining => Self::Exclude,
            Diagnosis::InsufficientData => Self::InsufficientData,
            _ => by_interest(),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::NewCourse => "new_course",
            Self::Refresh => "refresh",
            Self::Hold => "hold",
            Self::ShortTermTest => "short_term_test",
            Self::Exclude => "exclude",
            Self::InsufficientData => "insufficient_data",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::NewCourse => "🚀",
            Self::Refresh => "🔄",
            Self::Hold => "➖",
            Self::ShortTermTest => "🧪",
            Self::Exclude | Self::InsufficientData => "⛔",
        }
    }

    pub fn label(&self, locale: &str) -> String {
        label(&format!("action.{}", self.key()), locale)
    }

    /// Planning risk note that accompanies the action
    pub fn risk_note(&self, locale: &str) -> String {
        label(&format!("risk.{}", self.key()), locale)
    }
}

/// Intended learner group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Beginner,
    Practitioner,
    JobSeeker,
}

/// Content format suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    TrendReport,
    Curriculum,
}

const BEGINNER_MARKERS: &[&str] = &["기초", "입문", "basic", "intro", "beginner"];
const CERTIFICATE_MARKERS: &[&str] = &["자격증", "certificate", "certification"];

/// Free-text planning annotations for a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningInsight {
    pub audience: Audience,
    pub positioning: Positioning,
}

impl PlanningInsight {
    pub fn derive(keyword: &str, volatility: Volatility) -> Self {
        let k = keyword.to_lowercase();
        let has_marker = |markers: &[&str]| markers.iter().any(|m| k.contains(m));

        let audience = if has_marker(CERTIFICATE_MARKERS) {
            Audience::JobSeeker
        } else if has_marker(BEGINNER_MARKERS) {
            Audience::Beginner
        } else {
            Audience::Practitioner
        };

        let positioning = if volatility == Volatility::High {
            Positioning::TrendReport
        } else {
            Positioning::Curriculum
        };

        Self {
            audience,
            positioning,
        }
    }

    pub fn audience_label(&self, locale: &str) -> String {
        let key = match self.audience {
            Audience::Beginner => "audience.beginner",
            Audience::Practitioner => "audience.practitioner",
            Audience::JobSeeker => "audience.job_seeker",
        };
        label(key, locale)
    }

    pub fn positioning_label(&self, locale: &str) -> String {
        let key = match self.positioning {
            Positioning::TrendReport => "positioning.trend_report",
            Positioning::Curriculum => "positioning.curriculum",
        };
        label(key, locale)
    }
}

/// Growth metrics for one keyword of one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetricsRow {
    pub keyword: String,
    /// Percentage change, or [`LOW_BASE_SENTINEL`]
    pub growth_rate: f64,
    /// Mean of the recent window
    pub recent_interest: f64,
    pub diagnosis: Diagnosis,
    pub volatility: Volatility,
    pub action: Action,
    pub category: Category,
    pub planning: PlanningInsight,
    pub stats: SeriesStats,
}

impl GrowthMetricsRow {
    /// Analyze a single keyword series
    pub fn from_series(keyword: &str, series: &[f64]) -> Self {
        let stats = SeriesStats::compute(series);
        let diagnosis = Diagnosis::classify(&stats);
        let action = Action::recommend(diagnosis, &stats);

        tracing::trace!(
            keyword = %keyword,
            growth = stats.growth_rate,
            diagnosis = diagnosis.key(),
            action = action.key(),
            "Computed growth metrics"
        );

        Self {
            keyword: keyword.to_string(),
            growth_rate: stats.growth_rate,
            recent_interest: stats.recent_mean,
            diagnosis,
            volatility: stats.volatility,
            action,
            category: Category::of(keyword),
            planning: PlanningInsight::derive(keyword, stats.volatility),
            stats,
        }
    }

    pub fn is_low_base(&self) -> bool {
        is_low_base(self.growth_rate)
    }
}

/// Compute growth metrics for every keyword column of `table`
///
/// An empty table yields an empty result.
pub fn calculate_growth_metrics(table: &TimeSeriesTable) -> Vec<GrowthMetricsRow> {
    if table.is_empty() {
        return Vec::new();
    }

    let rows: Vec<_> = table
        .columns()
        .iter()
        .map(|column| GrowthMetricsRow::from_series(&column.keyword, &column.values))
        .collect();

    tracing::debug!(
        keywords = rows.len(),
        samples = table.len(),
        "Calculated growth metrics"
    );

    rows
}
