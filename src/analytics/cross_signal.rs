//! Cross-source signal classification
//!
//! Combines web search growth with video search growth for the same keyword
//! and names the joint pattern. The purpose is corroboration across
//! platforms, not prediction.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::growth::{GrowthMetricsRow, Volatility, WindowGrowth, MIN_SPLIT_ROWS};
use crate::i18n::label;
use crate::models::TimeSeriesTable;

/// Joint web/video pattern, in classification priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalPattern {
    /// Web steady, video surging
    VideoConversion,
    /// Both rising
    CombinedRise,
    /// Web rising, video not following yet
    InformationSeeking,
    /// Web falling, video rising
    ChannelShift,
    /// Both falling
    InterestDecline,
    /// Both roughly unchanged
    Stable,
    /// None of the above
    Mixed,
}

/// Signal strength bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStrength {
    Low,
    Medium,
    High,
}

impl SignalStrength {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self, locale: &str) -> String {
        label(&format!("strength.{}", self.key()), locale)
    }
}

impl SignalPattern {
    /// Classify a (web, video) growth pair; the first matching rule wins
    pub fn classify(web_growth: f64, video_growth: f64) -> Self {
        if web_growth.abs() < 15.0 && video_growth > 30.0 {
            Self::VideoConversion
        } else if web_growth > 10.0 && video_growth > 10.0 {
            Self::CombinedRise
        } else if web_growth > 15.0 && video_growth < 5.0 {
            Self::InformationSeeking
        } else if web_growth < -5.0 && video_growth > 10.0 {
            Self::ChannelShift
        } else if web_growth < -5.0 && video_growth < -5.0 {
            Self::InterestDecline
        } else if web_growth.abs() < 10.0 && video_growth.abs() < 10.0 {
            Self::Stable
        } else {
            Self::Mixed
        }
    }

    /// Fixed strength attached to each pattern
    pub fn strength(&self) -> SignalStrength {
        match self {
            Self::VideoConversion | Self::CombinedRise => SignalStrength::High,
            Self::InformationSeeking | Self::ChannelShift | Self::Stable => SignalStrength::Medium,
            Self::InterestDecline | Self::Mixed => SignalStrength::Low,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::VideoConversion => "video_conversion",
            Self::CombinedRise => "combined_rise",
            Self::InformationSeeking => "information_seeking",
            Self::ChannelShift => "channel_shift",
            Self::InterestDecline => "interest_decline",
            Self::Stable => "stable",
            Self::Mixed => "mixed",
        }
    }

    pub fn label(&self, locale: &str) -> String {
        label(&format!("signal.{}", self.key()), locale)
    }

    /// Fixed interpretation text for the pattern
    pub fn interpretation(&self, locale: &str) -> String {
        label(&format!("signal_interpretation.{}", self.key()), locale)
    }
}

/// Cross-source analysis for one keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSignalRow {
    pub keyword: String,
    pub web_growth: f64,
    pub video_growth: f64,
    pub web_interest: f64,
    pub video_interest: f64,
    pub web_volatility: Volatility,
    pub pattern: SignalPattern,
    pub strength: SignalStrength,
    /// Video figures were synthesized from web figures
    pub approximated: bool,
}

/// Video-side growth for one keyword, synthesized when data is missing
///
/// A missing column or fewer than [`MIN_SPLIT_ROWS`] rows falls back to
/// `web_growth * U(0.5, 1.5)` and `web_recent * U(0.3, 1.2)`.
fn video_growth<R: Rng + ?Sized>(
    video: &TimeSeriesTable,
    metrics: &GrowthMetricsRow,
    rng: &mut R,
) -> (f64, f64, bool) {
    match video.series(&metrics.keyword) {
        Some(series) if video.len() >= MIN_SPLIT_ROWS => {
            let window = WindowGrowth::compute(series);
            (window.growth_rate, window.recent_mean, false)
        }
        _ => {
            let growth = metrics.growth_rate * rng.gen_range(0.5..1.5);
            let recent = metrics.recent_interest * rng.gen_range(0.3..1.2);
            (growth, recent, true)
        }
    }
}

/// Classify web metrics against the video table for each keyword
///
/// Keywords without a web metrics row are skipped. The result follows the
/// order of `keywords`.
pub fn analyze_cross_signals<R: Rng + ?Sized>(
    web_metrics: &[GrowthMetricsRow],
    video: &TimeSeriesTable,
    keywords: &[String],
    rng: &mut R,
) -> Vec<CrossSignalRow> {
    let mut rows = Vec::with_capacity(keywords.len());
    let mut approximated_count = 0usize;

    for keyword in keywords {
        let Some(metrics) = web_metrics.iter().find(|m| &m.keyword == keyword) else {
            continue;
        };

        let (video_growth, video_interest, approximated) = video_growth(video, metrics, rng);
        if approximated {
            approximated_count += 1;
        }

        let pattern = SignalPattern::classify(metrics.growth_rate, video_growth);

        rows.push(CrossSignalRow {
            keyword: keyword.clone(),
            web_growth: metrics.growth_rate,
            video_growth,
            web_interest: metrics.recent_interest,
            video_interest,
            web_volatility: metrics.volatility,
            pattern,
            strength: pattern.strength(),
            approximated,
        });
    }

    if approximated_count > 0 {
        tracing::debug!(
            approximated = approximated_count,
            total = rows.len(),
            "Video growth approximated from web metrics"
        );
    }

    rows
}
