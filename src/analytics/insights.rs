//! Strategic insight generation
//!
//! Aggregates growth metrics, cross signals and correlations into a market
//! stage and a trend sustainability class per keyword, then ranks the
//! keywords whose demand looks both growing and durable.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::correlation::KeywordCorrelation;
use super::cross_signal::{CrossSignalRow, SignalPattern};
use super::growth::{is_low_base, Diagnosis, GrowthMetricsRow, Volatility};
use super::{AnalysisError, AnalysisResult};
use crate::i18n::{label, normalize_locale, t};
use crate::report::format_growth_rate;

/// Market lifecycle stage of a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStage {
    Introduction,
    Growth,
    Maturity,
    Decline,
    Transition,
}

impl MarketStage {
    /// Classify a metrics row; the first matching rule wins
    ///
    /// 1. insufficient data: Transition
    /// 2. low base sentinel, or recent interest < 10 with growth > 20: Introduction
    /// 3. growth > 10 without high volatility: Growth
    /// 4. growth < -10: Decline
    /// 5. |growth| <= 10 with recent interest >= 30: Maturity
    /// 6. otherwise: Transition
    pub fn classify(row: &GrowthMetricsRow) -> Self {
        let growth = row.growth_rate;
        let recent = row.recent_interest;

        if row.diagnosis == Diagnosis::InsufficientData {
            Self::Transition
        } else if is_low_base(growth) || (recent < 10.0 && growth > 20.0) {
            Self::Introduction
        } else if growth > 10.0 && row.volatility != Volatility::High {
            Self::Growth
        } else if growth < -10.0 {
            Self::Decline
        } else if growth.abs() <= 10.0 && recent >= 30.0 {
            Self::Maturity
        } else {
            Self::Transition
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Growth => "growth",
            Self::Maturity => "maturity",
            Self::Decline => "decline",
            Self::Transition => "transition",
        }
    }

    pub fn label(&self, locale: &str) -> String {
        label(&format!("stage.{}", self.key()), locale)
    }
}

/// Durability of a keyword's movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sustainability {
    SustainedGrowth,
    GradualGrowth,
    Stable,
    TemporarySpike,
    SpikeThenDecline,
}

impl Sustainability {
    /// Classify a metrics row; the first matching rule wins
    ///
    /// 1. insufficient data: Stable
    /// 2. growth < -5: SpikeThenDecline (interest has fallen from an earlier high)
    /// 3. spike diagnoses: TemporarySpike
    /// 4. sustained rise: SustainedGrowth
    /// 5. gradual rise: GradualGrowth
    /// 6. otherwise: Stable
    pub fn classify(row: &GrowthMetricsRow) -> Self {
        match row.diagnosis {
            Diagnosis::InsufficientData => Self::Stable,
            _ if row.growth_rate < -5.0 => Self::SpikeThenDecline,
            d if d.is_spike() => Self::TemporarySpike,
            Diagnosis::SustainedRise => Self::SustainedGrowth,
            Diagnosis::GradualRise => Self::GradualGrowth,
            _ => Self::Stable,
        }
    }

    /// Growth that is expected to last
    pub fn is_growing(&self) -> bool {
        matches!(self, Self::SustainedGrowth | Self::GradualGrowth)
    }

    /// Not driven by a short-lived event
    pub fn is_sustainable(&self) -> bool {
        matches!(
            self,
            Self::SustainedGrowth | Self::GradualGrowth | Self::Stable
        )
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::SustainedGrowth => "sustained_growth",
            Self::GradualGrowth => "gradual_growth",
            Self::Stable => "stable",
            Self::TemporarySpike => "temporary_spike",
            Self::SpikeThenDecline => "spike_then_decline",
        }
    }

    pub fn label(&self, locale: &str) -> String {
        label(&format!("sustainability.{}", self.key()), locale)
    }
}

/// Weights used to turn correlation and growth into a 0-100 confidence
///
/// The default (60% correlation, 40% growth clamped to [-50, 100]) is one
/// heuristic choice; callers may supply another weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    pub correlation_weight: f64,
    pub growth_weight: f64,
    pub growth_floor: f64,
    pub growth_ceiling: f64,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            correlation_weight: 0.6,
            growth_weight: 0.4,
            growth_floor: -50.0,
            growth_ceiling: 100.0,
        }
    }
}

impl ConfidencePolicy {
    /// Check weights and growth bounds
    pub fn validate(&self) -> AnalysisResult<()> {
        let weights = [self.correlation_weight, self.growth_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AnalysisError::InvalidPolicy(
                "weights must be non-negative".to_string(),
            ));
        }
        if (weights.iter().sum::<f64>() - 1.0).abs() > 1e-6 {
            return Err(AnalysisError::InvalidPolicy(
                "weights must sum to 1".to_string(),
            ));
        }
        if self.growth_floor >= self.growth_ceiling {
            return Err(AnalysisError::InvalidPolicy(
                "growth floor must be below the ceiling".to_string(),
            ));
        }
        Ok(())
    }

    /// Confidence score in `[0, 100]`
    ///
    /// Negative or missing correlation contributes nothing.
    pub fn score(&self, correlation: Option<f64>, growth: f64) -> f64 {
        let corr_part = correlation.unwrap_or(0.0).clamp(0.0, 1.0);
        let span = self.growth_ceiling - self.growth_floor;
        let growth_part = (growth.clamp(self.growth_floor, self.growth_ceiling)
            - self.growth_floor)
            / span;

        let score = 100.0 * (self.correlation_weight * corr_part + self.growth_weight * growth_part);
        score.clamp(0.0, 100.0)
    }
}

/// Per-keyword strategic classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordInsight {
    pub keyword: String,
    pub stage: MarketStage,
    pub sustainability: Sustainability,
    pub correlation: Option<f64>,
    pub signal: Option<SignalPattern>,
}

/// Keyword recommended for planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityKeyword {
    pub keyword: String,
    /// 0-100
    pub confidence: f64,
    pub growth_rate: f64,
    pub correlation: Option<f64>,
    pub sustainability: Sustainability,
    pub signal: Option<SignalPattern>,
}

impl PriorityKeyword {
    /// Short textual reason for the ranking
    pub fn reason(&self, locale: &str) -> String {
        let locale = normalize_locale(locale);
        let correlation = self
            .correlation
            .map(|c| format!("{c:.2}"))
            .unwrap_or_else(|| "N/A".to_string());
        let signal = self
            .signal
            .map(|s| s.label(locale))
            .unwrap_or_else(|| "-".to_string());

        t!(
            "insights.priority_reason",
            locale = locale,
            trend = self.sustainability.label(locale),
            growth = format_growth_rate(self.growth_rate),
            correlation = correlation,
            signal = signal
        )
        .to_string()
    }
}

/// Aggregate counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InsightSummary {
    pub total_keywords: usize,
    pub growth_stage_count: usize,
    pub sustainable_count: usize,
    pub priority_count: usize,
}

/// Strategic view over all keywords
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategicInsights {
    pub summary: InsightSummary,
    /// Sorted by confidence, highest first
    pub priorities: Vec<PriorityKeyword>,
    /// In metrics order
    pub keywords: Vec<KeywordInsight>,
}

impl StrategicInsights {
    pub fn keyword(&self, keyword: &str) -> Option<&KeywordInsight> {
        self.keywords.iter().find(|k| k.keyword == keyword)
    }
}

/// Build strategic insights from the three analytics outputs
///
/// Priority keywords are those in the growth stage whose sustainability
/// class indicates lasting growth.
pub fn generate_insights(
    metrics: &[GrowthMetricsRow],
    cross_signals: &[CrossSignalRow],
    correlations: &[KeywordCorrelation],
    policy: &ConfidencePolicy,
) -> StrategicInsights {
    let mut keywords = Vec::with_capacity(metrics.len());
    let mut priorities = Vec::new();
    let mut summary = InsightSummary {
        total_keywords: metrics.len(),
        ..Default::default()
    };

    for row in metrics {
        let stage = MarketStage::classify(row);
        let sustainability = Sustainability::classify(row);
        let correlation = correlations
            .iter()
            .find(|c| c.keyword == row.keyword)
            .and_then(|c| c.coefficient);
        let signal = cross_signals
            .iter()
            .find(|s| s.keyword == row.keyword)
            .map(|s| s.pattern);

        if stage == MarketStage::Growth {
            summary.growth_stage_count += 1;
        }
        if sustainability.is_sustainable() {
            summary.sustainable_count += 1;
        }

        if stage == MarketStage::Growth && sustainability.is_growing() {
            priorities.push(PriorityKeyword {
                keyword: row.keyword.clone(),
                confidence: policy.score(correlation, row.growth_rate),
                growth_rate: row.growth_rate,
                correlation,
                sustainability,
                signal,
            });
        }

        keywords.push(KeywordInsight {
            keyword: row.keyword.clone(),
            stage,
            sustainability,
            correlation,
            signal,
        });
    }

    priorities.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    summary.priority_count = priorities.len();

    tracing::debug!(
        total = summary.total_keywords,
        growth_stage = summary.growth_stage_count,
        priorities = summary.priority_count,
        "Generated strategic insights"
    );

    StrategicInsights {
        summary,
        priorities,
        keywords,
    }
}
