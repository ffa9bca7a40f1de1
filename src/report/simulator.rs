//! Topic selection simulator
//!
//! Presents up to five candidate keywords, lets the planner pick at most
//! two, and produces a short judgment report on the picks.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

use super::{format_growth_rate, GrowthClass, TrendLabel};
use crate::analytics::growth::{GrowthMetricsRow, Volatility};
use crate::i18n::{label, normalize_locale, t};

/// Candidates offered per simulation
pub const CANDIDATE_COUNT: usize = 5;

/// Maximum simultaneous selections
pub const MAX_SELECTIONS: usize = 2;

/// Growth above which a pick is flagged as possibly issue-driven
const RAPID_GROWTH: f64 = 50.0;

/// Terms signalling learning intent in a keyword
pub const LEARNING_TERMS: &[&str] = &[
    "교육",
    "강의",
    "입문",
    "기초",
    "자격증",
    "튜토리얼",
    "course",
    "tutorial",
    "certificate",
];

/// Selection errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("'{0}' is not a candidate")]
    UnknownKeyword(String),

    #[error("At most 2 keywords can be selected")]
    LimitReached,
}

/// One candidate card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub keyword: String,
    pub growth_rate: f64,
    pub volatility: Volatility,
    pub trend: TrendLabel,
    pub growth_class: GrowthClass,
}

impl Candidate {
    fn from_row(row: &GrowthMetricsRow) -> Self {
        Self {
            keyword: row.keyword.clone(),
            growth_rate: row.growth_rate,
            volatility: row.volatility,
            trend: TrendLabel::from_growth(row.growth_rate),
            growth_class: GrowthClass::from_growth(row.growth_rate),
        }
    }
}

/// Bucket of the average growth over the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthOutlook {
    High,
    Steady,
    Gradual,
    FlatOrDeclining,
}

impl GrowthOutlook {
    pub fn from_average(average: f64) -> Self {
        if average > 20.0 {
            Self::High
        } else if average > 10.0 {
            Self::Steady
        } else if average > 0.0 {
            Self::Gradual
        } else {
            Self::FlatOrDeclining
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Steady => "steady",
            Self::Gradual => "gradual",
            Self::FlatOrDeclining => "flat_or_declining",
        }
    }
}

/// Risk note attached to a simulation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "keyword", rename_all = "snake_case")]
pub enum RiskNote {
    HighVolatility(String),
    RapidGrowth(String),
    /// No specific risk found
    LowRisk,
}

impl RiskNote {
    pub fn render(&self, locale: &str) -> String {
        let locale = normalize_locale(locale);
        match self {
            Self::HighVolatility(keyword) => {
                t!("simulator.risk.high_volatility", locale = locale, keyword = keyword).to_string()
            }
            Self::RapidGrowth(keyword) => {
                t!("simulator.risk.rapid_growth", locale = locale, keyword = keyword).to_string()
            }
            Self::LowRisk => label("simulator.risk.low_risk", locale),
        }
    }
}

/// Judgment report over the selected candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub selections: Vec<Candidate>,
    pub average_growth: f64,
    pub outlook: GrowthOutlook,
    pub has_learning_intent: bool,
    pub risks: Vec<RiskNote>,
}

impl SimulationReport {
    fn from_selection(selections: Vec<Candidate>) -> Self {
        let average_growth =
            selections.iter().map(|c| c.growth_rate).sum::<f64>() / selections.len() as f64;

        let has_learning_intent = selections.iter().any(|c| {
            let lower = c.keyword.to_lowercase();
            LEARNING_TERMS.iter().any(|term| lower.contains(term))
        });

        let mut risks = Vec::new();
        for candidate in &selections {
            if candidate.volatility == Volatility::High {
                risks.push(RiskNote::HighVolatility(candidate.keyword.clone()));
            }
            if candidate.growth_rate > RAPID_GROWTH {
                risks.push(RiskNote::RapidGrowth(candidate.keyword.clone()));
            }
        }
        if risks.is_empty() {
            risks.push(RiskNote::LowRisk);
        }

        Self {
            average_growth,
            outlook: GrowthOutlook::from_average(average_growth),
            has_learning_intent,
            risks,
            selections,
        }
    }

    /// Plain text rendering
    pub fn render(&self, locale: &str) -> String {
        let locale = normalize_locale(locale);
        let mut lines = vec![label("simulator.selected", locale)];

        for candidate in &self.selections {
            lines.push(format!(
                "- {} ({})",
                candidate.keyword,
                format_growth_rate(candidate.growth_rate)
            ));
        }

        lines.push(String::new());
        lines.push(label("simulator.rationale", locale));
        let average = format!("{:.1}", self.average_growth);
        lines.push(
            t!(
                &format!("simulator.outlook.{}", self.outlook.key()),
                locale = locale,
                average = average
            )
            .to_string(),
        );
        lines.push(if self.has_learning_intent {
            label("simulator.intent.learning", locale)
        } else {
            label("simulator.intent.general", locale)
        });

        lines.push(String::new());
        lines.push(label("simulator.risks", locale));
        for risk in &self.risks {
            lines.push(format!("- {}", risk.render(locale)));
        }

        lines.join("\n")
    }
}

/// Simulation state: candidates plus the current selection
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSimulator {
    candidates: Vec<Candidate>,
    selected: Vec<String>,
}

impl TopicSimulator {
    /// Pick candidates from growth metrics
    ///
    /// Takes the top five by growth. `from_keyword`, when present in the
    /// metrics, is placed first. With more than three candidates the middle
    /// ones are shuffled; first and last stay in place.
    pub fn new<R: Rng + ?Sized>(
        metrics: &[GrowthMetricsRow],
        from_keyword: Option<&str>,
        rng: &mut R,
    ) -> Self {
        let mut sorted: Vec<&GrowthMetricsRow> = metrics.iter().collect();
        sorted.sort_by(|a, b| {
            b.growth_rate
                .partial_cmp(&a.growth_rate)
                .unwrap_or(Ordering::Equal)
        });

        let mut candidates: Vec<Candidate> = Vec::with_capacity(CANDIDATE_COUNT);
        if let Some(row) = from_keyword.and_then(|kw| sorted.iter().find(|m| m.keyword == kw)) {
            candidates.push(Candidate::from_row(row));
        }

        for row in &sorted {
            if candidates.len() >= CANDIDATE_COUNT {
                break;
            }
            if !candidates.iter().any(|c| c.keyword == row.keyword) {
                candidates.push(Candidate::from_row(row));
            }
        }

        if candidates.len() > 3 {
            let last = candidates.len() - 1;
            candidates[1..last].shuffle(rng);
        }

        Self {
            candidates,
            selected: Vec::new(),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Selected keywords in selection order
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, keyword: &str) -> bool {
        self.selected.iter().any(|k| k == keyword)
    }

    /// Select or deselect a candidate; returns whether it is now selected
    pub fn toggle(&mut self, keyword: &str) -> Result<bool, SelectionError> {
        if !self.candidates.iter().any(|c| c.keyword == keyword) {
            return Err(SelectionError::UnknownKeyword(keyword.to_string()));
        }

        if let Some(pos) = self.selected.iter().position(|k| k == keyword) {
            self.selected.remove(pos);
            return Ok(false);
        }

        if self.selected.len() >= MAX_SELECTIONS {
            return Err(SelectionError::LimitReached);
        }

        self.selected.push(keyword.to_string());
        Ok(true)
    }

    /// Report on the current selection; `None` when nothing is selected
    pub fn report(&self) -> Option<SimulationReport> {
        let selections: Vec<Candidate> = self
            .candidates
            .iter()
            .filter(|c| self.is_selected(&c.keyword))
            .cloned()
            .collect();

        if selections.is_empty() {
            None
        } else {
            Some(SimulationReport::from_selection(selections))
        }
    }
}
