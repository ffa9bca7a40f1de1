//! Presentation helpers and the summary report
//!
//! - Growth rate formatting (low base sentinel renders as `N/A`)
//! - Trend labels and growth classes for display
//! - Report summary: planning candidates, top growth, strong cross signals
//! - Data limitation notices shown next to every result
//!
//! Everything here reads analytics output; nothing feeds back into it.

pub mod simulator;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::analytics::cross_signal::{CrossSignalRow, SignalStrength};
use crate::analytics::growth::{is_low_base, Action, GrowthMetricsRow};
use crate::i18n::{label, t};
use crate::pipeline::AnalysisSnapshot;

/// Keywords listed per planning bucket
const REPORT_LIST_LIMIT: usize = 5;

/// Rows in the top growth list
const TOP_GROWTH_LIMIT: usize = 5;

/// Strong cross signals shown in the report
const HIGH_SIGNAL_LIMIT: usize = 3;

/// Format a growth rate for display
///
/// The low base sentinel becomes `N/A`; other values get a sign prefix
/// when positive and one decimal place.
pub fn format_growth_rate(growth: f64) -> String {
    if is_low_base(growth) {
        return "N/A".to_string();
    }
    let sign = if growth > 0.0 { "+" } else { "" };
    format!("{sign}{growth:.1}%")
}

/// Verbal trend label for a growth rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Surging,
    Rising,
    GradualRise,
    Flat,
    Falling,
}

impl TrendLabel {
    pub fn from_growth(growth: f64) -> Self {
        if growth > 20.0 {
            Self::Surging
        } else if growth > 10.0 {
            Self::Rising
        } else if growth > 0.0 {
            Self::GradualRise
        } else if growth > -5.0 {
            Self::Flat
        } else {
            Self::Falling
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Surging => "surging",
            Self::Rising => "rising",
            Self::GradualRise => "gradual_rise",
            Self::Flat => "flat",
            Self::Falling => "falling",
        }
    }

    pub fn label(&self, locale: &str) -> String {
        label(&format!("trend_label.{}", self.key()), locale)
    }
}

/// Coarse direction used for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthClass {
    Up,
    Down,
    Flat,
}

impl GrowthClass {
    pub fn from_growth(growth: f64) -> Self {
        if growth > 10.0 {
            Self::Up
        } else if growth < -5.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        }
    }
}

/// Data limitation notices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLimitations {
    pub main_notice: String,
    /// (title, description)
    pub items: Vec<(String, String)>,
    pub cross_signal_purpose: String,
}

const LIMITATION_KEYS: &[&str] = &["relative_index", "learning_intent", "sustainability"];

/// Limitation notices in the given locale
pub fn data_limitations(locale: &str) -> DataLimitations {
    let items = LIMITATION_KEYS
        .iter()
        .map(|key| {
            (
                label(&format!("limitations.{key}.title"), locale),
                label(&format!("limitations.{key}.desc"), locale),
            )
        })
        .collect();

    DataLimitations {
        main_notice: label("limitations.main_notice", locale),
        items,
        cross_signal_purpose: label("limitations.cross_signal_purpose", locale),
    }
}

/// Notice naming the sources that are showing generated data
pub fn demo_mode_notice(web_is_mock: bool, video_is_mock: bool, locale: &str) -> Option<String> {
    let sources = match (web_is_mock, video_is_mock) {
        (false, false) => return None,
        (true, true) => label("demo.sources.both", locale),
        (true, false) => label("demo.sources.web", locale),
        (false, true) => label("demo.sources.video", locale),
    };
    Some(t!("demo.notice", locale = crate::i18n::normalize_locale(locale), sources = sources).to_string())
}

/// One line of the top growth list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGrowthEntry {
    pub keyword: String,
    pub growth_rate: f64,
    pub action: Action,
}

/// Summary report over one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub new_course: Vec<String>,
    pub short_term_test: Vec<String>,
    pub top_growth: Vec<TopGrowthEntry>,
    pub high_signals: Vec<CrossSignalRow>,
    pub web_is_mock: bool,
    pub video_is_mock: bool,
}

impl TrendReport {
    pub fn build(metrics: &[GrowthMetricsRow], cross_signals: &[CrossSignalRow]) -> Self {
        let keywords_with = |action: Action| -> Vec<String> {
            metrics
                .iter()
                .filter(|m| m.action == action)
                .take(REPORT_LIST_LIMIT)
                .map(|m| m.keyword.clone())
                .collect()
        };

        let mut by_growth: Vec<&GrowthMetricsRow> = metrics.iter().collect();
        by_growth.sort_by(|a, b| {
            b.growth_rate
                .partial_cmp(&a.growth_rate)
                .unwrap_or(Ordering::Equal)
        });

        let top_growth = by_growth
            .into_iter()
            .take(TOP_GROWTH_LIMIT)
            .map(|m| TopGrowthEntry {
                keyword: m.keyword.clone(),
                growth_rate: m.growth_rate,
                action: m.action,
            })
            .collect();

        let high_signals = cross_signals
            .iter()
            .filter(|s| s.strength == SignalStrength::High)
            .take(HIGH_SIGNAL_LIMIT)
            .cloned()
            .collect();

        Self {
            new_course: keywords_with(Action::NewCourse),
            short_term_test: keywords_with(Action::ShortTermTest),
            top_growth,
            high_signals,
            web_is_mock: false,
            video_is_mock: false,
        }
    }

    pub fn from_snapshot(snapshot: &AnalysisSnapshot) -> Self {
        Self {
            web_is_mock: snapshot.web_is_mock,
            video_is_mock: snapshot.video_is_mock,
            ..Self::build(&snapshot.metrics, &snapshot.cross_signals)
        }
    }

    /// Plain text rendering
    pub fn render(&self, locale: &str) -> String {
        let none = label("report.none", locale);
        let join_or_none = |items: &[String]| {
            if items.is_empty() {
                none.clone()
            } else {
                items.join(", ")
            }
        };

        let mut lines = Vec::new();

        if let Some(notice) = demo_mode_notice(self.web_is_mock, self.video_is_mock, locale) {
            lines.push(notice);
            lines.push(String::new());
        }

        lines.push(format!(
            "{}: {}",
            label("report.new_course", locale),
            join_or_none(&self.new_course)
        ));
        lines.push(format!(
            "{}: {}",
            label("report.short_term_test", locale),
            join_or_none(&self.short_term_test)
        ));

        lines.push(String::new());
        lines.push(label("report.top_growth", locale));
        for (rank, entry) in self.top_growth.iter().enumerate() {
            lines.push(format!(
                "{}. {} · {} · {} {}",
                rank + 1,
                entry.keyword,
                format_growth_rate(entry.growth_rate),
                entry.action.icon(),
                entry.action.label(locale)
            ));
        }

        lines.push(String::new());
        lines.push(label("report.cross_signals", locale));
        if self.high_signals.is_empty() {
            lines.push(label("report.no_high_signals", locale));
        }
        for signal in &self.high_signals {
            lines.push(format!(
                "- {}: {} · web {} / video {}",
                signal.keyword,
                signal.pattern.label(locale),
                format_growth_rate(signal.web_growth),
                format_growth_rate(signal.video_growth)
            ));
        }

        let limitations = data_limitations(locale);
        lines.push(String::new());
        lines.push(limitations.main_notice);
        for (title, desc) in limitations.items {
            lines.push(format!("- {title}: {desc}"));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::cross_signal::SignalPattern;
    use crate::analytics::growth::Volatility;

    #[test]
    fn test_format_growth_rate() {
        assert_eq!(format_growth_rate(25.0), "+25.0%");
        assert_eq!(format_growth_rate(-3.24), "-3.2%");
        assert_eq!(format_growth_rate(0.0), "0.0%");
        assert_eq!(format_growth_rate(999.0), "N/A");
        assert_eq!(format_growth_rate(1500.0), "N/A");
    }

    #[test]
    fn test_trend_label_thresholds() {
        assert_eq!(TrendLabel::from_growth(25.0), TrendLabel::Surging);
        assert_eq!(TrendLabel::from_growth(20.0), TrendLabel::Rising);
        assert_eq!(TrendLabel::from_growth(10.0), TrendLabel::GradualRise);
        assert_eq!(TrendLabel::from_growth(0.0), TrendLabel::Flat);
        assert_eq!(TrendLabel::from_growth(-5.0), TrendLabel::Falling);
    }

    #[test]
    fn test_growth_class_thresholds() {
        assert_eq!(GrowthClass::from_growth(10.5), GrowthClass::Up);
        assert_eq!(GrowthClass::from_growth(10.0), GrowthClass::Flat);
        assert_eq!(GrowthClass::from_growth(-5.0), GrowthClass::Flat);
        assert_eq!(GrowthClass::from_growth(-5.1), GrowthClass::Down);
    }

    #[test]
    fn test_demo_mode_notice() {
        assert!(demo_mode_notice(false, false, "en").is_none());
        assert!(demo_mode_notice(true, false, "en").is_some());
        assert!(demo_mode_notice(true, true, "ko").is_some());
    }

    #[test]
    fn test_limitations_have_three_items() {
        let limitations = data_limitations("ko");
        assert_eq!(limitations.items.len(), 3);
        assert!(!limitations.main_notice.is_empty());
    }

    fn signal(keyword: &str, pattern: SignalPattern) -> CrossSignalRow {
        CrossSignalRow {
            keyword: keyword.to_string(),
            web_growth: 20.0,
            video_growth: 20.0,
            web_interest: 30.0,
            video_interest: 20.0,
            web_volatility: Volatility::Low,
            pattern,
            strength: pattern.strength(),
            approximated: false,
        }
    }

    #[test]
    fn test_build_report_lists() {
        let mut rising = vec![20.0; 90];
        rising[27..63].fill(22.0);
        rising[63..].fill(25.0);
        let metrics = vec![
            GrowthMetricsRow::from_series("flat", &[30.0; 90]),
            GrowthMetricsRow::from_series("rising", &rising),
        ];
        let signals = vec![
            signal("a", SignalPattern::CombinedRise),
            signal("b", SignalPattern::Stable),
            signal("c", SignalPattern::VideoConversion),
            signal("d", SignalPattern::CombinedRise),
            signal("e", SignalPattern::CombinedRise),
        ];

        let report = TrendReport::build(&metrics, &signals);
        assert_eq!(report.new_course, vec!["rising"]);
        assert!(report.short_term_test.is_empty());
        assert_eq!(report.top_growth[0].keyword, "rising");
        assert_eq!(report.high_signals.len(), 3);
        assert!(report.high_signals.iter().all(|s| s.keyword != "b"));

        let text = report.render("en");
        assert!(text.contains("rising"));
        assert!(text.contains("+25.0%"));
    }
}
