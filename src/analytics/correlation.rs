//! Correlation and normalization utilities
//!
//! - Pearson correlation between the web and video series of a keyword
//! - Min-max normalization to the 0-100 scale
//! - Trailing moving average for chart smoothing

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::growth::std_dev_or_zero;
use super::{AnalysisError, AnalysisResult};
use crate::models::TimeSeriesTable;

/// Minimum aligned samples for a correlation coefficient
pub const MIN_CORRELATION_SAMPLES: usize = 3;

/// Allowed moving average window sizes
pub const SMOOTHING_WINDOW_RANGE: std::ops::RangeInclusive<usize> = 3..=14;

const ZERO_VARIANCE: f64 = 1e-12;

/// Pearson correlation coefficient of two aligned series
///
/// Returns `None` when the lengths differ, when there are fewer than
/// [`MIN_CORRELATION_SAMPLES`] samples, or when either series is constant.
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < MIN_CORRELATION_SAMPLES {
        return None;
    }

    let std_a = std_dev_or_zero(a);
    let std_b = std_dev_or_zero(b);
    if std_a < ZERO_VARIANCE || std_b < ZERO_VARIANCE {
        return None;
    }

    let covariance: f64 = a.covariance(b);
    let r = covariance / (std_a * std_b);

    if r.is_finite() {
        Some(r.clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// Correlation between the two sources for one keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCorrelation {
    pub keyword: String,
    pub coefficient: Option<f64>,
}

/// Correlate web and video series for each requested keyword
///
/// Keywords missing from either table get `None`, and so does every
/// keyword when the two tables are not indexed by the same dates. No
/// interpolation is attempted.
pub fn correlate_sources(
    web: &TimeSeriesTable,
    video: &TimeSeriesTable,
    keywords: &[String],
) -> Vec<KeywordCorrelation> {
    let aligned = web.dates() == video.dates();
    if !aligned {
        tracing::debug!(
            web_rows = web.len(),
            video_rows = video.len(),
            "Source dates differ, skipping correlation"
        );
    }

    keywords
        .iter()
        .map(|keyword| {
            let coefficient = match (web.series(keyword), video.series(keyword)) {
                (Some(a), Some(b)) if aligned => pearson(a, b),
                _ => None,
            };
            KeywordCorrelation {
                keyword: keyword.clone(),
                coefficient,
            }
        })
        .collect()
}

/// Map a series onto `[0, 100]` by min-max scaling
///
/// A constant series maps to all zeros.
pub fn min_max_normalize(series: &[f64]) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }

    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range.abs() < ZERO_VARIANCE {
        return vec![0.0; series.len()];
    }

    series.iter().map(|x| (x - min) / range * 100.0).collect()
}

/// Normalize every column of a table independently
pub fn normalize_table(table: &TimeSeriesTable) -> TimeSeriesTable {
    table.map_columns(min_max_normalize)
}

/// Trailing simple moving average
///
/// The output has the same length as the input. The first `window - 1`
/// positions are `None` because a full window is not yet available.
pub fn moving_average(series: &[f64], window: usize) -> AnalysisResult<Vec<Option<f64>>> {
    if !SMOOTHING_WINDOW_RANGE.contains(&window) {
        return Err(AnalysisError::InvalidWindowSize(window));
    }

    let mut output = vec![None; series.len()];
    if series.len() < window {
        return Ok(output);
    }

    let mut sum: f64 = series[..window].iter().sum();
    output[window - 1] = Some(sum / window as f64);

    for i in window..series.len() {
        sum += series[i] - series[i - window];
        output[i] = Some(sum / window as f64);
    }

    Ok(output)
}
