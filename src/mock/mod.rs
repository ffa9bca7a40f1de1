//! Synthetic trend data for demos and fallback
//!
//! Used when the live provider returns nothing or too little. Every
//! generator takes the RNG explicitly so callers can seed it.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Source, TimeSeriesTable};

/// Default number of daily samples
pub const DEFAULT_PERIODS: usize = 90;

/// Learning-oriented suffixes used for mock related queries
pub const RELATED_SUFFIXES: &[&str] = &[
    "강의",
    "입문",
    "자격증",
    "책",
    "무료",
    "사용법",
    "튜토리얼",
    "전망",
    "취업",
];

/// Shape parameters of one source's synthetic curves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockProfile {
    /// Inclusive range for the starting level
    pub base_min: i32,
    pub base_max: i32,
    /// Per-day slope choices: decline, flat, growth, rapid growth
    pub slopes: [f64; 4],
    /// Symmetric integer noise amplitude
    pub noise: i32,
}

impl MockProfile {
    pub const WEB: Self = Self {
        base_min: 10,
        base_max: 50,
        slopes: [-0.1, 0.0, 0.2, 0.5],
        noise: 5,
    };

    /// Video search runs lower and noisier than web search
    pub const VIDEO: Self = Self {
        base_min: 5,
        base_max: 40,
        slopes: [-0.2, 0.0, 0.3, 0.8],
        noise: 8,
    };

    pub fn for_source(source: Source) -> Self {
        match source {
            Source::Web => Self::WEB,
            Source::Video => Self::VIDEO,
        }
    }

    /// One curve: `clamp(base + i * slope + noise[i], 0, 100)`
    pub fn series<R: Rng + ?Sized>(&self, periods: usize, rng: &mut R) -> Vec<f64> {
        let base = rng.gen_range(self.base_min..=self.base_max) as f64;
        let slope = self.slopes.choose(rng).copied().unwrap_or(0.0);

        (0..periods)
            .map(|i| {
                let noise = rng.gen_range(-self.noise..=self.noise) as f64;
                (base + i as f64 * slope + noise).clamp(0.0, 100.0)
            })
            .collect()
    }
}

/// Generate a table of synthetic daily series ending at `end`
///
/// Duplicate keywords are generated once.
pub fn generate<R: Rng + ?Sized>(
    keywords: &[String],
    periods: usize,
    end: NaiveDate,
    profile: MockProfile,
    rng: &mut R,
) -> TimeSeriesTable {
    if periods == 0 || keywords.is_empty() {
        return TimeSeriesTable::empty();
    }

    let start = end - Duration::days(periods as i64 - 1);
    let dates = (0..periods)
        .map(|i| start + Duration::days(i as i64))
        .collect();
    let mut table = TimeSeriesTable::new(dates);

    for keyword in keywords {
        if table.contains(keyword) {
            continue;
        }
        let values = profile.series(periods, rng);
        if let Err(e) = table.insert_column(keyword.clone(), values) {
            tracing::warn!(keyword = %keyword, error = %e, "Skipping mock column");
        }
    }

    table
}

/// Generate mock data shaped like the given source
pub fn generate_for_source<R: Rng + ?Sized>(
    source: Source,
    keywords: &[String],
    periods: usize,
    end: NaiveDate,
    rng: &mut R,
) -> TimeSeriesTable {
    generate(keywords, periods, end, MockProfile::for_source(source), rng)
}

/// Keyword followed by each learning suffix
pub fn mock_related_queries(keyword: &str) -> Vec<String> {
    RELATED_SUFFIXES
        .iter()
        .map(|suffix| format!("{keyword} {suffix}"))
        .collect()
}
