// Core data structures for the trend analytics engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::TableError;

/// Search source a table was collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// General web search
    Web,
    /// Video search
    Video,
}

impl Source {
    /// Provider property selector (empty for web search)
    pub fn gprop(&self) -> &'static str {
        match self {
            Self::Web => "",
            Self::Video => "youtube",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observation window requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl Timeframe {
    /// All supported timeframes, shortest first
    pub fn all() -> [Self; 3] {
        [Self::ThreeMonths, Self::SixMonths, Self::TwelveMonths]
    }

    /// Provider token, e.g. `today 3-m`
    pub fn token(&self) -> &'static str {
        match self {
            Self::ThreeMonths => "today 3-m",
            Self::SixMonths => "today 6-m",
            Self::TwelveMonths => "today 12-m",
        }
    }

    /// Number of daily samples generated when mock data stands in
    pub fn mock_periods(&self) -> usize {
        match self {
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::TwelveMonths => 365,
        }
    }

    /// Translation key for the display label
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::ThreeMonths => "timeframe.three_months",
            Self::SixMonths => "timeframe.six_months",
            Self::TwelveMonths => "timeframe.twelve_months",
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    /// Accepts `3m`, `3-m`, `today 3-m`, `3개월` and the 6/12 month equivalents
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let normalized = normalized.trim_start_matches("today").trim();
        match normalized {
            "3m" | "3-m" | "3개월" => Ok(Self::ThreeMonths),
            "6m" | "6-m" | "6개월" => Ok(Self::SixMonths),
            "12m" | "12-m" | "12개월" | "1y" => Ok(Self::TwelveMonths),
            other => Err(format!("unsupported timeframe: {other}")),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One keyword column of a [`TimeSeriesTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSeries {
    pub keyword: String,
    pub values: Vec<f64>,
}

/// Keyword-indexed relative interest samples sharing one date index
///
/// Every column has exactly as many samples as there are dates. Missing
/// source data is an empty table, never a short column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesTable {
    dates: Vec<NaiveDate>,
    columns: Vec<KeywordSeries>,
}

impl TimeSeriesTable {
    /// Create a table over the given date index with no columns
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            columns: Vec::new(),
        }
    }

    /// Create an empty table (no dates, no columns)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style column insertion
    pub fn with_column(
        mut self,
        keyword: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        self.insert_column(keyword, values)?;
        Ok(self)
    }

    /// Add a keyword column, validating length and sample range
    pub fn insert_column(
        &mut self,
        keyword: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), TableError> {
        let keyword = keyword.into();

        if self.contains(&keyword) {
            return Err(TableError::DuplicateKeyword(keyword));
        }

        if values.len() != self.dates.len() {
            return Err(TableError::RaggedColumn {
                keyword,
                expected: self.dates.len(),
                actual: values.len(),
            });
        }

        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(TableError::InvalidSample {
                keyword,
                index,
                value,
            });
        }

        self.columns.push(KeywordSeries { keyword, values });
        Ok(())
    }

    /// Number of rows (shared timestamps)
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True when there is no usable data
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }

    /// Number of keyword columns
    pub fn keyword_count(&self) -> usize {
        self.columns.len()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Keywords in column order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.keyword.as_str())
    }

    pub fn columns(&self) -> &[KeywordSeries] {
        &self.columns
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.columns.iter().any(|c| c.keyword == keyword)
    }

    /// Samples for a keyword, if present
    pub fn series(&self, keyword: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.keyword == keyword)
            .map(|c| c.values.as_slice())
    }

    /// Fraction of `keywords` that have a column in this table
    pub fn coverage(&self, keywords: &[String]) -> f64 {
        if keywords.is_empty() {
            return 0.0;
        }
        let present = keywords.iter().filter(|k| self.contains(k)).count();
        present as f64 / keywords.len() as f64
    }

    /// Merge columns of `other` that are not yet present
    ///
    /// An empty `self` adopts `other`'s date index. Columns from a table with
    /// a different index are not merged. Returns the number of added columns.
    pub fn merge_new_columns(&mut self, other: TimeSeriesTable) -> usize {
        if other.is_empty() {
            return 0;
        }

        if self.is_empty() {
            self.dates = other.dates;
            self.columns.clear();
        } else if self.dates != other.dates {
            tracing::warn!(
                existing_rows = self.dates.len(),
                incoming_rows = other.dates.len(),
                "Skipping columns with a misaligned date index"
            );
            return 0;
        }

        let mut added = 0;
        for column in other.columns {
            if !self.contains(&column.keyword) {
                self.columns.push(column);
                added += 1;
            }
        }
        added
    }

    /// Copy of the table restricted to the given keywords (in their order)
    pub fn select(&self, keywords: &[String]) -> Self {
        let columns = keywords
            .iter()
            .filter_map(|k| self.columns.iter().find(|c| &c.keyword == k).cloned())
            .collect();
        Self {
            dates: self.dates.clone(),
            columns,
        }
    }

    /// Apply `f` to every column, keeping the date index
    pub fn map_columns<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        let columns = self
            .columns
            .iter()
            .map(|c| KeywordSeries {
                keyword: c.keyword.clone(),
                values: f(&c.values),
            })
            .collect();
        Self {
            dates: self.dates.clone(),
            columns,
        }
    }
}
