//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use edutrend::models::{Source, TimeSeriesTable, Timeframe};
use edutrend::provider::{ProviderResult, RelatedQueries, TrendProvider, TrendRequest};
use edutrend::utils::error::ProviderError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Daily dates ending 2024-06-30
pub fn dates(periods: usize) -> Vec<NaiveDate> {
    let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    (0..periods)
        .rev()
        .map(|back| end - chrono::Duration::days(back as i64))
        .collect()
}

/// Series of `len` samples split into early/middle/recent plateaus
///
/// The early and recent plateaus each take 30% of the samples.
pub fn step_series(len: usize, early: f64, middle: f64, recent: f64) -> Vec<f64> {
    let split = (len as f64 * 0.3) as usize;
    let mut series = vec![middle; len];
    series[..split].fill(early);
    series[len - split..].fill(recent);
    series
}

/// Table with one column per (keyword, series) pair
pub fn table_of(columns: &[(&str, Vec<f64>)]) -> TimeSeriesTable {
    let len = columns.first().map_or(0, |(_, s)| s.len());
    let mut table = TimeSeriesTable::new(dates(len));
    for (keyword, series) in columns {
        table.insert_column(*keyword, series.clone()).unwrap();
    }
    table
}

pub fn keywords(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Provider answering only for a fixed subset of keywords
///
/// Returns flat series, with video at half the web value. Counts every call.
pub struct PartialProvider {
    pub known: Vec<String>,
    pub periods: usize,
    pub value: f64,
    pub calls: AtomicUsize,
}

impl PartialProvider {
    pub fn new(known: &[&str], periods: usize, value: f64) -> Self {
        Self {
            known: keywords(known),
            periods,
            value,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrendProvider for PartialProvider {
    fn name(&self) -> &str {
        "partial"
    }

    async fn interest_over_time(&self, request: &TrendRequest) -> ProviderResult<TimeSeriesTable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut table = TimeSeriesTable::new(dates(self.periods));
        for keyword in &request.keywords {
            if self.known.contains(keyword) {
                let value = match request.source {
                    Source::Web => self.value,
                    Source::Video => self.value / 2.0,
                };
                table.insert_column(keyword.clone(), vec![value; self.periods])?;
            }
        }
        Ok(table)
    }

    async fn related_queries(
        &self,
        keyword: &str,
        _timeframe: Timeframe,
        _region: &str,
    ) -> ProviderResult<RelatedQueries> {
        Ok(RelatedQueries {
            rising: vec![format!("{keyword} rising")],
            top: vec![format!("{keyword} top")],
        })
    }
}

/// Provider that fails every request with a server error
pub struct FailingProvider;

#[async_trait]
impl TrendProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn interest_over_time(&self, _request: &TrendRequest) -> ProviderResult<TimeSeriesTable> {
        Err(ProviderError::ServerError(500))
    }

    async fn related_queries(
        &self,
        _keyword: &str,
        _timeframe: Timeframe,
        _region: &str,
    ) -> ProviderResult<RelatedQueries> {
        Err(ProviderError::ServerError(500))
    }
}
