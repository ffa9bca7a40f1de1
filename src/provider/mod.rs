//! Trend data provider abstraction
//!
//! A provider answers "relative interest over time" for a batch of keywords
//! and "related queries" for one keyword. Callers never see a failed fetch
//! as a hard error: [`fetch`] turns failures into missing columns and the
//! pipeline replaces thin results with mock data.

pub mod fetch;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::mock::mock_related_queries;
use crate::models::{Source, Timeframe, TimeSeriesTable};
use crate::utils::error::ProviderError;

pub use fetch::{fetch_multi_source, fetch_trend_data, FetchOptions};
pub use http::HttpTrendProvider;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Queries taken from each related-query list
const RELATED_PER_LIST: usize = 5;

/// Maximum merged related queries
const RELATED_MAX: usize = 10;

/// One interest-over-time request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRequest {
    pub keywords: Vec<String>,
    pub timeframe: Timeframe,
    pub region: String,
    pub source: Source,
}

/// Raw related queries for one keyword
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedQueries {
    #[serde(default)]
    pub rising: Vec<String>,
    #[serde(default)]
    pub top: Vec<String>,
}

impl RelatedQueries {
    /// Up to 5 rising then up to 5 top queries, deduplicated in order
    pub fn merged(&self) -> Vec<String> {
        let mut merged: Vec<String> = Vec::with_capacity(RELATED_MAX);
        let candidates = self
            .rising
            .iter()
            .take(RELATED_PER_LIST)
            .chain(self.top.iter().take(RELATED_PER_LIST));

        for query in candidates {
            if !merged.contains(query) {
                merged.push(query.clone());
            }
        }
        merged.truncate(RELATED_MAX);
        merged
    }
}

/// Source of relative search-interest data
#[async_trait]
pub trait TrendProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Interest over time for a batch of keywords
    ///
    /// Keywords the provider has no data for are simply absent from the
    /// returned table.
    async fn interest_over_time(&self, request: &TrendRequest) -> ProviderResult<TimeSeriesTable>;

    /// Related queries for one keyword
    async fn related_queries(
        &self,
        keyword: &str,
        timeframe: Timeframe,
        region: &str,
    ) -> ProviderResult<RelatedQueries>;
}

/// Provider used when no endpoint is configured; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProvider;

#[async_trait]
impl TrendProvider for UnavailableProvider {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn interest_over_time(&self, _request: &TrendRequest) -> ProviderResult<TimeSeriesTable> {
        Err(ProviderError::Unavailable)
    }

    async fn related_queries(
        &self,
        _keyword: &str,
        _timeframe: Timeframe,
        _region: &str,
    ) -> ProviderResult<RelatedQueries> {
        Err(ProviderError::Unavailable)
    }
}

/// Related queries for a keyword, or mock suggestions when the provider
/// fails or returns nothing
pub async fn related_queries_or_mock(
    provider: &dyn TrendProvider,
    keyword: &str,
    timeframe: Timeframe,
    region: &str,
) -> Vec<String> {
    match provider.related_queries(keyword, timeframe, region).await {
        Ok(related) => {
            let merged = related.merged();
            if merged.is_empty() {
                tracing::debug!(keyword = %keyword, "No related queries, using mock suggestions");
                mock_related_queries(keyword)
            } else {
                merged
            }
        }
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                keyword = %keyword,
                error = %e,
                "Related queries failed, using mock suggestions"
            );
            mock_related_queries(keyword)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merged_prefers_rising_and_dedups() {
        let related = RelatedQueries {
            rising: strings(&["a", "b", "c"]),
            top: strings(&["b", "d"]),
        };
        assert_eq!(related.merged(), strings(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_merged_caps_each_list() {
        let related = RelatedQueries {
            rising: strings(&["r1", "r2", "r3", "r4", "r5", "r6", "r7"]),
            top: strings(&["t1", "t2", "t3", "t4", "t5", "t6"]),
        };
        let merged = related.merged();
        assert_eq!(merged.len(), 10);
        assert!(!merged.contains(&"r6".to_string()));
        assert!(!merged.contains(&"t6".to_string()));
    }

    #[tokio::test]
    async fn test_related_queries_fall_back_to_mock() {
        let queries =
            related_queries_or_mock(&UnavailableProvider, "엑셀", Timeframe::ThreeMonths, "KR").await;
        assert_eq!(queries.len(), 9);
        assert_eq!(queries[0], "엑셀 강의");
    }
}
