//! HTTP trend provider
//!
//! Talks to a JSON trends endpoint:
//! - `GET {base}/interest_over_time?keywords=a,b&timeframe=..&geo=..&gprop=..`
//!   returns `{"dates": ["YYYY-MM-DD", ..], "series": {"a": [..], "b": [..]}}`
//! - `GET {base}/related_queries?keyword=a&timeframe=..&geo=..`
//!   returns `{"rising": [..], "top": [..]}`

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

use super::{ProviderResult, RelatedQueries, TrendProvider, TrendRequest};
use crate::config::Config;
use crate::models::{Timeframe, TimeSeriesTable};
use crate::utils::error::{ProviderError, TableError};
use crate::utils::retry::{with_retry_if, RetryConfig};

/// Wire format of an interest-over-time response
#[derive(Debug, Deserialize)]
struct InterestResponse {
    #[serde(default)]
    dates: Vec<String>,
    #[serde(default)]
    series: HashMap<String, Vec<f64>>,
}

impl InterestResponse {
    /// Build a table holding the requested keywords present in the response
    fn into_table(mut self, keywords: &[String]) -> Result<TimeSeriesTable, TableError> {
        let dates = self
            .dates
            .iter()
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|_| TableError::InvalidDate(d.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut table = TimeSeriesTable::new(dates);
        for keyword in keywords {
            if table.contains(keyword) {
                continue;
            }
            if let Some(values) = self.series.remove(keyword) {
                table.insert_column(keyword.clone(), values)?;
            }
        }
        Ok(table)
    }
}

/// Trend provider backed by an HTTP JSON API
pub struct HttpTrendProvider {
    client: Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpTrendProvider {
    /// Create a provider for `base_url`
    pub fn new(
        base_url: impl Into<String>,
        client: Client,
        retry: RetryConfig,
    ) -> ProviderResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ProviderError::Unavailable);
        }
        Ok(Self {
            client,
            base_url,
            retry,
        })
    }

    /// Create a provider from configuration
    ///
    /// Fails with [`ProviderError::Unavailable`] when no base URL is set.
    pub fn from_config(config: &Config) -> ProviderResult<Self> {
        let base_url = config
            .provider
            .base_url
            .clone()
            .ok_or(ProviderError::Unavailable)?;

        let mut headers = header::HeaderMap::new();
        if let Ok(value) = header::HeaderValue::from_str(&config.provider.language) {
            headers.insert(header::ACCEPT_LANGUAGE, value);
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .user_agent(format!("edutrend/{}", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()?;

        Self::new(base_url, client, config.retry())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Http(e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProviderError::ServerError(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        with_retry_if(
            &self.retry,
            || self.get_json_once(path, query),
            ProviderError::is_recoverable,
        )
        .await
    }
}

#[async_trait]
impl TrendProvider for HttpTrendProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn interest_over_time(&self, request: &TrendRequest) -> ProviderResult<TimeSeriesTable> {
        let query = [
            ("keywords", request.keywords.join(",")),
            ("timeframe", request.timeframe.token().to_string()),
            ("geo", request.region.clone()),
            ("gprop", request.source.gprop().to_string()),
        ];

        let response: InterestResponse = self.get_json("interest_over_time", &query).await?;
        let table = response.into_table(&request.keywords)?;

        tracing::debug!(
            source = %request.source,
            rows = table.len(),
            columns = table.keyword_count(),
            "Decoded interest response"
        );

        Ok(table)
    }

    async fn related_queries(
        &self,
        keyword: &str,
        timeframe: Timeframe,
        region: &str,
    ) -> ProviderResult<RelatedQueries> {
        let query = [
            ("keyword", keyword.to_string()),
            ("timeframe", timeframe.token().to_string()),
            ("geo", region.to_string()),
        ];

        self.get_json("related_queries", &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_into_table_keeps_requested_order() {
        let response: InterestResponse = serde_json::from_str(
            r#"{"dates": ["2024-01-01", "2024-01-02"],
                "series": {"b": [1, 2], "a": [3, 4], "extra": [0, 0]}}"#,
        )
        .unwrap();

        let table = response.into_table(&keywords(&["a", "b", "missing"])).unwrap();
        assert_eq!(table.keywords().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.series("a"), Some(&[3.0, 4.0][..]));
    }

    #[test]
    fn test_into_table_rejects_ragged_column() {
        let response: InterestResponse = serde_json::from_str(
            r#"{"dates": ["2024-01-01", "2024-01-02"], "series": {"a": [1]}}"#,
        )
        .unwrap();
        assert!(matches!(
            response.into_table(&keywords(&["a"])),
            Err(TableError::RaggedColumn { .. })
        ));
    }

    #[test]
    fn test_into_table_rejects_bad_date() {
        let response: InterestResponse =
            serde_json::from_str(r#"{"dates": ["01/02/2024"], "series": {}}"#).unwrap();
        assert!(matches!(
            response.into_table(&[]),
            Err(TableError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_empty_base_url_is_unavailable() {
        let result = HttpTrendProvider::new("", Client::new(), RetryConfig::default());
        assert!(matches!(result, Err(ProviderError::Unavailable)));
    }

    #[test]
    fn test_missing_base_url_in_config() {
        let config = Config::default();
        assert!(matches!(
            HttpTrendProvider::from_config(&config),
            Err(ProviderError::Unavailable)
        ));
    }
}
