//! Load-all orchestration
//!
//! Fetches both sources concurrently, replaces missing or thin sources with
//! mock data, runs every analytics stage and caches the snapshot per
//! (timeframe, keyword list).

use chrono::{DateTime, Local, NaiveDate, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::analytics::correlation::{correlate_sources, KeywordCorrelation};
use crate::analytics::cross_signal::{analyze_cross_signals, CrossSignalRow};
use crate::analytics::growth::{calculate_growth_metrics, GrowthMetricsRow};
use crate::analytics::insights::{generate_insights, ConfidencePolicy, StrategicInsights};
use crate::cache::{CacheStats, TtlCache};
use crate::config::Config;
use crate::error::Result;
use crate::keywords::default_keywords;
use crate::mock;
use crate::models::{Source, Timeframe, TimeSeriesTable};
use crate::provider::{
    fetch_multi_source, related_queries_or_mock, FetchOptions, HttpTrendProvider, TrendProvider,
    UnavailableProvider,
};

/// Everything derived from one load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub timeframe: Timeframe,
    pub generated_at: DateTime<Utc>,
    pub web: TimeSeriesTable,
    pub video: TimeSeriesTable,
    pub web_is_mock: bool,
    pub video_is_mock: bool,
    pub metrics: Vec<GrowthMetricsRow>,
    pub cross_signals: Vec<CrossSignalRow>,
    pub correlations: Vec<KeywordCorrelation>,
    pub insights: StrategicInsights,
}

impl AnalysisSnapshot {
    /// Run every analytics stage over already resolved tables
    #[allow(clippy::too_many_arguments)]
    pub fn build<R: rand::Rng + ?Sized>(
        timeframe: Timeframe,
        web: TimeSeriesTable,
        video: TimeSeriesTable,
        web_is_mock: bool,
        video_is_mock: bool,
        keywords: &[String],
        policy: &ConfidencePolicy,
        rng: &mut R,
    ) -> Self {
        let metrics = calculate_growth_metrics(&web);
        let cross_signals = analyze_cross_signals(&metrics, &video, keywords, rng);
        let correlations = correlate_sources(&web, &video, keywords);
        let insights = generate_insights(&metrics, &cross_signals, &correlations, policy);

        Self {
            timeframe,
            generated_at: Utc::now(),
            web,
            video,
            web_is_mock,
            video_is_mock,
            metrics,
            cross_signals,
            correlations,
            insights,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.web_is_mock || self.video_is_mock
    }

    pub fn metrics_for(&self, keyword: &str) -> Option<&GrowthMetricsRow> {
        self.metrics.iter().find(|m| m.keyword == keyword)
    }

    pub fn cross_signal_for(&self, keyword: &str) -> Option<&CrossSignalRow> {
        self.cross_signals.iter().find(|s| s.keyword == keyword)
    }
}

/// Orchestrates fetch, fallback, analytics and caching
pub struct TrendPipeline {
    web_provider: Arc<dyn TrendProvider>,
    video_provider: Arc<dyn TrendProvider>,
    keywords: Vec<String>,
    fetch_options: FetchOptions,
    policy: ConfidencePolicy,
    min_coverage_ratio: f64,
    seed: Option<u64>,
    cache: Option<TtlCache<Arc<AnalysisSnapshot>>>,
}

impl TrendPipeline {
    /// Create a pipeline with explicit providers
    pub fn new(
        config: &Config,
        web_provider: Arc<dyn TrendProvider>,
        video_provider: Arc<dyn TrendProvider>,
    ) -> Self {
        let cache = config
            .cache
            .enabled
            .then(|| TtlCache::new(config.cache_ttl()));

        Self {
            web_provider,
            video_provider,
            keywords: default_keywords(),
            fetch_options: config.fetch_options(),
            policy: config.confidence_policy(),
            min_coverage_ratio: config.analysis.min_coverage_ratio,
            seed: config.analysis.mock_seed,
            cache,
        }
    }

    /// Create a pipeline from configuration
    ///
    /// Each source gets its own HTTP client. Without a base URL both
    /// sources are served by mock data.
    pub fn from_config(config: &Config) -> Result<Self> {
        let (web, video): (Arc<dyn TrendProvider>, Arc<dyn TrendProvider>) =
            if config.provider.base_url.is_some() {
                (
                    Arc::new(HttpTrendProvider::from_config(config)?),
                    Arc::new(HttpTrendProvider::from_config(config)?),
                )
            } else {
                info!("No provider URL configured, using mock data");
                (Arc::new(UnavailableProvider), Arc::new(UnavailableProvider))
            };

        Ok(Self::new(config, web, video))
    }

    /// Replace the keyword list
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    fn cache_key(&self, timeframe: Timeframe) -> String {
        let mut parts = Vec::with_capacity(self.keywords.len() + 1);
        parts.push(timeframe.token());
        parts.extend(self.keywords.iter().map(String::as_str));
        TtlCache::<Arc<AnalysisSnapshot>>::hash_key(&parts)
    }

    /// Load, analyze and cache both sources for a timeframe
    pub async fn load_all(&self, timeframe: Timeframe) -> Arc<AnalysisSnapshot> {
        match &self.cache {
            Some(cache) => {
                let key = self.cache_key(timeframe);
                cache
                    .get_or_compute(&key, || async { Arc::new(self.compute(timeframe).await) })
                    .await
            }
            None => Arc::new(self.compute(timeframe).await),
        }
    }

    async fn compute(&self, timeframe: Timeframe) -> AnalysisSnapshot {
        let (web, video) = fetch_multi_source(
            Arc::clone(&self.web_provider),
            Arc::clone(&self.video_provider),
            &self.keywords,
            timeframe,
            &self.fetch_options,
        )
        .await;

        let mut rng = self.rng();
        let end = Local::now().date_naive();
        let (web, web_is_mock) = self.resolve(web, Source::Web, timeframe, end, &mut rng);
        let (video, video_is_mock) = self.resolve(video, Source::Video, timeframe, end, &mut rng);

        let snapshot = AnalysisSnapshot::build(
            timeframe,
            web,
            video,
            web_is_mock,
            video_is_mock,
            &self.keywords,
            &self.policy,
            &mut rng,
        );

        info!(
            timeframe = %timeframe,
            keywords = snapshot.metrics.len(),
            web_is_mock = web_is_mock,
            video_is_mock = video_is_mock,
            priorities = snapshot.insights.summary.priority_count,
            "Analysis complete"
        );

        snapshot
    }

    /// Keep a fetched table or substitute mock data
    fn resolve(
        &self,
        table: TimeSeriesTable,
        source: Source,
        timeframe: Timeframe,
        end: NaiveDate,
        rng: &mut ChaCha8Rng,
    ) -> (TimeSeriesTable, bool) {
        let coverage = table.coverage(&self.keywords);
        if !table.is_empty() && coverage >= self.min_coverage_ratio {
            return (table, false);
        }

        warn!(
            source = %source,
            coverage = coverage,
            min_coverage = self.min_coverage_ratio,
            "Source data missing or insufficient, using mock data"
        );
        let mock = mock::generate_for_source(
            source,
            &self.keywords,
            timeframe.mock_periods(),
            end,
            rng,
        );
        (mock, true)
    }

    /// Related queries for a keyword with mock fallback
    pub async fn related_queries(&self, keyword: &str, timeframe: Timeframe) -> Vec<String> {
        related_queries_or_mock(
            self.web_provider.as_ref(),
            keyword,
            timeframe,
            &self.fetch_options.region,
        )
        .await
    }

    /// Drop every cached snapshot
    pub async fn clear_cache(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.clear().await,
            None => 0,
        }
    }

    pub async fn cache_stats(&self) -> Option<CacheStats> {
        match &self.cache {
            Some(cache) => Some(cache.stats().await),
            None => None,
        }
    }
}
