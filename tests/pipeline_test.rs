//! Load-all pipeline with fake providers

mod common;

use common::{keywords, FailingProvider, PartialProvider};
use edutrend::config::Config;
use edutrend::models::Timeframe;
use edutrend::pipeline::TrendPipeline;
use edutrend::provider::TrendProvider;
use std::sync::Arc;

fn test_config() -> Config {
    let mut config = Config::default();
    config.provider.delay_min_ms = 0;
    config.provider.delay_max_ms = 0;
    config.analysis.mock_seed = Some(42);
    config
}

#[tokio::test]
async fn test_sufficient_coverage_keeps_provider_data() {
    let config = test_config();
    let provider = Arc::new(PartialProvider::new(&["파이썬", "엑셀"], 90, 40.0));
    let pipeline = TrendPipeline::new(
        &config,
        provider.clone() as Arc<dyn TrendProvider>,
        provider.clone() as Arc<dyn TrendProvider>,
    )
    .with_keywords(keywords(&["파이썬", "엑셀", "SQL"]));

    let snapshot = pipeline.load_all(Timeframe::ThreeMonths).await;

    assert!(!snapshot.web_is_mock);
    assert!(!snapshot.video_is_mock);
    assert!(!snapshot.is_demo());
    assert_eq!(snapshot.metrics.len(), 2);
    assert!(snapshot.metrics_for("SQL").is_none());
    assert_eq!(snapshot.cross_signals.len(), 2);
    assert!(snapshot.cross_signals.iter().all(|s| !s.approximated));
    // Three keywords fit in one chunk per source
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_low_coverage_falls_back_to_mock() {
    let config = test_config();
    let provider = Arc::new(PartialProvider::new(&["파이썬"], 90, 40.0));
    let pipeline = TrendPipeline::new(
        &config,
        provider.clone() as Arc<dyn TrendProvider>,
        provider as Arc<dyn TrendProvider>,
    )
    .with_keywords(keywords(&["파이썬", "엑셀", "SQL"]));

    let snapshot = pipeline.load_all(Timeframe::SixMonths).await;

    assert!(snapshot.web_is_mock);
    assert!(snapshot.video_is_mock);
    assert_eq!(snapshot.web.len(), 180);
    assert_eq!(snapshot.metrics.len(), 3);
    assert_eq!(snapshot.correlations.len(), 3);
}

#[tokio::test]
async fn test_failing_video_source_only_mocks_video() {
    let config = test_config();
    let web = Arc::new(PartialProvider::new(&["파이썬", "엑셀"], 90, 40.0));
    let pipeline = TrendPipeline::new(&config, web, Arc::new(FailingProvider))
        .with_keywords(keywords(&["파이썬", "엑셀"]));

    let snapshot = pipeline.load_all(Timeframe::ThreeMonths).await;

    assert!(!snapshot.web_is_mock);
    assert!(snapshot.video_is_mock);
    assert_eq!(snapshot.video.keyword_count(), 2);
}

#[tokio::test]
async fn test_cached_snapshot_skips_provider() {
    let config = test_config();
    let provider = Arc::new(PartialProvider::new(&["파이썬", "엑셀"], 90, 40.0));
    let pipeline = TrendPipeline::new(
        &config,
        provider.clone() as Arc<dyn TrendProvider>,
        provider.clone() as Arc<dyn TrendProvider>,
    )
    .with_keywords(keywords(&["파이썬", "엑셀"]));

    let first = pipeline.load_all(Timeframe::ThreeMonths).await;
    let second = pipeline.load_all(Timeframe::ThreeMonths).await;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(provider.calls(), 2);

    // A different timeframe is a different cache entry
    pipeline.load_all(Timeframe::TwelveMonths).await;
    assert_eq!(provider.calls(), 4);

    let stats = pipeline.cache_stats().await.unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 2);
}

#[tokio::test]
async fn test_related_queries_from_provider_and_fallback() {
    let config = test_config();
    let provider = Arc::new(PartialProvider::new(&[], 90, 40.0));
    let pipeline = TrendPipeline::new(&config, provider.clone(), provider);
    let queries = pipeline.related_queries("엑셀", Timeframe::ThreeMonths).await;
    assert_eq!(queries, keywords(&["엑셀 rising", "엑셀 top"]));

    let failing = TrendPipeline::new(&config, Arc::new(FailingProvider), Arc::new(FailingProvider));
    let queries = failing.related_queries("엑셀", Timeframe::ThreeMonths).await;
    assert_eq!(queries.len(), 9);
}
