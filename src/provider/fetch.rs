//! Chunked and two-source fetching
//!
//! Keywords are requested in small batches with a randomized pause before
//! each batch. A failing batch is logged and skipped; its keywords are just
//! missing from the merged table.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::{TrendProvider, TrendRequest};
use crate::models::{Source, Timeframe, TimeSeriesTable};

/// Batching and pacing of provider requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub region: String,
    pub chunk_size: usize,
    pub delay_min: Duration,
    pub delay_max: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            region: String::from("KR"),
            chunk_size: 5,
            delay_min: Duration::from_millis(300),
            delay_max: Duration::from_millis(600),
        }
    }
}

impl FetchOptions {
    /// Uniform random pause in `[delay_min, delay_max]`
    pub fn jitter(&self) -> Duration {
        let min = self.delay_min.as_millis() as u64;
        let max = self.delay_max.as_millis() as u64;
        if max <= min {
            return self.delay_min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

/// Keywords in first-seen order without duplicates
fn dedup_keywords(keywords: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if !unique.contains(keyword) {
            unique.push(keyword.clone());
        }
    }
    unique
}

/// Fetch one source for all keywords, chunk by chunk
///
/// Never fails: provider errors leave the chunk's keywords out of the
/// result, and a total failure yields an empty table.
pub async fn fetch_trend_data(
    provider: &dyn TrendProvider,
    keywords: &[String],
    timeframe: Timeframe,
    source: Source,
    options: &FetchOptions,
) -> TimeSeriesTable {
    let keywords = dedup_keywords(keywords);
    let chunk_size = options.chunk_size.max(1);
    let mut merged = TimeSeriesTable::empty();
    let mut skipped = 0usize;

    for (index, chunk) in keywords.chunks(chunk_size).enumerate() {
        let pause = options.jitter();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let request = TrendRequest {
            keywords: chunk.to_vec(),
            timeframe,
            region: options.region.clone(),
            source,
        };

        match provider.interest_over_time(&request).await {
            Ok(table) => {
                let rows = table.len();
                let added = merged.merge_new_columns(table);
                debug!(
                    provider = provider.name(),
                    source = %source,
                    chunk = index,
                    rows = rows,
                    added = added,
                    "Fetched keyword chunk"
                );
            }
            Err(e) => {
                skipped += 1;
                warn!(
                    provider = provider.name(),
                    source = %source,
                    chunk = index,
                    keywords = ?chunk,
                    error = %e,
                    "Skipping failed keyword chunk"
                );
            }
        }
    }

    debug!(
        source = %source,
        keywords = merged.keyword_count(),
        requested = keywords.len(),
        skipped_chunks = skipped,
        "Finished source fetch"
    );

    merged
}

/// Fetch web and video data concurrently
///
/// Each source runs in its own task with its own provider handle; both are
/// awaited before returning. A task that panics yields an empty table.
pub async fn fetch_multi_source(
    web_provider: Arc<dyn TrendProvider>,
    video_provider: Arc<dyn TrendProvider>,
    keywords: &[String],
    timeframe: Timeframe,
    options: &FetchOptions,
) -> (TimeSeriesTable, TimeSeriesTable) {
    let spawn_source = move |provider: Arc<dyn TrendProvider>, source: Source| {
        let keywords = keywords.to_vec();
        let options = options.clone();
        tokio::spawn(async move {
            fetch_trend_data(provider.as_ref(), &keywords, timeframe, source, &options).await
        })
    };

    let web_task = spawn_source(web_provider, Source::Web);
    let video_task = spawn_source(video_provider, Source::Video);

    let (web, video) = tokio::join!(web_task, video_task);

    let unwrap_task = |result: Result<TimeSeriesTable, tokio::task::JoinError>, source: Source| {
        result.unwrap_or_else(|e| {
            warn!(source = %source, error = %e, "Fetch task failed");
            TimeSeriesTable::empty()
        })
    };

    (
        unwrap_task(web, Source::Web),
        unwrap_task(video, Source::Video),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let input: Vec<String> = ["b", "a", "b", "c", "a"].iter().map(|s| s.to_string()).collect();
        assert_eq!(dedup_keywords(&input), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_jitter_within_bounds() {
        let options = FetchOptions::default();
        for _ in 0..50 {
            let d = options.jitter();
            assert!(d >= Duration::from_millis(300) && d <= Duration::from_millis(600));
        }
    }

    #[test]
    fn test_jitter_degenerate_range() {
        let options = FetchOptions {
            delay_min: Duration::ZERO,
            delay_max: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(options.jitter(), Duration::ZERO);
    }
}
