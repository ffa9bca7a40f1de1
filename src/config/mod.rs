//! Configuration management for edutrend
//!
//! Loads settings from defaults, environment variables (`EDUTREND_*`) or a
//! TOML file, and validates them before use.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::analytics::correlation::SMOOTHING_WINDOW_RANGE;
use crate::analytics::ConfidencePolicy;
use crate::error::Error;
use crate::provider::fetch::FetchOptions;
use crate::utils::retry::RetryConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trend data provider
    pub provider: ProviderConfig,

    /// Analytics thresholds and policies
    pub analysis: AnalysisConfig,

    /// Result cache
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Trend data provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// HTTP endpoint of the trends service; mock data only when unset
    pub base_url: Option<String>,

    /// Region code sent with every request
    pub region: String,

    /// Accept-Language header value
    pub language: String,

    /// Keywords per request
    pub chunk_size: usize,

    /// Random delay before each chunk, lower bound
    pub delay_min_ms: u64,

    /// Random delay before each chunk, upper bound
    pub delay_max_ms: u64,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    pub max_retries: u32,

    pub retry_base_delay_ms: u64,
}

/// Analytics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Below this share of covered keywords a source is replaced by mock data
    pub min_coverage_ratio: f64,

    pub correlation_weight: f64,

    pub growth_weight: f64,

    /// Growth clamp applied before scoring
    pub growth_floor: f64,
    pub growth_ceiling: f64,

    /// Moving average window for chart smoothing
    pub smoothing_window: usize,

    /// Seed for mock data and approximations; random when unset
    pub mock_seed: Option<u64>,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Time-to-live of a cached snapshot in seconds
    pub ttl_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,

    /// Display language (en, ko)
    pub lang: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            region: String::from("KR"),
            language: String::from("ko-KR"),
            chunk_size: 5,
            delay_min_ms: 300,
            delay_max_ms: 600,
            timeout_secs: 25,
            max_retries: 2,
            retry_base_delay_ms: 100,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let policy = ConfidencePolicy::default();
        Self {
            min_coverage_ratio: 0.5,
            correlation_weight: policy.correlation_weight,
            growth_weight: policy.growth_weight,
            growth_floor: policy.growth_floor,
            growth_ceiling: policy.growth_ceiling,
            smoothing_window: 7,
            mock_seed: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 3600,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
            lang: String::from("en"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// Missing sections and fields keep their defaults. Environment
    /// variables are applied on top.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("EDUTREND_PROVIDER_URL") {
            self.provider.base_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Ok(region) = std::env::var("EDUTREND_REGION") {
            self.provider.region = region;
        }
        if let Some(v) = env_parse("EDUTREND_CHUNK_SIZE") {
            self.provider.chunk_size = v;
        }
        if let Some(v) = env_parse("EDUTREND_TIMEOUT") {
            self.provider.timeout_secs = v;
        }
        if let Some(v) = env_parse("EDUTREND_MAX_RETRIES") {
            self.provider.max_retries = v;
        }
        if let Some(v) = env_parse("EDUTREND_MIN_COVERAGE") {
            self.analysis.min_coverage_ratio = v;
        }
        if let Some(v) = env_parse("EDUTREND_SMOOTHING_WINDOW") {
            self.analysis.smoothing_window = v;
        }
        if let Some(v) = env_parse("EDUTREND_SEED") {
            self.analysis.mock_seed = Some(v);
        }
        if let Some(v) = env_parse("EDUTREND_CACHE_TTL") {
            self.cache.ttl_secs = v;
        }
        if let Some(v) = env_parse("EDUTREND_CACHE_ENABLED") {
            self.cache.enabled = v;
        }
        if let Ok(level) = std::env::var("EDUTREND_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("EDUTREND_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(lang) = std::env::var("EDUTREND_LANG") {
            self.logging.lang = lang;
        }
    }

    /// Validate configuration values
    ///
    /// Policy weight errors surface as [`Error::Analysis`], everything else
    /// as [`Error::Config`].
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.provider.chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than 0"));
        }

        if self.provider.delay_min_ms > self.provider.delay_max_ms {
            return Err(Error::config("delay_min_ms must not exceed delay_max_ms"));
        }

        if self.provider.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than 0"));
        }

        if !(0.0..=1.0).contains(&self.analysis.min_coverage_ratio) {
            return Err(Error::config("min_coverage_ratio must be within [0, 1]"));
        }

        if !SMOOTHING_WINDOW_RANGE.contains(&self.analysis.smoothing_window) {
            return Err(Error::config(format!(
                "smoothing_window must be within {}..={}",
                SMOOTHING_WINDOW_RANGE.start(),
                SMOOTHING_WINDOW_RANGE.end()
            )));
        }

        self.confidence_policy().validate()?;

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(Error::config("log format must be 'text' or 'json'"));
        }

        Ok(())
    }

    /// Request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    /// Cache TTL as Duration
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    #[must_use]
    pub fn confidence_policy(&self) -> ConfidencePolicy {
        ConfidencePolicy {
            correlation_weight: self.analysis.correlation_weight,
            growth_weight: self.analysis.growth_weight,
            growth_floor: self.analysis.growth_floor,
            growth_ceiling: self.analysis.growth_ceiling,
        }
    }

    #[must_use]
    pub fn retry(&self) -> RetryConfig {
        RetryConfig::with_delays(
            self.provider.max_retries,
            self.provider.retry_base_delay_ms,
            self.provider.retry_base_delay_ms.saturating_mul(32),
        )
    }

    #[must_use]
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            region: self.provider.region.clone(),
            chunk_size: self.provider.chunk_size,
            delay_min: Duration::from_millis(self.provider.delay_min_ms),
            delay_max: Duration::from_millis(self.provider.delay_max_ms),
        }
    }
}
