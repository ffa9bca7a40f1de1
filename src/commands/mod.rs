pub mod analyze;
pub mod export;
pub mod simulate;

use edutrend::models::Timeframe;
use edutrend::pipeline::TrendPipeline;

// Re-export command functions for convenience
pub use analyze::{analyze, insights, related, report, signals};
pub use export::{export, ExportOptions};
pub use simulate::simulate;

/// Shared state for every subcommand
pub struct CommandContext {
    pub pipeline: TrendPipeline,
    pub timeframe: Timeframe,
    pub locale: &'static str,
    pub seed: Option<u64>,
    pub smoothing_window: usize,
}
