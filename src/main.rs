use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edutrend::config::Config;
use edutrend::models::Timeframe;
use edutrend::pipeline::TrendPipeline;

mod commands;

use commands::CommandContext;

#[derive(Parser)]
#[command(
    name = "edutrend",
    version,
    about = "Search and video trend analytics for course planning",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Display language (en, ko)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Observation window (3m, 6m, 12m)
    #[arg(short, long, global = true, default_value = "3m")]
    period: Timeframe,

    /// Seed for mock data and shuffling
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Growth metrics and planning recommendations per keyword
    Analyze {
        /// Only show keywords with this action (new_course, refresh, ...)
        #[arg(short, long)]
        action: Option<String>,
    },

    /// Web versus video cross signals and correlations
    Signals,

    /// Market stage, sustainability and priority keywords
    Insights {
        /// Number of priority keywords to show
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Summary report with data limitations
    Report,

    /// Export metrics and raw series as CSV
    Export {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Also export raw series
        #[arg(long, default_value = "false")]
        raw: bool,

        /// Scale raw series to 0-100 per keyword
        #[arg(long, default_value = "false", conflicts_with = "smoothed")]
        normalized: bool,

        /// Apply a trailing moving average to raw series (window defaults to config)
        #[arg(long, num_args = 0..=1)]
        smoothed: Option<Option<usize>>,
    },

    /// Pick up to two topics and review the outlook
    Simulate {
        /// Keyword to place first among the candidates
        #[arg(long)]
        from: Option<String>,

        /// Keyword to select (repeatable)
        #[arg(short, long)]
        select: Vec<String>,
    },

    /// Related queries for a keyword
    Related {
        /// Keyword to look up
        keyword: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(lang) = &cli.lang {
        config.logging.lang = lang.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    if cli.seed.is_some() {
        config.analysis.mock_seed = cli.seed;
    }
    config.validate().context("Invalid configuration")?;

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    edutrend::i18n::set_locale(&config.logging.lang);

    tracing::info!(
        period = %cli.period,
        lang = %config.logging.lang,
        provider = ?config.provider.base_url,
        "edutrend starting"
    );

    let pipeline = TrendPipeline::from_config(&config).context("Failed to build pipeline")?;
    let ctx = CommandContext {
        pipeline,
        timeframe: cli.period,
        locale: edutrend::i18n::normalize_locale(&config.logging.lang),
        seed: config.analysis.mock_seed,
        smoothing_window: config.analysis.smoothing_window,
    };

    match cli.command {
        Commands::Analyze { action } => {
            tracing::info!(action = ?action, "Starting analyze command");
            commands::analyze(&ctx, action.as_deref()).await?;
        }

        Commands::Signals => {
            tracing::info!("Starting signals command");
            commands::signals(&ctx).await?;
        }

        Commands::Insights { top } => {
            tracing::info!(top = %top, "Starting insights command");
            commands::insights(&ctx, top).await?;
        }

        Commands::Report => {
            tracing::info!("Starting report command");
            commands::report(&ctx).await?;
        }

        Commands::Export {
            out,
            raw,
            normalized,
            smoothed,
        } => {
            tracing::info!(
                out = %out.display(),
                raw = %raw,
                normalized = %normalized,
                smoothed = ?smoothed,
                "Starting export command"
            );
            let options = commands::ExportOptions {
                out,
                raw,
                normalized,
                smoothed: smoothed.map(|w| w.unwrap_or(ctx.smoothing_window)),
            };
            commands::export(&ctx, options).await?;
        }

        Commands::Simulate { from, select } => {
            tracing::info!(from = ?from, select = ?select, "Starting simulate command");
            commands::simulate(&ctx, from.as_deref(), &select).await?;
        }

        Commands::Related { keyword } => {
            tracing::info!(keyword = %keyword, "Starting related command");
            commands::related(&ctx, &keyword).await?;
        }
    }

    tracing::info!("edutrend completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("edutrend=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("edutrend={level},warn")))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
