use anyhow::{Context, Result};
use std::path::PathBuf;

use edutrend::export::{
    export_metrics_csv, export_raw_csv, RawTransform, METRICS_FILE_NAME, RAW_FILE_NAME,
};
use edutrend::i18n::label_with;

use super::CommandContext;

pub struct ExportOptions {
    pub out: PathBuf,
    pub raw: bool,
    pub normalized: bool,
    pub smoothed: Option<usize>,
}

impl ExportOptions {
    fn transform(&self) -> RawTransform {
        match (self.normalized, self.smoothed) {
            (true, _) => RawTransform::Normalized,
            (false, Some(window)) => RawTransform::Smoothed(window),
            (false, None) => RawTransform::Raw,
        }
    }
}

pub async fn export(ctx: &CommandContext, options: ExportOptions) -> Result<()> {
    let snapshot = ctx.pipeline.load_all(ctx.timeframe).await;

    std::fs::create_dir_all(&options.out)
        .with_context(|| format!("Failed to create {}", options.out.display()))?;

    let metrics_path = options.out.join(METRICS_FILE_NAME);
    export_metrics_csv(&metrics_path, &snapshot.metrics, ctx.locale)
        .context("Failed to export metrics")?;
    println!(
        "{}",
        label_with(
            "cli.exported",
            ctx.locale,
            &[("path", metrics_path.display().to_string())]
        )
    );

    let wants_raw = options.raw || options.normalized || options.smoothed.is_some();
    if wants_raw {
        let transform = options.transform();
        let raw_path = options.out.join(RAW_FILE_NAME);
        export_raw_csv(&raw_path, &snapshot.web, transform)
            .context("Failed to export raw series")?;
        println!(
            "{}",
            label_with(
                "cli.exported",
                ctx.locale,
                &[("path", raw_path.display().to_string())]
            )
        );
    }

    Ok(())
}
