use anyhow::Result;

use edutrend::i18n::{label, label_with};
use edutrend::pipeline::AnalysisSnapshot;
use edutrend::report::{data_limitations, demo_mode_notice, format_growth_rate, TrendReport};
use edutrend::utils::{pad_right, truncate_text};

use super::CommandContext;

fn print_header(ctx: &CommandContext, snapshot: &AnalysisSnapshot) {
    println!(
        "{} ({})",
        label(snapshot.timeframe.label_key(), ctx.locale),
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(notice) = demo_mode_notice(snapshot.web_is_mock, snapshot.video_is_mock, ctx.locale)
    {
        println!("{notice}");
    }
    println!("================================");
}

fn col(key: &str, ctx: &CommandContext, width: usize) -> String {
    pad_right(&label(&format!("cli.header.{key}"), ctx.locale), width)
}

pub async fn analyze(ctx: &CommandContext, action: Option<&str>) -> Result<()> {
    let snapshot = ctx.pipeline.load_all(ctx.timeframe).await;
    print_header(ctx, &snapshot);

    println!(
        "{} {} {} {} {}",
        col("keyword", ctx, 18),
        col("growth", ctx, 9),
        col("recent", ctx, 7),
        col("diagnosis", ctx, 18),
        label("cli.header.action", ctx.locale)
    );

    let rows = snapshot
        .metrics
        .iter()
        .filter(|m| action.map_or(true, |a| m.action.key() == a));

    for row in rows {
        println!(
            "{} {} {} {} {} {}",
            pad_right(&truncate_text(&row.keyword, 18), 18),
            pad_right(&format_growth_rate(row.growth_rate), 9),
            pad_right(&format!("{:.1}", row.recent_interest), 7),
            row.diagnosis.icon(),
            pad_right(&row.diagnosis.label(ctx.locale), 16),
            row.action.label(ctx.locale)
        );
    }

    Ok(())
}

pub async fn signals(ctx: &CommandContext) -> Result<()> {
    let snapshot = ctx.pipeline.load_all(ctx.timeframe).await;
    print_header(ctx, &snapshot);

    println!(
        "{} {} {} {} {}",
        col("keyword", ctx, 18),
        col("web", ctx, 9),
        col("video", ctx, 9),
        col("pattern", ctx, 20),
        label("cli.header.strength", ctx.locale)
    );

    for row in &snapshot.cross_signals {
        let approximated = if row.approximated {
            format!(" {}", label("cli.approximated", ctx.locale))
        } else {
            String::new()
        };
        println!(
            "{} {} {} {} {}{}",
            pad_right(&truncate_text(&row.keyword, 18), 18),
            pad_right(&format_growth_rate(row.web_growth), 9),
            pad_right(&format_growth_rate(row.video_growth), 9),
            pad_right(&row.pattern.label(ctx.locale), 20),
            row.strength.label(ctx.locale),
            approximated
        );
        println!("    {}", row.pattern.interpretation(ctx.locale));
    }

    println!();
    println!("{}", label("cli.correlation", ctx.locale));
    for correlation in &snapshot.correlations {
        let value = correlation
            .coefficient
            .map(|c| format!("{c:.2}"))
            .unwrap_or_else(|| "N/A".to_string());
        println!("  {} {value}", pad_right(&correlation.keyword, 18));
    }

    println!();
    println!("{}", data_limitations(ctx.locale).cross_signal_purpose);
    Ok(())
}

pub async fn insights(ctx: &CommandContext, top: usize) -> Result<()> {
    let snapshot = ctx.pipeline.load_all(ctx.timeframe).await;
    print_header(ctx, &snapshot);

    let summary = &snapshot.insights.summary;
    println!(
        "{}",
        label_with(
            "cli.summary",
            ctx.locale,
            &[
                ("total", summary.total_keywords.to_string()),
                ("growth", summary.growth_stage_count.to_string()),
                ("sustainable", summary.sustainable_count.to_string()),
                ("priority", summary.priority_count.to_string()),
            ]
        )
    );
    println!();

    println!(
        "{} {} {}",
        col("keyword", ctx, 18),
        col("confidence", ctx, 10),
        label("cli.header.sustainability", ctx.locale)
    );
    for priority in snapshot.insights.priorities.iter().take(top) {
        println!(
            "{} {} {}",
            pad_right(&truncate_text(&priority.keyword, 18), 18),
            pad_right(&format!("{:.1}", priority.confidence), 10),
            priority.sustainability.label(ctx.locale)
        );
        println!("    {}", priority.reason(ctx.locale));
    }

    println!();
    println!(
        "{} {} {}",
        col("keyword", ctx, 18),
        col("stage", ctx, 10),
        label("cli.header.sustainability", ctx.locale)
    );
    for insight in &snapshot.insights.keywords {
        println!(
            "{} {} {}",
            pad_right(&truncate_text(&insight.keyword, 18), 18),
            pad_right(&insight.stage.label(ctx.locale), 10),
            insight.sustainability.label(ctx.locale)
        );
    }

    Ok(())
}

pub async fn report(ctx: &CommandContext) -> Result<()> {
    let snapshot = ctx.pipeline.load_all(ctx.timeframe).await;
    let report = TrendReport::from_snapshot(&snapshot);
    println!("{}", report.render(ctx.locale));
    Ok(())
}

pub async fn related(ctx: &CommandContext, keyword: &str) -> Result<()> {
    let queries = ctx.pipeline.related_queries(keyword, ctx.timeframe).await;

    println!(
        "{}",
        label_with("cli.related", ctx.locale, &[("keyword", keyword.to_string())])
    );
    for (i, query) in queries.iter().enumerate() {
        println!("{}. {query}", i + 1);
    }
    Ok(())
}
