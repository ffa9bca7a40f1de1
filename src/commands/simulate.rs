use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use edutrend::i18n::label;
use edutrend::report::format_growth_rate;
use edutrend::report::simulator::TopicSimulator;
use edutrend::utils::pad_right;

use super::CommandContext;

pub async fn simulate(ctx: &CommandContext, from: Option<&str>, select: &[String]) -> Result<()> {
    let snapshot = ctx.pipeline.load_all(ctx.timeframe).await;

    let mut rng = match ctx.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut simulator = TopicSimulator::new(&snapshot.metrics, from, &mut rng);

    println!("{}", label("cli.candidates", ctx.locale));
    for candidate in simulator.candidates() {
        println!(
            "- {} {} {}",
            pad_right(&candidate.keyword, 18),
            pad_right(&format_growth_rate(candidate.growth_rate), 9),
            candidate.trend.label(ctx.locale)
        );
    }
    println!();

    for keyword in select {
        simulator.toggle(keyword)?;
    }

    match simulator.report() {
        Some(report) => println!("{}", report.render(ctx.locale)),
        None => println!("{}", label("cli.select_hint", ctx.locale)),
    }

    Ok(())
}
