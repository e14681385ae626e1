//! Show a content summary.

use pizzafun_common::config::config_file_path;

use super::Context;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let content = ctx.content()?;
    let config = ctx.config()?;

    let m = &content.metadata;
    println!("Page: {}", m.title);
    println!("  Description: {}", m.description);
    println!("  Language: {}", m.lang);
    println!();

    let hero = &content.hero;
    println!("Hero:");
    println!("  Kicker: {}", hero.kicker);
    for line in &hero.headline {
        println!("  Headline: {} (after {:.1}s)", line.text, line.delay_secs);
    }
    for stat in &hero.stats {
        println!("  Stat: {}{} {}", stat.value, stat.suffix, stat.label);
    }
    println!();

    println!("Sections:");
    println!("  Features: {}", content.features.features.len());
    println!(
        "  Performance points: {}, metrics: {}",
        content.performance.points.len(),
        content.performance.metrics.len()
    );
    println!(
        "  Tokenomics: {} allocations ({}%), supply {}",
        content.tokenomics.allocations.len(),
        content.tokenomics.total_percent(),
        content.tokenomics.total_supply
    );
    for milestone in &content.roadmap.milestones {
        println!(
            "  Roadmap: {} {} [{}]",
            milestone.period,
            milestone.title,
            milestone.status.label()
        );
    }
    println!();

    println!("Config:");
    println!("  File: {}", config_file_path().display());
    println!(
        "  Viewport: {}x{} @ {}fps",
        config.viewport.width, config.viewport.height, config.viewport.fps
    );
    println!(
        "  Particles: {} (seed: {})",
        config.particles.count,
        config
            .particles
            .seed
            .map_or_else(|| "random".to_string(), |s| s.to_string())
    );
    println!(
        "  Glitch: p={} for {}ms",
        config.reveal.glitch_probability, config.reveal.glitch_duration_ms
    );

    Ok(())
}
