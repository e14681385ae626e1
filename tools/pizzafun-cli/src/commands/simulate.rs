//! Deterministic headless run.

use std::path::PathBuf;
use std::rc::Rc;

use pizzafun_common::clock::{secs_to_ns, ManualClock, NS_PER_SEC};
use pizzafun_page_model::geometry::ViewportSize;
use pizzafun_pointer_tracker::{PointerSource, ScriptedSource};
use pizzafun_render_engine::{run_headless, LandingPage, RunSummary};
use serde::Serialize;

use super::{random_source, Context};

/// Hard stop when simulating until idle.
const IDLE_LIMIT_SECS: u64 = 120;

#[derive(Serialize)]
struct SimulationReport {
    seed: Option<u64>,
    fps: u32,
    #[serde(flatten)]
    run: RunSummary,
    idle: bool,
    reveal_progress: f64,
    counters: Vec<CounterReport>,
    glitches: u64,
}

#[derive(Serialize)]
struct CounterReport {
    label: String,
    value: u64,
    target: u64,
}

pub fn run(
    ctx: &Context,
    secs: Option<f64>,
    fps: Option<u32>,
    events: Option<PathBuf>,
    seed: Option<u64>,
    glitch: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = ctx.config()?;
    if let Some(fps) = fps {
        config.viewport.fps = fps;
    }
    if let Some(glitch) = glitch {
        config.reveal.glitch_probability = glitch;
    }
    config.validate()?;
    let content = ctx.content()?;

    let mut source = match &events {
        Some(path) => ScriptedSource::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load events {}: {e}", path.display()))?,
        None => {
            let viewport = ViewportSize::new(config.viewport.width, config.viewport.height);
            ScriptedSource::fixed_at(viewport.center())
        }
    };

    let clock = Rc::new(ManualClock::new());
    let rng = random_source(seed, &config);
    let seed = Some(rng.seed());
    let mut page = LandingPage::mount(content, &config, Rc::clone(&clock), rng)?;

    let until = secs.map(secs_to_ns);
    let limit = until.unwrap_or(0).max(IDLE_LIMIT_SECS * NS_PER_SEC);
    let summary = run_headless(&mut page, &mut source, config.viewport.fps, until, limit);

    let counters: Vec<CounterReport> = page
        .snapshot()
        .counters
        .into_iter()
        .map(|c| CounterReport {
            label: c.label,
            value: c.value,
            target: c.target,
        })
        .collect();
    let glitches = page
        .driver()
        .iter()
        .filter_map(|(_, a)| a.as_counter())
        .map(|c| c.glitch_count())
        .sum();

    let report = SimulationReport {
        seed,
        fps: config.viewport.fps,
        run: summary,
        idle: page.is_idle(),
        reveal_progress: page.reveal_progress(),
        counters,
        glitches,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Simulation ({})", source.name());
    println!("{}", "=".repeat(50));
    println!("  Seed: {}", report.seed.unwrap_or_default());
    println!(
        "  Simulated: {:.3}s @ {}fps ({} frames)",
        report.run.elapsed_secs, report.fps, report.run.frames
    );
    println!("  Events applied: {}", report.run.events_applied);
    println!(
        "  Frame callbacks: {} reveal, {} motion ({} requests)",
        report.run.reveal_callbacks, report.run.motion_frames, report.run.total_requests
    );
    match report.run.idle_at_secs {
        Some(t) => println!("  Idle since: {t:.3}s"),
        None => println!("  Idle since: still animating"),
    }
    println!("  Reveal progress: {:.1}%", report.reveal_progress * 100.0);
    println!("  Glitches: {}", report.glitches);
    println!();
    println!("Counters:");
    for c in &report.counters {
        println!("  {:<24} {:>8} / {}", c.label, c.value, c.target);
    }

    Ok(())
}
