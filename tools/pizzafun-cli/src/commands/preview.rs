//! Real-time run on the system clock.

use std::time::Duration;

use pizzafun_common::clock::{Clock, RateController, SystemClock};
use pizzafun_page_model::geometry::ViewportSize;
use pizzafun_pointer_tracker::ScriptedSource;
use pizzafun_render_engine::LandingPage;
use tokio::time::MissedTickBehavior;

use super::{random_source, Context};

pub async fn run(ctx: &Context, secs: f64, fps: Option<u32>) -> anyhow::Result<()> {
    anyhow::ensure!(secs > 0.0, "--secs must be positive");
    let mut config = ctx.config()?;
    if let Some(fps) = fps {
        config.viewport.fps = fps;
    }
    config.validate()?;
    let content = ctx.content()?;

    let clock = SystemClock::start();
    tracing::info!(started = clock.epoch_wall(), "Starting preview");
    let mut page = LandingPage::mount(content, &config, clock, random_source(None, &config))?;

    let viewport = ViewportSize::new(config.viewport.width, config.viewport.height);
    let mut source = ScriptedSource::fixed_at(viewport.center()).named("preview");

    let mut interval = tokio::time::interval(Duration::from_secs_f64(
        1.0 / f64::from(config.viewport.fps),
    ));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut progress_log = RateController::new(1);
    loop {
        interval.tick().await;
        page.pump(&mut source);
        page.frame();

        let elapsed = page.elapsed_secs();
        if progress_log.should_tick(page.clock().now_ns()) {
            tracing::info!(
                t = elapsed,
                counters = ?page.counter_values(),
                progress = page.reveal_progress(),
                "Preview"
            );
        }
        if page.is_idle() || elapsed >= secs {
            break;
        }
    }

    let frame = page.snapshot();
    println!("Preview finished after {:.2}s ({} frames)", frame.time_secs, page.frames());
    println!("  Idle: {}", page.is_idle());
    println!("  Kicker: {}", frame.kicker);
    for counter in &frame.counters {
        println!("  {:<24} {}", counter.label, counter.text);
    }

    page.unmount();
    Ok(())
}
