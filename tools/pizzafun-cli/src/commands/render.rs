//! Render the page to a file.

use std::path::PathBuf;
use std::rc::Rc;

use pizzafun_common::clock::{secs_to_ns, ManualClock, NS_PER_SEC};
use pizzafun_page_model::geometry::ViewportSize;
use pizzafun_pointer_tracker::ScriptedSource;
use pizzafun_render_engine::{export_frame, run_headless, ExportFormat, LandingPage};

use super::{random_source, Context};

/// Longest a render will simulate while waiting for the page to settle.
const SETTLE_LIMIT_SECS: u64 = 60;

pub fn run(
    ctx: &Context,
    output: PathBuf,
    at: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    if let Some(at) = at {
        anyhow::ensure!(at >= 0.0, "--at must not be negative");
    }

    let mut config = ctx.config()?;
    if let Some(width) = width {
        config.viewport.width = width;
    }
    if let Some(height) = height {
        config.viewport.height = height;
    }
    config.validate()?;
    let content = ctx.content()?;

    let clock = Rc::new(ManualClock::new());
    let rng = random_source(seed, &config);
    let mut page = LandingPage::mount(content, &config, Rc::clone(&clock), rng)?;

    let viewport = ViewportSize::new(config.viewport.width, config.viewport.height);
    let mut source = ScriptedSource::fixed_at(viewport.center());
    let until = at.map(secs_to_ns);
    let limit = until.unwrap_or(0).max(SETTLE_LIMIT_SECS * NS_PER_SEC);
    let summary = run_headless(&mut page, &mut source, config.viewport.fps, until, limit);
    if at.is_none() && summary.idle_at_secs.is_none() {
        tracing::warn!(
            limit_secs = SETTLE_LIMIT_SECS,
            "Page did not settle, rendering the last frame"
        );
    }

    let frame = page.snapshot();
    let format = ExportFormat::from_path(&output);
    let report = export_frame(page.content(), &frame, &output, format)?;

    println!("Rendered {}", report.path.display());
    println!("  Format: {:?}", report.format);
    println!("  Size: {} bytes", report.bytes);
    println!("  Captured at: {:.3}s ({} frames)", report.time_secs, summary.frames);
    println!(
        "  Viewport: {}x{}",
        config.viewport.width, config.viewport.height
    );

    Ok(())
}
