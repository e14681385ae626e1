//! The mounted landing page.
//!
//! [`LandingPage`] wires the pointer tracker, the motion mappers, the
//! reveal driver and the particle field together for one mount, and
//! captures their state as a [`PageFrame`] on demand.
//!
//! Frames are cooperative. The host calls [`LandingPage::frame`] once
//! per display frame; work happens only for frame callbacks that were
//! requested: reveal animations still running, and springs still in
//! motion. Once everything settles the page requests nothing and
//! [`LandingPage::is_idle`] turns true.

use std::rc::Rc;

use pizzafun_common::clock::{ns_to_secs, Clock, ManualClock, TimestampNs, NS_PER_SEC};
use pizzafun_common::config::AppConfig;
use pizzafun_common::error::PizzafunResult;
use pizzafun_common::random::RandomSource;
use pizzafun_motion_core::tilt::TiltSettings;
use pizzafun_motion_core::{
    HolographicCard, MagneticButton, MotionMapper, MotionState, ParticleField, PointerFollower,
    ScrollParallax,
};
use pizzafun_page_model::content::PageContent;
use pizzafun_page_model::event::InputEvent;
use pizzafun_page_model::geometry::{ElementBounds, Point2D, ViewportSize};
use pizzafun_pointer_tracker::{PointerSource, PointerSubscription, PointerTracker, PointerUpdate};
use pizzafun_reveal_engine::{
    AnimationId, CharacterReveal, FrameAnimation, FrameHandle, FrameScheduler, GlitchCounter,
    RevealDriver, StaggeredText,
};
use serde::Serialize;

use crate::page::{CounterFrame, PageFrame, ParticleSprite};

/// Nominal document height in viewport heights.
const DOCUMENT_HEIGHT_VIEWPORTS: f64 = 6.0;

/// Gap (px) between cards in a row.
const ROW_GAP: f64 = 32.0;

/// A card that tilts toward the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Stat(usize),
    Feature(usize),
    Chart,
    Tokenomics,
    Milestone(usize),
}

/// How many cards of each repeated kind the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceCounts {
    pub stats: usize,
    pub features: usize,
    pub milestones: usize,
}

impl SurfaceCounts {
    pub fn of(content: &PageContent) -> Self {
        Self {
            stats: content.hero.stats.len(),
            features: content.features.features.len(),
            milestones: content.roadmap.milestones.len(),
        }
    }
}

/// Where the pointer-reactive elements sit on screen.
///
/// Layout is nominal. In the first screen the stat cards sit at 58% of
/// its height and the call-to-action row at 78%. Feature cards follow one
/// screen further down, then the chart, the tokenomics card and the
/// roadmap, alternating sides. Everything is shifted up by the scroll
/// offset.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub primary_cta: ElementBounds,
    pub secondary_cta: ElementBounds,
    /// Every holographic card, stats first, in document order.
    pub surfaces: Vec<(Surface, ElementBounds)>,
}

/// `count` cards centred in one row at height `y`.
fn card_row(count: usize, width: f64, y: f64, max_card_w: f64, card_h: f64) -> Vec<ElementBounds> {
    let n = count.max(1) as f64;
    let card_w = ((width - 128.0 - ROW_GAP * (n - 1.0)) / n).clamp(120.0, max_card_w);
    let row_w = card_w * n + ROW_GAP * (n - 1.0);
    let left = (width - row_w) / 2.0;
    (0..count)
        .map(|i| {
            let cx = left + card_w / 2.0 + i as f64 * (card_w + ROW_GAP);
            ElementBounds::centered_at(Point2D::new(cx, y), card_w, card_h)
        })
        .collect()
}

impl PageLayout {
    pub fn compute(viewport: ViewportSize, counts: SurfaceCounts, scroll_progress: f64) -> Self {
        let (w, h) = (viewport.width, viewport.height);
        let scroll_offset =
            scroll_progress.clamp(0.0, 1.0) * (DOCUMENT_HEIGHT_VIEWPORTS - 1.0) * h;
        let y = |screens: f64| h * screens - scroll_offset;

        let cta_y = y(0.78);
        let primary_cta = ElementBounds::centered_at(Point2D::new(w / 2.0 - 140.0, cta_y), 260.0, 64.0);
        let secondary_cta =
            ElementBounds::centered_at(Point2D::new(w / 2.0 + 140.0, cta_y), 220.0, 64.0);

        let mut surfaces = Vec::new();
        let stats = card_row(counts.stats, w, y(0.58), 320.0, 180.0);
        surfaces.extend(stats.into_iter().enumerate().map(|(i, b)| (Surface::Stat(i), b)));
        let features = card_row(counts.features, w, y(1.45), 360.0, 420.0);
        surfaces.extend(features.into_iter().enumerate().map(|(i, b)| (Surface::Feature(i), b)));

        let side_w = (w * 0.45).min(640.0);
        surfaces.push((
            Surface::Chart,
            ElementBounds::centered_at(Point2D::new(w * 0.3, y(2.45)), side_w, 440.0),
        ));
        surfaces.push((
            Surface::Tokenomics,
            ElementBounds::centered_at(Point2D::new(w * 0.3, y(3.4)), side_w, 480.0),
        ));
        for i in 0..counts.milestones {
            let cx = if i % 2 == 0 { w / 2.0 - w / 4.0 } else { w / 2.0 + w / 4.0 };
            let cy = y(4.2) + i as f64 * 220.0;
            surfaces.push((
                Surface::Milestone(i),
                ElementBounds::centered_at(Point2D::new(cx, cy), w * 0.35, 180.0),
            ));
        }

        Self {
            primary_cta,
            secondary_cta,
            surfaces,
        }
    }

    pub fn bounds(&self, surface: Surface) -> Option<ElementBounds> {
        self.surfaces
            .iter()
            .find(|(s, _)| *s == surface)
            .map(|(_, b)| *b)
    }
}

/// What happened during one call to [`LandingPage::frame`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    pub now_ns: TimestampNs,
    /// Reveal callbacks that fired.
    pub reveal_callbacks: usize,
    /// Whether the springs were stepped.
    pub motion_stepped: bool,
    /// Requests waiting for the next frame.
    pub pending_requests: usize,
}

pub struct LandingPage<C: Clock> {
    content: PageContent,
    clock: C,
    rng: Box<dyn RandomSource>,

    tracker: PointerTracker,
    subscription: Option<PointerSubscription>,
    pointer: PointerUpdate,

    counts: SurfaceCounts,
    magnetic: Vec<MagneticButton>,
    surfaces: Vec<(Surface, HolographicCard)>,
    follower: PointerFollower,
    parallax: ScrollParallax,
    particles: ParticleField,

    driver: RevealDriver,
    kicker: AnimationId,
    headline: Vec<AnimationId>,
    counters: Vec<(usize, AnimationId)>,

    motion_frames: FrameScheduler<()>,
    motion_request: Option<FrameHandle>,
    last_motion_ns: TimestampNs,

    menu_open: bool,
    mounted_at_ns: TimestampNs,
    last_frame_ns: TimestampNs,
    frames: u64,
    mounted: bool,
}

impl<C: Clock> LandingPage<C> {
    /// Mount the page: subscribe to the pointer, build every animated
    /// component and request the first reveal frames.
    pub fn mount(
        content: PageContent,
        config: &AppConfig,
        clock: C,
        mut rng: Box<dyn RandomSource>,
    ) -> PizzafunResult<Self> {
        content.validate()?;
        config.validate()?;

        let viewport = ViewportSize::new(config.viewport.width, config.viewport.height);
        let tracker = PointerTracker::new(viewport);
        let subscription = tracker.subscribe();
        let pointer = tracker.current();

        let counts = SurfaceCounts::of(&content);
        let layout = PageLayout::compute(viewport, counts, 0.0);
        let motion = &config.motion;
        let magnetic = [layout.primary_cta, layout.secondary_cta]
            .into_iter()
            .map(|bounds| MagneticButton::with_strength(bounds, motion.magnetic_strength))
            .collect();
        let tilt = TiltSettings {
            max_degrees: motion.tilt_max_degrees,
            input_range_px: motion.tilt_input_range_px,
            hover_scale: motion.hover_scale,
        };
        let surfaces = layout
            .surfaces
            .iter()
            .map(|(surface, bounds)| (*surface, HolographicCard::with_settings(*bounds, tilt)))
            .collect();

        let particles = ParticleField::generate(config.particles.count, viewport, rng.as_mut());

        let reveal = &config.reveal;
        let mut driver = RevealDriver::new();
        let kicker = driver.add(
            "kicker",
            CharacterReveal::new(content.hero.kicker.as_str(), 0.0, reveal.typewriter_char_delay_ms),
        );
        let headline = content
            .hero
            .headline
            .iter()
            .enumerate()
            .map(|(i, line)| {
                driver.add(
                    format!("headline-{i}"),
                    StaggeredText::with_timing(
                        &line.text,
                        line.delay_secs,
                        reveal.stagger_char_delay_secs,
                        reveal.stagger_char_duration_secs,
                    ),
                )
            })
            .collect();
        let mut counters = Vec::with_capacity(content.hero.stats.len());
        for (i, stat) in content.hero.stats.iter().enumerate() {
            let counter = GlitchCounter::new(stat.target()?, stat.suffix.as_str())
                .with_duration(reveal.counter_duration_secs)
                .with_glitch(reveal.glitch_probability, reveal.glitch_duration_ms);
            counters.push((i, driver.add(format!("stat-{i}"), counter)));
        }

        let now = clock.now_ns();
        driver.mount(now);
        tracing::info!(
            t = now,
            width = viewport.width,
            height = viewport.height,
            animations = driver.len(),
            surfaces = layout.surfaces.len(),
            particles = particles.len(),
            "Landing page mounted"
        );

        Ok(Self {
            content,
            clock,
            rng,
            tracker,
            subscription: Some(subscription),
            pointer,
            counts,
            magnetic,
            surfaces,
            follower: PointerFollower::new(motion.follower_size_px),
            parallax: ScrollParallax::new(motion.scroll_max_scale),
            particles,
            driver,
            kicker,
            headline,
            counters,
            motion_frames: FrameScheduler::new(),
            motion_request: None,
            last_motion_ns: now,
            menu_open: false,
            mounted_at_ns: now,
            last_frame_ns: now,
            frames: 0,
            mounted: true,
        })
    }

    /// Deliver one input event.
    pub fn handle_event(&self, event: &InputEvent) {
        self.tracker.dispatch(event);
    }

    /// Deliver every event from `source` that is due now.
    pub fn pump(&self, source: &mut dyn PointerSource) -> usize {
        self.tracker.pump(source, self.clock.now_ns())
    }

    /// Run one display frame at the clock's current time.
    pub fn frame(&mut self) -> FrameReport {
        let now = self.clock.now_ns();
        if !self.mounted {
            return FrameReport {
                now_ns: now,
                reveal_callbacks: 0,
                motion_stepped: false,
                pending_requests: 0,
            };
        }

        let reveal_callbacks = self.driver.on_frame(now, self.rng.as_mut());

        let motion_fired = !self.motion_frames.begin_frame().is_empty();
        if motion_fired {
            self.motion_request = None;
        }

        let update = self.subscription.as_ref().and_then(|s| s.take_update());
        if let Some(update) = &update {
            self.apply_pointer(update);
        }

        if motion_fired {
            let dt = ns_to_secs(now.saturating_sub(self.last_motion_ns));
            for mapper in self.mappers_mut() {
                mapper.step(dt);
            }
        }
        if motion_fired || update.is_some() {
            self.last_motion_ns = now;
            if !self.motion_settled() && self.motion_request.is_none() {
                self.motion_request = Some(self.motion_frames.request(()));
            }
        }

        self.frames += 1;
        self.last_frame_ns = now;
        FrameReport {
            now_ns: now,
            reveal_callbacks,
            motion_stepped: motion_fired,
            pending_requests: self.pending_requests(),
        }
    }

    fn apply_pointer(&mut self, update: &PointerUpdate) {
        if update.viewport != self.pointer.viewport
            || update.scroll_progress != self.pointer.scroll_progress
        {
            let layout = PageLayout::compute(update.viewport, self.counts, update.scroll_progress);
            if let [primary, secondary] = self.magnetic.as_mut_slice() {
                primary.set_bounds(layout.primary_cta);
                secondary.set_bounds(layout.secondary_cta);
            }
            for ((_, card), (_, bounds)) in self.surfaces.iter_mut().zip(layout.surfaces) {
                card.set_bounds(bounds);
            }
        }
        self.pointer = *update;
        for mapper in self.mappers_mut() {
            mapper.observe(update);
        }
    }

    fn mappers_mut(&mut self) -> impl Iterator<Item = &mut dyn MotionMapper> {
        self.magnetic
            .iter_mut()
            .map(|m| m as &mut dyn MotionMapper)
            .chain(self.surfaces.iter_mut().map(|(_, c)| c as &mut dyn MotionMapper))
            .chain(std::iter::once(&mut self.follower as &mut dyn MotionMapper))
            .chain(std::iter::once(&mut self.parallax as &mut dyn MotionMapper))
    }

    fn motion_settled(&self) -> bool {
        self.magnetic.iter().all(|m| m.is_settled())
            && self.surfaces.iter().all(|(_, c)| c.is_settled())
            && self.follower.is_settled()
            && self.parallax.is_settled()
    }

    /// Open or close the compact navigation menu. Returns the new state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        tracing::debug!(open = self.menu_open, "Menu toggled");
        self.menu_open
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Current motion of every holographic card.
    pub fn surface_states(&self) -> impl Iterator<Item = (Surface, MotionState)> + '_ {
        self.surfaces.iter().map(|(surface, card)| (*surface, card.state()))
    }

    /// Current motion of the hero call-to-action buttons.
    pub fn cta_states(&self) -> Vec<MotionState> {
        self.magnetic.iter().map(|m| m.state()).collect()
    }

    /// Frame requests waiting for the next frame.
    pub fn pending_requests(&self) -> usize {
        self.driver.pending_requests() + self.motion_frames.pending()
    }

    /// Total frame requests made since mount.
    pub fn total_requests(&self) -> u64 {
        self.driver.total_requests() + self.motion_frames.total_requests()
    }

    /// Nothing left to animate until the next input event.
    pub fn is_idle(&self) -> bool {
        self.driver.is_complete() && self.motion_settled() && self.pending_requests() == 0
    }

    /// Seconds since mount as of the last frame.
    pub fn elapsed_secs(&self) -> f64 {
        ns_to_secs(self.last_frame_ns.saturating_sub(self.mounted_at_ns))
    }

    /// Capture the current animation state.
    pub fn snapshot(&self) -> PageFrame {
        let now = self.last_frame_ns;
        let t = self.elapsed_secs();

        let kicker = self
            .driver
            .get(self.kicker)
            .and_then(|a| a.as_typewriter())
            .map(|r| r.displayed().to_string())
            .unwrap_or_default();
        let headline = self
            .headline
            .iter()
            .filter_map(|id| self.driver.get(*id).and_then(|a| a.as_staggered()))
            .map(|text| text.glyphs())
            .collect();
        let counters = self
            .counters
            .iter()
            .filter_map(|(stat_index, id)| {
                let stat = self.content.hero.stats.get(*stat_index)?;
                let counter = self.driver.get(*id)?.as_counter()?;
                Some(CounterFrame::new(
                    stat,
                    counter.value(),
                    counter.target(),
                    counter.is_glitching(now),
                ))
            })
            .collect();
        let particles = self
            .particles
            .particles()
            .iter()
            .zip(self.particles.sample_all(t))
            .map(|(p, at)| ParticleSprite {
                left: at.position.x,
                top: at.position.y,
                width: p.width,
                height: p.height,
                color: p.tint.css_color().to_string(),
                scale: at.scale,
            })
            .collect();

        let mut frame = PageFrame::settled(&self.content);
        frame.kicker = kicker;
        frame.headline = headline;
        frame.counters = counters;
        frame.cta_transforms = self.magnetic.iter().map(|m| m.css_transform()).collect();
        frame.stat_transforms.clear();
        frame.card_transforms.clear();
        frame.roadmap_transforms.clear();
        for (surface, card) in &self.surfaces {
            let transform = card.css_transform();
            match surface {
                Surface::Stat(_) => frame.stat_transforms.push(transform),
                Surface::Feature(_) => frame.card_transforms.push(transform),
                Surface::Chart => frame.chart_transform = transform,
                Surface::Tokenomics => frame.tokenomics_transform = transform,
                Surface::Milestone(_) => frame.roadmap_transforms.push(transform),
            }
        }
        frame.follower = self
            .pointer
            .present
            .then(|| self.follower.css_transform());
        frame.background = self.parallax.css_transform();
        frame.menu_open = self.menu_open;
        frame.particles = particles;
        frame.apply_ambient(&self.content, t);
        frame
    }

    /// Release every subscription and cancel every frame request.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.driver.unmount();
        self.motion_request = None;
        let dropped = self.motion_frames.cancel_all();
        self.subscription = None;
        self.mounted = false;
        tracing::info!(
            frames = self.frames,
            requests = self.total_requests(),
            dropped_motion_frames = dropped,
            "Landing page unmounted"
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn driver(&self) -> &RevealDriver {
        &self.driver
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Counter values in hero order.
    pub fn counter_values(&self) -> Vec<u64> {
        self.counters
            .iter()
            .filter_map(|(_, id)| self.driver.get(*id)?.as_counter().map(|c| c.value()))
            .collect()
    }

    /// Overall reveal progress in `[0, 1]`.
    pub fn reveal_progress(&self) -> f64 {
        if self.driver.is_empty() {
            return 1.0;
        }
        let sum: f64 = self.driver.iter().map(|(_, a)| a.progress()).sum();
        sum / self.driver.len() as f64
    }
}

impl<C: Clock> Drop for LandingPage<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Outcome of a headless run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub reveal_callbacks: u64,
    pub motion_frames: u64,
    pub total_requests: u64,
    pub events_applied: u64,
    /// Time the page first went idle, if it did.
    pub idle_at_secs: Option<f64>,
    pub elapsed_secs: f64,
}

/// Drive `page` on a manual clock at `fps` until `until_ns` (or until it
/// is idle and `source` is exhausted when `until_ns` is `None`), never
/// past `limit_ns`.
pub fn run_headless(
    page: &mut LandingPage<Rc<ManualClock>>,
    source: &mut dyn PointerSource,
    fps: u32,
    until_ns: Option<TimestampNs>,
    limit_ns: TimestampNs,
) -> RunSummary {
    let clock = Rc::clone(page.clock());
    let interval = NS_PER_SEC / u64::from(fps.max(1));
    let mut summary = RunSummary {
        frames: 0,
        reveal_callbacks: 0,
        motion_frames: 0,
        total_requests: 0,
        events_applied: 0,
        idle_at_secs: None,
        elapsed_secs: 0.0,
    };

    loop {
        page.pump(source);
        let report = page.frame();
        summary.frames += 1;
        summary.reveal_callbacks += report.reveal_callbacks as u64;
        summary.motion_frames += u64::from(report.motion_stepped);

        if page.is_idle() && summary.idle_at_secs.is_none() {
            summary.idle_at_secs = Some(page.elapsed_secs());
        }
        if !page.is_idle() {
            summary.idle_at_secs = None;
        }

        let now = clock.now_ns();
        let done = match until_ns {
            Some(until) => now >= until,
            None => page.is_idle() && source.is_exhausted(),
        };
        if done || now >= limit_ns {
            break;
        }
        clock.advance_ns(interval);
    }

    summary.total_requests = page.total_requests();
    summary.events_applied = page.tracker().events_applied();
    summary.elapsed_secs = page.elapsed_secs();
    tracing::debug!(
        frames = summary.frames,
        idle_at = ?summary.idle_at_secs,
        source = source.name(),
        "Headless run finished"
    );
    summary
}
