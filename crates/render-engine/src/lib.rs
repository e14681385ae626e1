//! PizzaFun Render Engine
//!
//! Mounts the landing page, drives its animations frame by frame and
//! renders the result as a static HTML document.
//!
//! # Pipeline Architecture
//!
//! ```text
//! input events ──► PointerTracker ──► motion mappers ──┐
//!                                   (springs)          │
//! frame clock ───► RevealDriver ──────────────────────┤
//!                  (typewriter, stagger, counters)     ├── PageFrame
//! seeded rng ────► ParticleField ─────────────────────┤
//!                  keyframe decorations ──────────────┘       │
//!                                                              ▼
//!                                          render_document (node tree)
//!                                                              │
//!                                                              ▼
//!                                                        index.html
//! ```

pub mod charts;
pub mod export;
pub mod node;
pub mod page;
pub mod runtime;

pub use export::{export_frame, export_html, ExportFormat, ExportReport};
pub use node::{Element, Node};
pub use page::{
    render_document, render_html, CounterFrame, PageFrame, NEUTRAL_MAGNETIC, NEUTRAL_TILT,
};
pub use runtime::{
    run_headless, FrameReport, LandingPage, PageLayout, RunSummary, Surface, SurfaceCounts,
};
