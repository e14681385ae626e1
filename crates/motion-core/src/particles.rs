//! Floating background particles.
//!
//! Each particle travels linearly from a random start to a random end
//! inside the viewport, looping forever, while its scale swells from 0
//! to 1 and back within every pass. The set is drawn from a
//! [`RandomSource`] when the page mounts and never changes afterwards.

use pizzafun_common::random::RandomSource;
use pizzafun_page_model::geometry::{Point2D, ViewportSize};
use serde::{Deserialize, Serialize};

/// Particles on the hero background.
pub const DEFAULT_PARTICLE_COUNT: usize = 30;

const MIN_SIZE_PX: f64 = 1.0;
const MAX_SIZE_PX: f64 = 5.0;
const MIN_DURATION_SECS: f64 = 10.0;
const MAX_DURATION_SECS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleTint {
    Orange,
    Purple,
}

impl ParticleTint {
    pub fn css_color(&self) -> &'static str {
        match self {
            ParticleTint::Orange => "rgba(255, 147, 37, 0.6)",
            ParticleTint::Purple => "rgba(147, 51, 234, 0.4)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub width: f64,
    pub height: f64,
    pub tint: ParticleTint,
    pub from: Point2D,
    pub to: Point2D,
    pub duration_secs: f64,
}

/// Where a particle is and how big it is at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleFrame {
    pub position: Point2D,
    pub scale: f64,
}

impl Particle {
    /// Draw one particle inside `viewport`.
    pub fn random(viewport: ViewportSize, rng: &mut dyn RandomSource) -> Self {
        let width = rng.range(MIN_SIZE_PX, MAX_SIZE_PX);
        let height = rng.range(MIN_SIZE_PX, MAX_SIZE_PX);
        let tint = if rng.chance(0.5) {
            ParticleTint::Orange
        } else {
            ParticleTint::Purple
        };
        let from = Point2D::new(rng.range(0.0, viewport.width), rng.range(0.0, viewport.height));
        let to = Point2D::new(rng.range(0.0, viewport.width), rng.range(0.0, viewport.height));
        let duration_secs = rng.range(MIN_DURATION_SECS, MAX_DURATION_SECS);
        Self {
            width,
            height,
            tint,
            from,
            to,
            duration_secs,
        }
    }

    /// Fraction of the current pass completed at `t_secs` after mount.
    pub fn progress(&self, t_secs: f64) -> f64 {
        if !(t_secs > 0.0) || !(self.duration_secs > 0.0) {
            return 0.0;
        }
        (t_secs % self.duration_secs) / self.duration_secs
    }

    pub fn sample(&self, t_secs: f64) -> ParticleFrame {
        let p = self.progress(t_secs);
        ParticleFrame {
            position: Point2D::lerp(&self.from, &self.to, p),
            scale: 1.0 - (2.0 * p - 1.0).abs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParticleField {
    viewport: ViewportSize,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn generate(count: usize, viewport: ViewportSize, rng: &mut dyn RandomSource) -> Self {
        let particles = (0..count).map(|_| Particle::random(viewport, rng)).collect();
        tracing::debug!(
            count,
            width = viewport.width,
            height = viewport.height,
            "Generated particle field"
        );
        Self {
            viewport,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn sample_all(&self, t_secs: f64) -> Vec<ParticleFrame> {
        self.particles.iter().map(|p| p.sample(t_secs)).collect()
    }
}
