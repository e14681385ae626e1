//! Application configuration.
//!
//! Every tunable of the page's effects lives here so the CLI, the
//! runtime and tests agree on one set of defaults. All sections use
//! `#[serde(default)]`, so a config file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PizzafunError, PizzafunResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Simulated viewport.
    pub viewport: ViewportSettings,

    /// Pointer-driven motion parameters.
    pub motion: MotionSettings,

    /// Text reveal and counter timing.
    pub reveal: RevealSettings,

    /// Background particle field.
    pub particles: ParticleSettings,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Viewport used when no host reports one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Width in CSS pixels.
    pub width: f64,

    /// Height in CSS pixels.
    pub height: f64,

    /// Frame rate of the render loop (Hz).
    pub fps: u32,
}

/// Motion mapping parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Fraction of the pointer offset a magnetic button follows.
    pub magnetic_strength: f64,

    /// Maximum card tilt in degrees.
    pub tilt_max_degrees: f64,

    /// Pointer offset (px) that produces the maximum tilt.
    pub tilt_input_range_px: f64,

    /// Card scale while hovered.
    pub hover_scale: f64,

    /// Diameter of the pointer follower dot (px).
    pub follower_size_px: f64,

    /// Page scale reached at full scroll.
    pub scroll_max_scale: f64,
}

/// Timed reveal parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    /// Delay between typewriter characters (ms).
    pub typewriter_char_delay_ms: u64,

    /// Stagger between animated headline characters (seconds).
    pub stagger_char_delay_secs: f64,

    /// Duration of each headline character transition (seconds).
    pub stagger_char_duration_secs: f64,

    /// Duration of stat counters (seconds).
    pub counter_duration_secs: f64,

    /// Per-frame probability of a counter glitch.
    pub glitch_probability: f64,

    /// How long a glitch stays visible (ms).
    pub glitch_duration_ms: u64,
}

/// Particle field parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Number of particles.
    pub count: usize,

    /// Fixed seed for particle and glitch randomness. `None` seeds from
    /// the wall clock at mount.
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "pizzafun=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            fps: 60,
        }
    }
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            magnetic_strength: 0.15,
            tilt_max_degrees: 15.0,
            tilt_input_range_px: 300.0,
            hover_scale: 1.05,
            follower_size_px: 24.0,
            scroll_max_scale: 1.2,
        }
    }
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            typewriter_char_delay_ms: 50,
            stagger_char_delay_secs: 0.05,
            stagger_char_duration_secs: 0.8,
            counter_duration_secs: 2.0,
            glitch_probability: 0.1,
            glitch_duration_ms: 100,
        }
    }
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 30,
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> PizzafunResult<Self> {
        if !path.exists() {
            return Err(PizzafunError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> PizzafunResult<PathBuf> {
        let path = config_file_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> PizzafunResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values that would make the effects meaningless.
    pub fn validate(&self) -> PizzafunResult<()> {
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(PizzafunError::config("viewport dimensions must be positive"));
        }
        if self.viewport.fps == 0 {
            return Err(PizzafunError::config("viewport.fps must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.reveal.glitch_probability) {
            return Err(PizzafunError::config(
                "reveal.glitch_probability must be within [0, 1]",
            ));
        }
        if !(self.reveal.counter_duration_secs >= 0.0) {
            return Err(PizzafunError::config(
                "reveal.counter_duration_secs must not be negative",
            ));
        }
        if !(self.motion.tilt_input_range_px > 0.0) {
            return Err(PizzafunError::config(
                "motion.tilt_input_range_px must be positive",
            ));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("pizzafun").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page() {
        let config = AppConfig::default();
        assert_eq!(config.reveal.typewriter_char_delay_ms, 50);
        assert_eq!(config.reveal.glitch_duration_ms, 100);
        assert!((config.reveal.glitch_probability - 0.1).abs() < 1e-12);
        assert!((config.motion.magnetic_strength - 0.15).abs() < 1e-12);
        assert_eq!(config.particles.count, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "reveal": { "glitch_probability": 0.0 } }"#).unwrap();
        assert_eq!(config.reveal.glitch_probability, 0.0);
        assert_eq!(config.reveal.typewriter_char_delay_ms, 50);
        assert_eq!(config.viewport, ViewportSettings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.particles.seed = Some(42);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_out_of_range_probability() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "reveal": { "glitch_probability": 2.5 } }"#).unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, PizzafunError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load_from(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, PizzafunError::FileNotFound { .. }));
    }
}
