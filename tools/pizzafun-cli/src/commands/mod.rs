//! Subcommands and the setup they share.

pub mod check;
pub mod info;
pub mod init;
pub mod preview;
pub mod render;
pub mod simulate;

use std::path::PathBuf;

use pizzafun_common::config::{config_file_path, AppConfig, LoggingConfig};
use pizzafun_common::random::SeededRandom;
use pizzafun_page_model::content::PageContent;

/// Global options resolved once per invocation.
pub struct Context {
    config_path: Option<PathBuf>,
    content_path: Option<PathBuf>,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>, content_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            content_path,
        }
    }

    /// The explicit config file if given, otherwise the standard one
    /// (or defaults when it is missing or broken).
    pub fn config(&self) -> anyhow::Result<AppConfig> {
        match &self.config_path {
            Some(path) => AppConfig::load_from(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display())),
            None => Ok(AppConfig::load()),
        }
    }

    /// The logging section, read before a subscriber exists. Problems
    /// with the file are reported later by [`Context::config`].
    pub fn logging(&self) -> LoggingConfig {
        let path = self.config_path.clone().unwrap_or_else(config_file_path);
        AppConfig::load_from(&path)
            .map(|config| config.logging)
            .unwrap_or_default()
    }

    pub fn content(&self) -> anyhow::Result<PageContent> {
        match &self.content_path {
            Some(path) => PageContent::load(path)
                .map_err(|e| anyhow::anyhow!("Failed to load content {}: {e}", path.display())),
            None => Ok(PageContent::pizzafun()),
        }
    }
}

/// Seeded randomness: the flag wins over the config; neither means a
/// time-based seed, which is logged so the run can be reproduced.
pub fn random_source(seed: Option<u64>, config: &AppConfig) -> Box<SeededRandom> {
    let rng = SeededRandom::from_optional_seed(seed.or(config.particles.seed));
    tracing::debug!(seed = rng.seed(), "Random source ready");
    Box::new(rng)
}
