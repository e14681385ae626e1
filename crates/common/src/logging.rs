//! Logging and tracing initialization.

use crate::config::LoggingConfig;

/// Workspace crates whose events `--verbose` raises to `debug`.
const PIZZAFUN_TARGETS: &[&str] = &[
    "pizzafun",
    "pizzafun_common",
    "pizzafun_page_model",
    "pizzafun_pointer_tracker",
    "pizzafun_motion_core",
    "pizzafun_reveal_engine",
    "pizzafun_render_engine",
];

/// The filter for one run: the configured level, with the PizzaFun
/// crates at `debug` when `verbose` is set. Dependencies keep the
/// configured level either way.
pub fn filter_directives(config: &LoggingConfig, verbose: bool) -> String {
    let base = config.level.trim();
    let base = if base.is_empty() { "info" } else { base };
    if !verbose {
        return base.to_string();
    }
    let mut directives = vec![base.to_string()];
    directives.extend(PIZZAFUN_TARGETS.iter().map(|t| format!("{t}=debug")));
    directives.join(",")
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` overrides the computed filter. Logs go to stderr so command
/// output on stdout stays machine readable.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let directives = filter_directives(config, verbose);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default(), false);
}
