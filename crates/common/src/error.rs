//! Error types shared across PizzaFun crates.
//!
//! The animation core never fails: pointer coordinates, scroll progress
//! and elapsed time are well formed by construction. Errors only come
//! from the outer layers (config files, event recordings, content
//! validation, HTML export).

use std::path::PathBuf;

/// Top-level error type for PizzaFun operations.
#[derive(Debug, thiserror::Error)]
pub enum PizzafunError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Content error: {message}")]
    Content { message: String },

    #[error("Event stream error on line {line}: {message}")]
    Events { line: usize, message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PizzafunError.
pub type PizzafunResult<T> = Result<T, PizzafunError>;

impl PizzafunError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content {
            message: msg.into(),
        }
    }

    pub fn events(line: usize, msg: impl Into<String>) -> Self {
        Self::Events {
            line,
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }
}
