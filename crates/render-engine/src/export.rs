//! Writing rendered pages to disk.

use std::path::{Path, PathBuf};

use pizzafun_common::error::{PizzafunError, PizzafunResult};
use pizzafun_page_model::content::PageContent;
use serde::{Deserialize, Serialize};

use crate::page::{render_html, PageFrame};

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// A standalone HTML document.
    Html,
    /// The captured [`PageFrame`] as pretty-printed JSON.
    FrameJson,
}

impl ExportFormat {
    /// Guess the format from a file extension. Defaults to HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::FrameJson,
            _ => ExportFormat::Html,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::FrameJson => "json",
        }
    }
}

/// Result of a finished export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub bytes: usize,
    /// Page time the frame was captured at.
    pub time_secs: f64,
}

/// Serialize `frame` in `format`.
pub fn render_frame(
    content: &PageContent,
    frame: &PageFrame,
    format: ExportFormat,
) -> PizzafunResult<String> {
    match format {
        ExportFormat::Html => Ok(render_html(content, frame)),
        ExportFormat::FrameJson => Ok(serde_json::to_string_pretty(frame)?),
    }
}

/// Write `frame` to `output_path`, creating parent directories as needed.
pub fn export_frame(
    content: &PageContent,
    frame: &PageFrame,
    output_path: &Path,
    format: ExportFormat,
) -> PizzafunResult<ExportReport> {
    if output_path.as_os_str().is_empty() {
        return Err(PizzafunError::render("Output path is empty"));
    }
    if output_path.is_dir() {
        return Err(PizzafunError::render(format!(
            "Output path is a directory: {}",
            output_path.display()
        )));
    }

    let body = render_frame(content, frame, format)?;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, &body)?;

    tracing::info!(
        output = %output_path.display(),
        format = ?format,
        bytes = body.len(),
        t = frame.time_secs,
        "Exported page"
    );

    Ok(ExportReport {
        path: output_path.to_path_buf(),
        format,
        bytes: body.len(),
        time_secs: frame.time_secs,
    })
}

/// Write the page as HTML.
pub fn export_html(
    content: &PageContent,
    frame: &PageFrame,
    output_path: &Path,
) -> PizzafunResult<ExportReport> {
    export_frame(content, frame, output_path, ExportFormat::Html)
}
