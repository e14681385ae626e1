//! Input event types delivered by the host environment.
//!
//! Recordings are stored as JSONL, one event per line, so a pointer
//! session can be replayed against the page deterministically. Lines
//! starting with `#` are comments.

use serde::{Deserialize, Serialize};

use pizzafun_common::clock::TimestampNs;
use pizzafun_common::error::{PizzafunError, PizzafunResult};

use crate::geometry::{Point2D, ViewportSize};

/// A single input event with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Monotonic nanoseconds since the page was mounted.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The event payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Discriminated union of event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Pointer moved to viewport coordinates `(x, y)`.
    PointerMove { x: f64, y: f64 },

    /// Pointer left the page.
    PointerLeave,

    /// Page scrolled; `progress` is the scroll fraction in `[0, 1]`.
    Scroll { progress: f64 },

    /// Viewport resized.
    Resize { width: f64, height: f64 },
}

impl InputEvent {
    /// Create a pointer-move event.
    pub fn pointer(timestamp_ns: TimestampNs, x: f64, y: f64) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::PointerMove { x, y },
        }
    }

    /// Create a pointer-leave event.
    pub fn leave(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::PointerLeave,
        }
    }

    /// Create a scroll event.
    pub fn scroll(timestamp_ns: TimestampNs, progress: f64) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::Scroll { progress },
        }
    }

    /// Create a resize event.
    pub fn resize(timestamp_ns: TimestampNs, width: f64, height: f64) -> Self {
        Self {
            timestamp_ns,
            kind: EventKind::Resize { width, height },
        }
    }

    /// Timestamp as fractional seconds since mount.
    pub fn timestamp_secs(&self) -> f64 {
        pizzafun_common::clock::ns_to_secs(self.timestamp_ns)
    }

    /// Extract pointer position if this event carries one.
    pub fn pointer_position(&self) -> Option<Point2D> {
        match self.kind {
            EventKind::PointerMove { x, y } => Some(Point2D::new(x, y)),
            _ => None,
        }
    }

    /// Extract the viewport size if this is a resize.
    pub fn viewport_size(&self) -> Option<ViewportSize> {
        match self.kind {
            EventKind::Resize { width, height } => Some(ViewportSize::new(width, height)),
            _ => None,
        }
    }
}

/// Parse events from JSONL content (one JSON object per line).
///
/// Errors report the 1-based line number of the offending line. Events
/// must be in non-decreasing timestamp order.
pub fn parse_events(jsonl: &str) -> PizzafunResult<Vec<InputEvent>> {
    let mut events = Vec::new();
    let mut last_ts = 0;

    for (index, raw) in jsonl.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: InputEvent = serde_json::from_str(line)
            .map_err(|e| PizzafunError::events(index + 1, e.to_string()))?;
        if event.timestamp_ns < last_ts {
            return Err(PizzafunError::events(
                index + 1,
                format!(
                    "timestamp {} goes backwards (previous {})",
                    event.timestamp_ns, last_ts
                ),
            ));
        }
        last_ts = event.timestamp_ns;
        events.push(event);
    }

    Ok(events)
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[InputEvent]) -> PizzafunResult<String> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
