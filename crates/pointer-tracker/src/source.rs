//! Input sources the tracker can drain.
//!
//! A real host pushes events as they happen; headless runs replay a
//! recorded or synthesized script against the clock instead.

use std::path::Path;

use pizzafun_common::clock::TimestampNs;
use pizzafun_common::error::PizzafunResult;
use pizzafun_page_model::event::{parse_events, InputEvent};
use pizzafun_page_model::geometry::Point2D;

/// Trait for pointer/scroll input sources.
pub trait PointerSource {
    /// Next event due at or before `now_ns`, if any.
    fn poll(&mut self, now_ns: TimestampNs) -> Option<InputEvent>;

    /// Source name for logging.
    fn name(&self) -> &str;

    /// Whether the source will never produce another event.
    fn is_exhausted(&self) -> bool;
}

/// Replays a fixed list of timestamped events in order.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    name: String,
    events: Vec<InputEvent>,
    index: usize,
}

impl ScriptedSource {
    /// Replay `events`. They are stably sorted by timestamp first so
    /// out-of-order input cannot reorder delivery within one timestamp.
    pub fn new(mut events: Vec<InputEvent>) -> Self {
        events.sort_by_key(|e| e.timestamp_ns);
        Self {
            name: "scripted".to_string(),
            events,
            index: 0,
        }
    }

    /// A source that never produces anything.
    pub fn empty() -> Self {
        Self::new(Vec::new()).named("empty")
    }

    /// Parse a JSONL recording.
    pub fn from_jsonl(jsonl: &str) -> PizzafunResult<Self> {
        Ok(Self::new(parse_events(jsonl)?).named("recording"))
    }

    /// Load a JSONL recording from disk.
    pub fn from_file(path: &Path) -> PizzafunResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let source = Self::from_jsonl(&content)?;
        tracing::info!(
            path = %path.display(),
            events = source.len(),
            "Loaded pointer recording"
        );
        Ok(source)
    }

    /// Pointer parked at `point` from the first frame on.
    pub fn fixed_at(point: Point2D) -> Self {
        Self::new(vec![InputEvent::pointer(0, point.x, point.y)]).named("fixed")
    }

    /// Pointer jumping between `center ± amplitude` (horizontally) every
    /// `interval_ns`, `count` times.
    pub fn alternating(center: Point2D, amplitude: f64, interval_ns: u64, count: usize) -> Self {
        let events = (0..count)
            .map(|i| {
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                InputEvent::pointer(
                    i as u64 * interval_ns,
                    center.x + sign * amplitude,
                    center.y + sign * amplitude,
                )
            })
            .collect();
        Self::new(events).named("alternating")
    }

    /// Rename the source (shows up in logs).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Total number of events in the script.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the script has no events at all.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the last scripted event.
    pub fn last_timestamp_ns(&self) -> Option<TimestampNs> {
        self.events.last().map(|e| e.timestamp_ns)
    }
}

impl PointerSource for ScriptedSource {
    fn poll(&mut self, now_ns: TimestampNs) -> Option<InputEvent> {
        let event = self.events.get(self.index)?;
        if event.timestamp_ns > now_ns {
            return None;
        }
        self.index += 1;
        Some(event.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_exhausted(&self) -> bool {
        self.index >= self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_respects_time() {
        let mut source = ScriptedSource::new(vec![
            InputEvent::pointer(5, 0.0, 0.0),
            InputEvent::leave(10),
        ]);
        assert!(source.poll(4).is_none());
        assert_eq!(source.poll(5), Some(InputEvent::pointer(5, 0.0, 0.0)));
        assert!(source.poll(9).is_none());
        assert!(!source.is_exhausted());
        assert_eq!(source.poll(10), Some(InputEvent::leave(10)));
        assert!(source.is_exhausted());
        assert!(source.poll(u64::MAX).is_none());
    }

    #[test]
    fn test_new_sorts_by_time() {
        let mut source = ScriptedSource::new(vec![
            InputEvent::leave(20),
            InputEvent::pointer(10, 1.0, 1.0),
        ]);
        assert_eq!(source.poll(100).unwrap().timestamp_ns, 10);
        assert_eq!(source.poll(100).unwrap().timestamp_ns, 20);
    }

    #[test]
    fn test_fixed_at() {
        let mut source = ScriptedSource::fixed_at(Point2D::new(600.0, 400.0));
        assert_eq!(source.name(), "fixed");
        let event = source.poll(0).unwrap();
        assert_eq!(event.pointer_position(), Some(Point2D::new(600.0, 400.0)));
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_alternating_pattern() {
        let source = ScriptedSource::alternating(Point2D::new(0.0, 0.0), 100.0, 16, 4);
        let xs: Vec<f64> = source
            .events
            .iter()
            .map(|e| e.pointer_position().unwrap().x)
            .collect();
        assert_eq!(xs, vec![100.0, -100.0, 100.0, -100.0]);
        assert_eq!(source.last_timestamp_ns(), Some(48));
    }

    #[test]
    fn test_from_jsonl() {
        let source = ScriptedSource::from_jsonl(
            "# session\n{\"t\":0,\"type\":\"pointer_move\",\"x\":1.0,\"y\":2.0}\n",
        )
        .unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.name(), "recording");
    }

    #[test]
    fn test_empty() {
        let mut source = ScriptedSource::empty();
        assert!(source.is_empty());
        assert!(source.is_exhausted());
        assert!(source.poll(0).is_none());
    }
}
