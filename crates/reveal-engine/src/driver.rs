//! Owns a page's reveal animations and their frame requests.

use pizzafun_common::clock::TimestampNs;
use pizzafun_common::random::RandomSource;

use crate::counter::GlitchCounter;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::staggered::StaggeredText;
use crate::typewriter::CharacterReveal;
use crate::{AnimationPhase, FrameAnimation, FrameContext};

/// Index of an animation inside its driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(usize);

impl AnimationId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Every kind of animation the driver can run.
#[derive(Debug, Clone)]
pub enum RevealAnimation {
    Typewriter(CharacterReveal),
    Staggered(StaggeredText),
    Counter(GlitchCounter),
}

impl RevealAnimation {
    pub fn kind(&self) -> &'static str {
        match self {
            RevealAnimation::Typewriter(_) => "typewriter",
            RevealAnimation::Staggered(_) => "staggered",
            RevealAnimation::Counter(_) => "counter",
        }
    }

    pub fn as_typewriter(&self) -> Option<&CharacterReveal> {
        match self {
            RevealAnimation::Typewriter(reveal) => Some(reveal),
            _ => None,
        }
    }

    pub fn as_staggered(&self) -> Option<&StaggeredText> {
        match self {
            RevealAnimation::Staggered(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_counter(&self) -> Option<&GlitchCounter> {
        match self {
            RevealAnimation::Counter(counter) => Some(counter),
            _ => None,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn FrameAnimation {
        match self {
            RevealAnimation::Typewriter(a) => a,
            RevealAnimation::Staggered(a) => a,
            RevealAnimation::Counter(a) => a,
        }
    }

    fn inner(&self) -> &dyn FrameAnimation {
        match self {
            RevealAnimation::Typewriter(a) => a,
            RevealAnimation::Staggered(a) => a,
            RevealAnimation::Counter(a) => a,
        }
    }
}

impl FrameAnimation for RevealAnimation {
    fn advance(&mut self, frame: &mut FrameContext<'_>) -> AnimationPhase {
        self.inner_mut().advance(frame)
    }

    fn phase(&self) -> AnimationPhase {
        self.inner().phase()
    }

    fn progress(&self) -> f64 {
        self.inner().progress()
    }
}

impl From<CharacterReveal> for RevealAnimation {
    fn from(reveal: CharacterReveal) -> Self {
        RevealAnimation::Typewriter(reveal)
    }
}

impl From<StaggeredText> for RevealAnimation {
    fn from(text: StaggeredText) -> Self {
        RevealAnimation::Staggered(text)
    }
}

impl From<GlitchCounter> for RevealAnimation {
    fn from(counter: GlitchCounter) -> Self {
        RevealAnimation::Counter(counter)
    }
}

#[derive(Debug)]
struct Slot {
    name: String,
    animation: RevealAnimation,
    request: Option<FrameHandle>,
}

/// Runs a set of named animations off one [`FrameScheduler`].
///
/// `mount` requests a first frame for every animation. Each frame,
/// animations whose callback fired are advanced and, if still running,
/// request the next frame. Completed animations request nothing more;
/// `unmount` withdraws whatever is still pending.
#[derive(Debug, Default)]
pub struct RevealDriver {
    slots: Vec<Slot>,
    scheduler: FrameScheduler<AnimationId>,
    mounted: bool,
}

impl RevealDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation. Animations added after mount start on the
    /// next frame.
    pub fn add(&mut self, name: impl Into<String>, animation: impl Into<RevealAnimation>) -> AnimationId {
        let id = AnimationId(self.slots.len());
        let request = self.mounted.then(|| self.scheduler.request(id));
        self.slots.push(Slot {
            name: name.into(),
            animation: animation.into(),
            request,
        });
        id
    }

    pub fn mount(&mut self, now_ns: TimestampNs) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.animation.phase().is_complete() {
                slot.request = Some(self.scheduler.request(AnimationId(index)));
            }
        }
        tracing::debug!(
            t = now_ns,
            animations = self.slots.len(),
            "Reveal animations mounted"
        );
    }

    /// Run one frame. Returns how many callbacks fired.
    pub fn on_frame(&mut self, now_ns: TimestampNs, rng: &mut dyn RandomSource) -> usize {
        let fired = self.scheduler.begin_frame();
        let mut frame = FrameContext::new(now_ns, rng);

        for id in &fired {
            let Some(slot) = self.slots.get_mut(id.0) else {
                continue;
            };
            slot.request = None;
            match slot.animation.advance(&mut frame) {
                AnimationPhase::Complete => {
                    tracing::debug!(
                        t = now_ns,
                        name = %slot.name,
                        kind = slot.animation.kind(),
                        "Reveal animation complete"
                    );
                }
                AnimationPhase::Idle | AnimationPhase::Running => {
                    slot.request = Some(self.scheduler.request(*id));
                }
            }
        }

        fired.len()
    }

    /// Cancel every outstanding frame request.
    pub fn unmount(&mut self) {
        let mut cancelled = 0;
        for slot in &mut self.slots {
            if let Some(handle) = slot.request.take() {
                if self.scheduler.cancel(handle) {
                    cancelled += 1;
                }
            }
        }
        self.mounted = false;
        tracing::debug!(cancelled, "Reveal animations unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether every animation has completed.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.animation.phase().is_complete())
    }

    pub fn get(&self, id: AnimationId) -> Option<&RevealAnimation> {
        self.slots.get(id.0).map(|s| &s.animation)
    }

    pub fn find(&self, name: &str) -> Option<&RevealAnimation> {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.animation)
    }

    /// `(name, animation)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RevealAnimation)> {
        self.slots.iter().map(|s| (s.name.as_str(), &s.animation))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn pending_requests(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn total_requests(&self) -> u64 {
        self.scheduler.total_requests()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzafun_common::clock::NS_PER_MS;
    use pizzafun_common::random::SequenceRandom;

    const FRAME_NS: u64 = 16 * NS_PER_MS;

    fn driver() -> RevealDriver {
        let mut driver = RevealDriver::new();
        driver.add("kicker", CharacterReveal::new("PIZZA", 0.0, 50));
        driver.add("headline", StaggeredText::new("FUN", 0.5));
        driver.add("tps", GlitchCounter::new(35_000, "TPS"));
        driver
    }

    #[test]
    fn test_nothing_runs_before_mount() {
        let mut driver = driver();
        let mut rng = SequenceRandom::constant(0.5);
        assert_eq!(driver.pending_requests(), 0);
        assert_eq!(driver.on_frame(0, &mut rng), 0);
        assert_eq!(
            driver.find("tps").map(|a| a.phase()),
            Some(AnimationPhase::Idle)
        );
    }

    #[test]
    fn test_runs_to_completion_and_goes_quiet() {
        let mut driver = driver();
        let mut rng = SequenceRandom::constant(0.5);
        driver.mount(0);
        assert_eq!(driver.pending_requests(), 3);

        let mut now = 0;
        while !driver.is_complete() {
            driver.on_frame(now, &mut rng);
            now += FRAME_NS;
            assert!(now < 10_000 * NS_PER_MS, "animations never completed");
        }
        assert_eq!(driver.pending_requests(), 0);
        let requests = driver.total_requests();

        for _ in 0..10 {
            assert_eq!(driver.on_frame(now, &mut rng), 0);
            now += FRAME_NS;
        }
        assert_eq!(driver.total_requests(), requests);

        let counter = driver.find("tps").and_then(|a| a.as_counter()).unwrap();
        assert_eq!(counter.value(), 35_000);
        let kicker = driver.find("kicker").and_then(|a| a.as_typewriter()).unwrap();
        assert_eq!(kicker.displayed(), "PIZZA");
    }

    #[test]
    fn test_unmount_cancels_pending() {
        let mut driver = driver();
        let mut rng = SequenceRandom::constant(0.5);
        driver.mount(0);
        driver.on_frame(0, &mut rng);
        assert_eq!(driver.pending_requests(), 3);

        driver.unmount();
        assert_eq!(driver.pending_requests(), 0);
        assert!(!driver.is_mounted());
        assert_eq!(driver.on_frame(FRAME_NS, &mut rng), 0);
    }

    #[test]
    fn test_add_after_mount_starts_next_frame() {
        let mut driver = RevealDriver::new();
        let mut rng = SequenceRandom::constant(0.5);
        driver.mount(0);
        let id = driver.add("late", GlitchCounter::new(5, "").with_duration(0.0));
        assert_eq!(driver.pending_requests(), 1);
        driver.on_frame(0, &mut rng);
        assert!(driver.get(id).unwrap().phase().is_complete());
        assert_eq!(driver.pending_requests(), 0);
    }

    #[test]
    fn test_remount_resumes_incomplete() {
        let mut driver = driver();
        let mut rng = SequenceRandom::constant(0.5);
        driver.mount(0);
        driver.on_frame(0, &mut rng);
        driver.unmount();
        driver.mount(FRAME_NS);
        assert_eq!(driver.pending_requests(), 3);
    }
}
