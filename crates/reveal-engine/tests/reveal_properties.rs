//! Timing properties of the reveal animations, exercised through the
//! public frame-driving API.

use pizzafun_common::clock::{Clock, ManualClock, NS_PER_MS};
use pizzafun_common::random::{SeededRandom, SequenceRandom};
use pizzafun_reveal_engine::{
    AnimationPhase, CharacterReveal, FrameAnimation, FrameContext, GlitchCounter, RevealDriver,
};
use proptest::prelude::*;

fn advance<A: FrameAnimation>(animation: &mut A, now_ns: u64) -> AnimationPhase {
    let mut rng = SequenceRandom::constant(0.5);
    animation.advance(&mut FrameContext::new(now_ns, &mut rng))
}

proptest! {
    #[test]
    fn counter_matches_closed_form(
        target in 0u64..1_000_000,
        duration_ms in 1u64..5_000,
        elapsed_ms in 0u64..10_000,
    ) {
        let mut counter = GlitchCounter::new(target, "").with_duration(duration_ms as f64 / 1000.0);
        advance(&mut counter, 0);
        advance(&mut counter, elapsed_ms * NS_PER_MS);

        let fraction = (elapsed_ms as f64 / duration_ms as f64).min(1.0);
        let expected = (fraction * target as f64).floor() as u64;
        prop_assert_eq!(counter.value(), expected);
        if elapsed_ms >= duration_ms {
            prop_assert_eq!(counter.value(), target);
            prop_assert_eq!(counter.phase(), AnimationPhase::Complete);
        }
    }

    #[test]
    fn counter_is_monotonic(
        target in 1u64..100_000,
        mut times in proptest::collection::vec(0u64..3_000, 1..40),
    ) {
        times.sort_unstable();
        let mut counter = GlitchCounter::new(target, "");
        let mut last = 0;
        for t in times {
            advance(&mut counter, t * NS_PER_MS);
            prop_assert!(counter.value() >= last);
            prop_assert!(counter.value() <= target);
            last = counter.value();
        }
    }

    #[test]
    fn typewriter_always_shows_a_growing_prefix(
        text in "[a-zA-Z \u{1F355}é]{0,40}",
        per_char_ms in 1u64..200,
        steps in proptest::collection::vec(0u64..400, 1..60),
    ) {
        let mut reveal = CharacterReveal::new(text.clone(), 0.0, per_char_ms);
        let mut now = 0;
        let mut last_len = 0;
        advance(&mut reveal, now);
        for step in steps {
            now += step * NS_PER_MS;
            advance(&mut reveal, now);
            prop_assert!(text.starts_with(reveal.displayed()));
            prop_assert!(reveal.revealed_count() >= last_len);
            last_len = reveal.revealed_count();
        }
        let end = now + reveal.total_duration_ns();
        advance(&mut reveal, end);
        prop_assert_eq!(reveal.displayed(), text.as_str());
        prop_assert!(reveal.phase().is_complete());
    }

    #[test]
    fn glitch_never_changes_the_value(seed in any::<u64>(), probability in 0.0f64..=1.0) {
        let mut plain = GlitchCounter::new(35_000, "TPS").with_glitch(0.0, 100);
        let mut glitchy = GlitchCounter::new(35_000, "TPS").with_glitch(probability, 100);
        let mut rng = SeededRandom::new(seed);
        let mut never = SequenceRandom::constant(0.0);
        for frame in 0..140u64 {
            let now = frame * 16 * NS_PER_MS;
            glitchy.advance(&mut FrameContext::new(now, &mut rng));
            plain.advance(&mut FrameContext::new(now, &mut never));
            prop_assert_eq!(glitchy.value(), plain.value());
        }
    }
}

#[test]
fn completed_driver_schedules_no_more_frames() {
    let clock = ManualClock::new();
    let mut rng = SeededRandom::new(99);
    let mut driver = RevealDriver::new();
    driver.add("kicker", CharacterReveal::new("NEXT-GEN TRADING PROTOCOL", 0.0, 50));
    driver.add("sec", GlitchCounter::new(2, "SEC"));
    driver.add("tps", GlitchCounter::new(35_000, "TPS"));
    driver.add("gas", GlitchCounter::new(0, "$"));
    driver.mount(clock.now_ns());

    let mut frames = 0u64;
    while !driver.is_complete() {
        driver.on_frame(clock.now_ns(), &mut rng);
        clock.advance_ms(16);
        frames += 1;
        assert!(frames < 1_000);
    }

    // One request per animation per frame it was running, never more.
    assert!(driver.total_requests() <= 4 * frames);
    assert_eq!(driver.pending_requests(), 0);

    let settled = driver.total_requests();
    for _ in 0..100 {
        driver.on_frame(clock.now_ns(), &mut rng);
        clock.advance_ms(16);
    }
    assert_eq!(driver.total_requests(), settled);

    let values: Vec<u64> = ["sec", "tps", "gas"]
        .iter()
        .filter_map(|name| driver.find(name).and_then(|a| a.as_counter()))
        .map(|c| c.value())
        .collect();
    assert_eq!(values, vec![2, 35_000, 0]);
}

#[test]
fn glitch_clears_without_extra_frames() {
    let mut driver = RevealDriver::new();
    let id = driver.add("tps", GlitchCounter::new(10, "").with_duration(0.0).with_glitch(1.0, 100));
    let mut rng = SequenceRandom::constant(0.0);
    driver.mount(0);
    driver.on_frame(0, &mut rng);

    let counter = driver.get(id).and_then(|a| a.as_counter()).unwrap();
    assert!(counter.phase().is_complete());
    assert!(counter.is_glitching(50 * NS_PER_MS));
    assert!(!counter.is_glitching(100 * NS_PER_MS));
    assert_eq!(driver.pending_requests(), 0);
}
