//! Property-based tests for the playback engine
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use std::time::{Duration, Instant};
use waveplay_core::{
    active_bar_count, active_line_index, format_time, seek_fraction, FrameStep, LyricLine,
    LyricsSync, ScrollAnimator, TrackNavigator, Waveform, WaveformLayout,
};

// ===== Helpers =====

/// Lyric lines with ascending timestamps
fn arbitrary_lyrics() -> impl Strategy<Value = Vec<LyricLine>> {
    prop::collection::vec(0.0f64..30.0, 0..20).prop_map(|gaps| {
        let mut time = 0.0;
        gaps.into_iter()
            .enumerate()
            .map(|(index, gap)| {
                time += gap;
                LyricLine::new(time, format!("line {index}"))
            })
            .collect()
    })
}

fn arbitrary_layout() -> impl Strategy<Value = WaveformLayout> {
    (-500.0f64..500.0, 0.0f64..2_000.0, 0.5f64..10.0, 0.0f64..5.0).prop_map(
        |(left, width, bar_width, gap)| WaveformLayout {
            left,
            width,
            bar_width,
            gap,
        },
    )
}

// ===== Property Tests =====

proptest! {
    /// Property: Active bar count never exceeds the bar count and never
    /// decreases as playback moves forward
    #[test]
    fn active_bars_bounded_and_monotonic(
        a in 0.0f64..10_000.0,
        b in 0.0f64..10_000.0,
        duration in prop_oneof![Just(f64::NAN), Just(0.0), 0.0f64..10_000.0],
        bar_count in 1usize..200,
    ) {
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
        let first = active_bar_count(earlier, duration, bar_count);
        let second = active_bar_count(later, duration, bar_count);

        prop_assert!(second <= bar_count);
        prop_assert!(first <= second);
    }

    /// Property: Applying every reported bar change reproduces the
    /// "first N bars played" pattern
    #[test]
    fn waveform_diffs_keep_played_prefix(
        positions in prop::collection::vec(0.0f64..400.0, 1..40),
        duration in 1.0f64..300.0,
    ) {
        let mut waveform = Waveform::generate(90, waveplay_core::HeightRange::default());
        let mut bars = vec![false; waveform.bar_count()];

        for position in positions {
            if let Some(change) = waveform.update_progress(position, duration) {
                for index in change.bars {
                    bars[index] = change.active;
                }
            }
            let expected = active_bar_count(position, duration, bars.len());
            prop_assert_eq!(waveform.active_bars(), expected);
            prop_assert!(bars[..expected].iter().all(|b| *b));
            prop_assert!(bars[expected..].iter().all(|b| !b));
        }
    }

    /// Property: Seek fraction is always in [0, 1] and follows the pointer
    #[test]
    fn seek_fraction_bounded_and_monotonic(
        layout in arbitrary_layout(),
        a in -3_000.0f64..3_000.0,
        b in -3_000.0f64..3_000.0,
        bar_count in 1usize..200,
    ) {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        let first = seek_fraction(left, &layout, bar_count);
        let second = seek_fraction(right, &layout, bar_count);

        prop_assert!((0.0..=1.0).contains(&first));
        prop_assert!((0.0..=1.0).contains(&second));
        prop_assert!(first <= second);
    }

    /// Property: next then previous returns to the same track, and a full
    /// cycle of next lands where it started
    #[test]
    fn navigator_wraps_consistently(
        track_count in 1usize..100,
        start in 0usize..100,
    ) {
        let mut navigator = TrackNavigator::new(track_count);
        let start = start % track_count;
        prop_assert_eq!(navigator.select(start), Some(start));

        let next = navigator.next_index();
        navigator.select(next);
        prop_assert_eq!(navigator.previous_index(), start);

        for _ in 1..track_count {
            let next = navigator.next_index();
            navigator.select(next);
        }
        prop_assert_eq!(navigator.current(), start);
    }

    /// Property: Out-of-range selections never move the navigator
    #[test]
    fn navigator_rejects_out_of_range(
        track_count in 1usize..100,
        offset in 0usize..1_000,
    ) {
        let mut navigator = TrackNavigator::new(track_count);
        prop_assert_eq!(navigator.select(track_count + offset), None);
        prop_assert_eq!(navigator.current(), 0);
    }

    /// Property: A repeated tick never reports a change, and the active line
    /// always matches the lookup
    #[test]
    fn lyrics_tick_is_idempotent(
        lines in arbitrary_lyrics(),
        positions in prop::collection::vec(0.0f64..600.0, 1..30),
    ) {
        let mut sync = LyricsSync::new();
        sync.load(lines.clone());

        for position in positions {
            sync.on_tick(position);
            prop_assert_eq!(sync.active(), active_line_index(&lines, position));
            prop_assert_eq!(sync.on_tick(position), None);
        }
    }

    /// Property: Formatted time reads back as the whole seconds elapsed
    #[test]
    fn format_time_reads_back(seconds in 0.0f64..1_000_000.0) {
        let text = format_time(seconds);
        let (minutes, secs) = text.split_once(':').unwrap();

        prop_assert_eq!(secs.len(), 2);
        let minutes: u64 = minutes.parse().unwrap();
        let secs: u64 = secs.parse().unwrap();
        prop_assert!(secs < 60);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = seconds.floor() as u64;
        prop_assert_eq!(minutes * 60 + secs, whole);
    }

    /// Property: Scroll offsets stay between start and target and the last
    /// frame lands exactly on the target
    #[test]
    fn scroll_stays_between_endpoints(
        from in -2_000.0f64..2_000.0,
        to in -2_000.0f64..2_000.0,
        steps in prop::collection::vec(0u64..100, 1..30),
    ) {
        let mut animator = ScrollAnimator::new();
        let ticket = animator.start(from, to, Duration::from_millis(400));
        let (low, high) = if from <= to { (from, to) } else { (to, from) };

        let t0 = Instant::now();
        let mut elapsed = 0;
        prop_assert!(matches!(animator.frame(ticket, t0), FrameStep::Continue(_)));

        for step in steps {
            elapsed += step;
            match animator.frame(ticket, t0 + Duration::from_millis(elapsed)) {
                FrameStep::Continue(offset) => {
                    prop_assert!(offset >= low - 1e-9 && offset <= high + 1e-9);
                }
                FrameStep::Finished(offset) => {
                    prop_assert!(elapsed >= 400);
                    prop_assert!((offset - to).abs() < f64::EPSILON);
                    break;
                }
                FrameStep::Stale => prop_assert!(false, "live ticket reported stale"),
            }
        }
    }
}
