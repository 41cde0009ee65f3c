//! Waveform seek bar model.
//!
//! The bars are decorative: their heights are sampled once when the player
//! starts and never reflect audio amplitude. Only the number of leading
//! "played" bars follows the playback clock.

use crate::time::sanitize_seconds;
use rand::Rng;
use std::ops::Range;

/// Number of bars drawn when the config does not say otherwise
pub const DEFAULT_BAR_COUNT: usize = 90;

/// Half-open range `[min, max)` that bar heights are sampled from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightRange {
    pub min: f32,
    pub max: f32,
}

impl Default for HeightRange {
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 40.0,
        }
    }
}

impl HeightRange {
    fn sample<R: Rng>(self, rng: &mut R) -> f32 {
        // gen_range panics on an empty or non-finite range
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            rng.gen_range(self.min..self.max)
        } else if self.min.is_finite() {
            self.min
        } else {
            0.0
        }
    }
}

/// Bars whose played state flipped after a progress update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChange {
    pub bars: Range<usize>,
    pub active: bool,
}

/// Fixed sequence of bars plus the count of bars marked as played
#[derive(Debug, Clone)]
pub struct Waveform {
    heights: Vec<f32>,
    active_bars: usize,
}

impl Waveform {
    /// Generate `bar_count` bars with heights drawn from the thread RNG
    #[must_use]
    pub fn generate(bar_count: usize, range: HeightRange) -> Self {
        Self::generate_with(bar_count, range, &mut rand::thread_rng())
    }

    /// Generate `bar_count` bars with heights drawn from `rng`
    pub fn generate_with<R: Rng>(bar_count: usize, range: HeightRange, rng: &mut R) -> Self {
        let heights = (0..bar_count).map(|_| range.sample(rng)).collect();
        Self {
            heights,
            active_bars: 0,
        }
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.heights.len()
    }

    #[must_use]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Number of leading bars currently marked as played
    #[must_use]
    pub const fn active_bars(&self) -> usize {
        self.active_bars
    }

    /// Recompute the played bars for a playback position.
    ///
    /// Returns the bars that flipped state, or `None` if the active count is
    /// unchanged. Bars `[0, active)` are played and the rest are not.
    pub fn update_progress(&mut self, current: f64, duration: f64) -> Option<BarChange> {
        let next = active_bar_count(current, duration, self.bar_count());
        let previous = std::mem::replace(&mut self.active_bars, next);

        match next.cmp(&previous) {
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(BarChange {
                bars: previous..next,
                active: true,
            }),
            std::cmp::Ordering::Less => Some(BarChange {
                bars: next..previous,
                active: false,
            }),
        }
    }
}

/// `floor(current / max(duration, 1) * bar_count)`, clamped to `[0, bar_count]`.
///
/// An unknown (`NaN`) or zero duration counts as one second, so a track
/// whose metadata has not loaded shows no progress instead of `NaN`.
#[must_use]
pub fn active_bar_count(current: f64, duration: f64, bar_count: usize) -> usize {
    let progress = sanitize_seconds(current) / sanitize_seconds(duration).max(1.0);

    #[allow(clippy::cast_precision_loss)]
    let scaled = (progress * bar_count as f64).floor();

    // Saturating cast: `scaled` is non-negative and huge values clamp below.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bars = scaled as usize;
    bars.min(bar_count)
}
