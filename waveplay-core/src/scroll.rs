//! Eased scrolling of the lyrics viewport.
//!
//! Animations are driven by frame callbacks owned by the presentation
//! layer. Each scheduled frame carries the [`FrameTicket`] of the animation
//! that requested it; starting a new animation or cancelling bumps the
//! generation, so frames still queued for an older animation come back as
//! [`FrameStep::Stale`] and are dropped. At most one animation is in flight.

use std::time::{Duration, Instant};

/// Default length of a lyrics scroll
pub const DEFAULT_SCROLL_DURATION: Duration = Duration::from_millis(400);

/// Quadratic ease-in-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        (4.0 - 2.0 * t).mul_add(t, -1.0)
    }
}

/// Identifies the animation a frame callback belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket {
    generation: u64,
}

/// What to do with a delivered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Apply the offset and schedule another frame with the same ticket
    Continue(f64),
    /// Apply the offset; the animation has landed on its target
    Finished(f64),
    /// The ticket belongs to a superseded or cancelled animation
    Stale,
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    duration: Duration,
    /// Set by the first frame, like a frame loop timestamped on its first callback
    started_at: Option<Instant>,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    generation: u64,
    active: Option<ScrollAnimation>,
}

impl ScrollAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start scrolling from `from` to `to`, superseding any running animation.
    ///
    /// The returned ticket must be passed back with every frame.
    pub fn start(&mut self, from: f64, to: f64, duration: Duration) -> FrameTicket {
        self.generation = self.generation.wrapping_add(1);
        self.active = Some(ScrollAnimation {
            from,
            to,
            duration,
            started_at: None,
        });
        FrameTicket {
            generation: self.generation,
        }
    }

    /// Drop the running animation. Frames already scheduled become stale.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.active = None;
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Advance the animation owning `ticket` to `now`.
    pub fn frame(&mut self, ticket: FrameTicket, now: Instant) -> FrameStep {
        if ticket.generation != self.generation {
            return FrameStep::Stale;
        }
        let Some(animation) = self.active.as_mut() else {
            return FrameStep::Stale;
        };

        let started_at = *animation.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);

        if elapsed >= animation.duration {
            let target = animation.to;
            self.active = None;
            return FrameStep::Finished(target);
        }

        let progress = elapsed.as_secs_f64() / animation.duration.as_secs_f64();
        let offset = (animation.to - animation.from).mul_add(ease_in_out_quad(progress), animation.from);
        FrameStep::Continue(offset)
    }
}
