//! Animation primitives
//!
//! Time-driven value ramps used by the hover preview transition.
//! Every query takes the current `Instant` so callers (and tests) control
//! the clock.

use std::time::{Duration, Instant};

/// Easing function type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingFunction {
    /// Linear interpolation
    Linear,
    /// Cubic ease-out (deceleration)
    EaseOut,
}

impl EasingFunction {
    /// Apply the easing function to a value t in [0, 1]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,

            EasingFunction::EaseOut => {
                // Cubic ease-out: 1 - (1 - t)^3
                1.0 - (1.0 - t).powi(3)
            }
        }
    }
}

/// A single ramp from `start` to `end`
#[derive(Debug, Clone)]
pub struct Animation {
    pub start: f32,
    pub end: f32,
    pub duration: Duration,
    pub start_time: Instant,
    pub easing: EasingFunction,
}

impl Animation {
    pub fn new(
        start: f32,
        end: f32,
        duration: Duration,
        easing: EasingFunction,
        start_time: Instant,
    ) -> Self {
        Self {
            start,
            end,
            duration,
            start_time,
            easing,
        }
    }

    /// Normalized progress in [0, 1]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Animated value at `now`
    pub fn value_at(&self, now: Instant) -> f32 {
        let eased = self.easing.apply(self.progress(now));
        self.start + (self.end - self.start) * eased
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start_time) >= self.duration
    }
}
