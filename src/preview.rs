//! Hover preview transition.
//!
//! Entering the frame fades the image in while a blur dissolves; leaving
//! fades it out into a growing blur. The most recent trigger always wins:
//! a new transition starts from whatever opacity is currently on screen.

use std::time::{Duration, Instant};

use crate::animation::{Animation, EasingFunction};

pub const ENTER_FADE: Duration = Duration::from_millis(400);
pub const ENTER_UNBLUR: Duration = Duration::from_millis(500);
pub const LEAVE_FADE: Duration = Duration::from_millis(300);
pub const MAX_BLUR_RADIUS: f32 = 80.0;

/// What the renderer should apply this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewStyle {
    pub opacity: f32,
    /// `None` once a transition completes (no effect attached)
    pub blur_radius: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct HoverPreview {
    opacity: f32,
    opacity_anim: Option<Animation>,
    blur_anim: Option<Animation>,
}

impl Default for HoverPreview {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            opacity_anim: None,
            blur_anim: None,
        }
    }
}

impl HoverPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the fade-in. Returns false (and does nothing) when locked.
    pub fn on_pointer_enter(&mut self, locked: bool, now: Instant) -> bool {
        if locked {
            return false;
        }
        let from = self.opacity_at(now);
        self.opacity_anim = Some(Animation::new(from, 1.0, ENTER_FADE, EasingFunction::Linear, now));
        self.blur_anim = Some(Animation::new(
            MAX_BLUR_RADIUS,
            0.0,
            ENTER_UNBLUR,
            EasingFunction::EaseOut,
            now,
        ));
        true
    }

    /// Start the fade-out. Returns false (and does nothing) when locked.
    pub fn on_pointer_leave(&mut self, locked: bool, now: Instant) -> bool {
        if locked {
            return false;
        }
        let from = self.opacity_at(now);
        self.opacity_anim = Some(Animation::new(from, 0.0, LEAVE_FADE, EasingFunction::Linear, now));
        self.blur_anim = Some(Animation::new(
            0.0,
            MAX_BLUR_RADIUS,
            LEAVE_FADE,
            EasingFunction::Linear,
            now,
        ));
        true
    }

    fn opacity_at(&self, now: Instant) -> f32 {
        self.opacity_anim
            .as_ref()
            .map_or(self.opacity, |anim| anim.value_at(now))
    }

    /// Sample the current style and retire finished animations
    pub fn update(&mut self, now: Instant) -> PreviewStyle {
        if let Some(anim) = &self.opacity_anim {
            self.opacity = anim.value_at(now);
            if anim.is_complete(now) {
                self.opacity_anim = None;
            }
        }

        let blur = self
            .blur_anim
            .as_ref()
            .map(|anim| (anim.is_complete(now), anim.value_at(now)));
        let blur_radius = match blur {
            Some((true, _)) => {
                self.blur_anim = None;
                None
            }
            Some((false, radius)) => Some(radius),
            None => None,
        };

        PreviewStyle {
            opacity: self.opacity,
            blur_radius,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.opacity_anim.is_some() || self.blur_anim.is_some()
    }
}
