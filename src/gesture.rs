//! Gesture engine
//!
//! Turns pointer and touch input into pan / pivot-zoom / reset updates of a
//! frame's view transform.
//!
//! Composition: a point `q` in fitted-image space is drawn at
//! `translation + q * scale` on the canvas. `translation` is therefore the
//! on-canvas top-left corner of the displayed image and scaling happens
//! about the canvas origin.

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Smallest allowed view scale
pub const MIN_SCALE: f32 = 0.1;
/// Largest allowed view scale
pub const MAX_SCALE: f32 = 10.0;
/// Zoom factor of one wheel notch
pub const WHEEL_ZOOM_STEP: f32 = 1.1;

/// How an image is fitted into the viewport on reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Whole image visible, letterboxed
    #[default]
    Contain,
    /// Viewport fully covered, overflow cropped
    Fill,
}

/// Size of `content` once fitted into `viewport`, preserving aspect ratio.
///
/// Height is tried first (`viewport.y`, width from the ratio); the result is
/// kept if it satisfies the mode, otherwise the fit is width-constrained.
pub fn fit_size(content: Vec2, viewport: Vec2, mode: FitMode) -> Vec2 {
    if content.x <= 0.0 || content.y <= 0.0 || viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }

    let ratio = content.x / content.y;
    let width = viewport.y * ratio;
    let height_constrained = match mode {
        FitMode::Contain => width <= viewport.x,
        FitMode::Fill => width >= viewport.x,
    };

    if height_constrained {
        Vec2::new(width, viewport.y)
    } else {
        Vec2::new(viewport.x, viewport.x / ratio)
    }
}

/// View transform of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// Always within `[MIN_SCALE, MAX_SCALE]`
    pub scale: f32,
    pub translation: Vec2,
    /// Fitted image size at scale 1.0
    pub display_size: Vec2,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation: Vec2::ZERO,
            display_size: Vec2::ZERO,
        }
    }
}

impl TransformState {
    /// Canvas rectangle covered by the image
    pub fn image_rect(&self) -> Rect {
        Rect::from_min_size(self.translation.to_pos2(), self.display_size * self.scale)
    }
}

/// Gesture bookkeeping. At most one of {mouse drag, touch manipulation} is
/// live at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureSession {
    drag_anchor: Option<Pos2>,
    mouse_down: Option<Pos2>,
    touch_active: bool,
}

impl GestureSession {
    fn clear_mouse(&mut self) {
        self.drag_anchor = None;
        self.mouse_down = None;
    }
}

/// Result of a primary-button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Dropped because a touch manipulation owns the transform
    Ignored,
    /// Press recorded, drag capture started
    Captured,
    /// Double activation reset the view
    Reset,
    /// Press and release at the same point
    Click,
    /// Release after a drag (or without a matching press)
    Released,
}

/// Sole mutator of a frame's `TransformState`
#[derive(Debug, Clone)]
pub struct GestureEngine {
    transform: TransformState,
    session: GestureSession,
    content_size: Option<Vec2>,
    viewport: Vec2,
    fit_mode: FitMode,
}

impl GestureEngine {
    pub fn new(fit_mode: FitMode) -> Self {
        Self {
            transform: TransformState::default(),
            session: GestureSession::default(),
            content_size: None,
            viewport: Vec2::ZERO,
            fit_mode,
        }
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    #[cfg(test)]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    pub fn is_capturing(&self) -> bool {
        self.session.drag_anchor.is_some()
    }

    pub fn set_fit_mode(&mut self, mode: FitMode) {
        if self.fit_mode != mode {
            self.fit_mode = mode;
            self.reset_view();
        }
    }

    /// Swap in a newly displayed image (intrinsic pixel size) and refit
    pub fn set_content(&mut self, size: Option<Vec2>) {
        self.content_size = size;
        self.reset_view();
    }

    /// Viewport resized; refits when the size actually changed
    pub fn set_viewport(&mut self, size: Vec2) {
        if self.viewport != size {
            self.viewport = size;
            self.reset_view();
        }
    }

    /// Identity transform, then fit the content and center it
    pub fn reset_view(&mut self) {
        self.transform.scale = 1.0;
        self.transform.translation = Vec2::ZERO;

        match self.content_size {
            Some(content) => {
                let fitted = fit_size(content, self.viewport, self.fit_mode);
                self.transform.display_size = fitted;
                if fitted != Vec2::ZERO {
                    self.transform.translation = (self.viewport - fitted) * 0.5;
                }
            }
            None => self.transform.display_size = Vec2::ZERO,
        }
    }

    /// Mouse wheel notch or trackpad pinch about `pivot`
    pub fn on_wheel_or_pinch(&mut self, pivot: Pos2, step: f32) -> bool {
        if self.session.touch_active {
            trace!("wheel ignored during touch manipulation");
            return false;
        }
        self.zoom_about(pivot, step)
    }

    /// Pivot-preserving zoom. Requests that would leave the scale bounds
    /// are rejected whole.
    fn zoom_about(&mut self, pivot: Pos2, step: f32) -> bool {
        if !step.is_finite() || step <= 0.0 {
            return false;
        }

        let candidate = self.transform.scale * step;
        if !(MIN_SCALE..=MAX_SCALE).contains(&candidate) {
            trace!(scale = self.transform.scale, step, "zoom request outside bounds rejected");
            return false;
        }

        self.transform.translation =
            self.transform.translation * step + pivot.to_vec2() * (1.0 - step);
        self.transform.scale = candidate;
        true
    }

    pub fn on_primary_down(&mut self, point: Pos2, click_count: u32) -> GestureOutcome {
        if self.session.touch_active {
            return GestureOutcome::Ignored;
        }

        if click_count == 2 {
            self.reset_view();
            self.session.clear_mouse();
            return GestureOutcome::Reset;
        }

        self.session.mouse_down = Some(point);
        self.session.drag_anchor = Some(point);
        GestureOutcome::Captured
    }

    pub fn on_primary_move(&mut self, point: Pos2) -> bool {
        if self.session.touch_active {
            return false;
        }

        match self.session.drag_anchor {
            Some(last) => {
                self.transform.translation += point - last;
                self.session.drag_anchor = Some(point);
                true
            }
            None => false,
        }
    }

    pub fn on_primary_up(&mut self, point: Pos2) -> GestureOutcome {
        if self.session.touch_active {
            return GestureOutcome::Ignored;
        }

        let clicked = self.session.mouse_down == Some(point);
        self.session.clear_mouse();
        if clicked {
            GestureOutcome::Click
        } else {
            GestureOutcome::Released
        }
    }

    pub fn on_touch_manipulation_start(&mut self, origin: Pos2) {
        trace!(?origin, "touch manipulation started");
        self.session.touch_active = true;
        // A half-finished mouse drag must not resume after the touch ends.
        self.session.clear_mouse();
    }

    /// Pinch and pan deltas of one manipulation step; both are applied
    pub fn on_touch_manipulation_delta(
        &mut self,
        scale: Vec2,
        translation: Vec2,
        origin: Pos2,
    ) -> bool {
        if !self.session.touch_active {
            return false;
        }

        let mut changed = false;
        if scale.x != 1.0 || scale.y != 1.0 {
            changed |= self.zoom_about(origin, (scale.x + scale.y) / 2.0);
        }
        if translation != Vec2::ZERO {
            self.transform.translation += translation;
            changed = true;
        }
        changed
    }

    pub fn on_touch_manipulation_end(&mut self) {
        self.session.touch_active = false;
    }
}
