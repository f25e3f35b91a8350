//! Input translation
//!
//! Converts the egui events of one frame viewport into `FrameInput`s:
//! - primary button press/move/release with click counting
//! - hover enter/leave
//! - wheel notches and trackpad pinch as pivot zoom steps
//! - touch contacts folded into one manipulation session
//! - the first dropped file
//! - `F` toggles the fit mode

use std::collections::HashMap;
use std::time::{Duration, Instant};

use egui::{DroppedFile, Event, Key, PointerButton, Pos2, Rect, TouchId, TouchPhase, Vec2};

use crate::frame::FrameInput;
use crate::gesture::WHEEL_ZOOM_STEP;

/// Double-click detection threshold
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);
/// Max distance between the two presses of a double click
pub const DOUBLE_CLICK_DISTANCE: f32 = 5.0;

#[derive(Debug, Default)]
pub struct InputTranslator {
    pointer: Option<Pos2>,
    hovering: bool,
    /// Set only for presses that were forwarded
    primary_down: bool,
    last_press: Option<(Instant, Pos2)>,
    /// Active contacts by `TouchId` value
    touches: HashMap<u64, Pos2>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one batch of events. Presses inside `blocked` (chrome such
    /// as the button strip) are left to the widgets that own them.
    pub fn translate(
        &mut self,
        events: &[Event],
        dropped: &[DroppedFile],
        blocked: &[Rect],
        now: Instant,
    ) -> Vec<FrameInput> {
        let mut out = Vec::new();

        for event in events {
            match event {
                Event::PointerMoved(pos) => {
                    self.pointer = Some(*pos);
                    if !self.hovering {
                        self.hovering = true;
                        out.push(FrameInput::PointerEnter);
                    }
                    if self.primary_down {
                        out.push(FrameInput::PrimaryMove { pos: *pos });
                    }
                }
                Event::PointerGone => {
                    self.pointer = None;
                    if self.hovering {
                        self.hovering = false;
                        out.push(FrameInput::PointerLeave);
                    }
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    if blocked.iter().any(|r| r.contains(*pos)) {
                        continue;
                    }
                    let click_count = self.click_count(*pos, now);
                    self.primary_down = true;
                    out.push(FrameInput::PrimaryDown {
                        pos: *pos,
                        click_count,
                    });
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    if self.primary_down {
                        self.primary_down = false;
                        out.push(FrameInput::PrimaryUp { pos: *pos });
                    }
                }
                Event::MouseWheel { delta, .. } => {
                    if let (Some(pivot), Some(step)) = (self.pointer, wheel_step(*delta)) {
                        out.push(FrameInput::Wheel { pivot, step });
                    }
                }
                Event::Zoom(factor) => {
                    if let Some(pivot) = self.pointer {
                        if *factor != 1.0 {
                            out.push(FrameInput::Wheel {
                                pivot,
                                step: *factor,
                            });
                        }
                    }
                }
                Event::Touch { id, phase, pos, .. } => self.touch(*id, *phase, *pos, &mut out),
                Event::Key {
                    key: Key::F,
                    pressed: true,
                    repeat: false,
                    ..
                } => out.push(FrameInput::ToggleFitMode),
                _ => {}
            }
        }

        if let Some(path) = dropped.iter().find_map(|f| f.path.clone()) {
            out.push(FrameInput::FileDropped(path));
        }

        out
    }

    fn click_count(&mut self, pos: Pos2, now: Instant) -> u32 {
        let count = match self.last_press {
            Some((at, last))
                if now.saturating_duration_since(at) <= DOUBLE_CLICK_WINDOW
                    && last.distance(pos) <= DOUBLE_CLICK_DISTANCE =>
            {
                2
            }
            _ => 1,
        };
        // a third press starts a new pair
        self.last_press = (count == 1).then_some((now, pos));
        count
    }

    fn touch(&mut self, id: TouchId, phase: TouchPhase, pos: Pos2, out: &mut Vec<FrameInput>) {
        match phase {
            TouchPhase::Start => {
                if self.touches.is_empty() {
                    // the synthesized mouse press for this contact is ignored downstream
                    self.primary_down = false;
                    out.push(FrameInput::TouchStart { origin: pos });
                }
                self.touches.insert(id.0, pos);
            }
            TouchPhase::Move => {
                if !self.touches.contains_key(&id.0) {
                    return;
                }
                let (before_center, before_spread) = spread(&self.touches);
                self.touches.insert(id.0, pos);
                let (center, after_spread) = spread(&self.touches);

                let scale = if self.touches.len() >= 2 && before_spread > 0.0 {
                    after_spread / before_spread
                } else {
                    1.0
                };
                let translation = center - before_center;
                if scale != 1.0 || translation != Vec2::ZERO {
                    out.push(FrameInput::TouchDelta {
                        scale: Vec2::splat(scale),
                        translation,
                        origin: center,
                    });
                }
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if self.touches.remove(&id.0).is_some() && self.touches.is_empty() {
                    out.push(FrameInput::TouchEnd);
                }
            }
        }
    }
}

fn wheel_step(delta: Vec2) -> Option<f32> {
    if delta.y > 0.0 {
        Some(WHEEL_ZOOM_STEP)
    } else if delta.y < 0.0 {
        Some(1.0 / WHEEL_ZOOM_STEP)
    } else {
        None
    }
}

/// Centroid of the active contacts and their mean distance to it
fn spread(touches: &HashMap<u64, Pos2>) -> (Pos2, f32) {
    if touches.is_empty() {
        return (Pos2::ZERO, 0.0);
    }
    let n = touches.len() as f32;
    let sum = touches.values().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let center = (sum / n).to_pos2();
    let mean = touches.values().map(|p| p.distance(center)).sum::<f32>() / n;
    (center, mean)
}
