//! Frame chrome
//!
//! A small button strip in the top-right corner, shown while the pointer is
//! near it, and a resize grip in the bottom-right corner.

use egui::{pos2, vec2, Color32, Pos2, Rect, Sense, Stroke, Vec2};

use crate::frame::FrameInput;

const BUTTON_SIZE: Vec2 = Vec2::new(24.0, 24.0);
const BUTTON_GAP: f32 = 2.0;
const MARGIN: f32 = 4.0;
/// Extra space around the strip that still reveals it
const REVEAL_PADDING: f32 = 12.0;
const GRIP_SIZE: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripButton {
    NewFrame,
    Lock,
    Shuffle,
    Close,
}

impl StripButton {
    /// Left to right
    pub const ALL: [StripButton; 4] = [
        StripButton::NewFrame,
        StripButton::Lock,
        StripButton::Shuffle,
        StripButton::Close,
    ];

    pub fn input(self) -> FrameInput {
        match self {
            StripButton::NewFrame => FrameInput::NewFrame,
            StripButton::Lock => FrameInput::ToggleLock,
            StripButton::Shuffle => FrameInput::ToggleRandomOrder,
            StripButton::Close => FrameInput::Close,
        }
    }

    fn tooltip(self) -> &'static str {
        match self {
            StripButton::NewFrame => "New frame",
            StripButton::Lock => "Lock / unlock",
            StripButton::Shuffle => "Random order",
            StripButton::Close => "Close frame",
        }
    }
}

/// Area covered by the buttons, anchored to the top-right of `screen`
pub fn strip_rect(screen: Rect) -> Rect {
    let n = StripButton::ALL.len() as f32;
    let size = vec2(n * BUTTON_SIZE.x + (n - 1.0) * BUTTON_GAP, BUTTON_SIZE.y);
    Rect::from_min_size(
        pos2(screen.max.x - MARGIN - size.x, screen.min.y + MARGIN),
        size,
    )
}

pub fn button_rect(screen: Rect, button: StripButton) -> Rect {
    let i = StripButton::ALL
        .iter()
        .position(|b| *b == button)
        .unwrap_or_default() as f32;
    let strip = strip_rect(screen);
    Rect::from_min_size(
        strip.min + vec2(i * (BUTTON_SIZE.x + BUTTON_GAP), 0.0),
        BUTTON_SIZE,
    )
}

/// The strip is shown while the pointer is in this zone
pub fn reveal_zone(screen: Rect) -> Rect {
    strip_rect(screen).expand(REVEAL_PADDING).intersect(screen)
}

pub fn grip_rect(screen: Rect) -> Rect {
    Rect::from_min_max(screen.max - Vec2::splat(GRIP_SIZE), screen.max)
}

/// Paint the strip and report the clicked button, if any
pub fn show_button_strip(
    ctx: &egui::Context,
    screen: Rect,
    locked: bool,
    random_order: bool,
) -> Option<StripButton> {
    let mut clicked = None;

    egui::Area::new(egui::Id::new("frame_button_strip"))
        .fixed_pos(strip_rect(screen).min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_min_size(strip_rect(screen).size());
            for button in StripButton::ALL {
                let active = match button {
                    StripButton::Lock => locked,
                    StripButton::Shuffle => random_order,
                    _ => false,
                };
                let rect = button_rect(screen, button);
                let response = ui
                    .interact(rect, ui.id().with(button.tooltip()), Sense::click())
                    .on_hover_text(button.tooltip());

                let bg = if response.is_pointer_button_down_on() {
                    Color32::from_rgba_unmultiplied(255, 255, 255, 70)
                } else if response.hovered() {
                    Color32::from_rgba_unmultiplied(255, 255, 255, 45)
                } else if active {
                    Color32::from_rgba_unmultiplied(90, 140, 255, 150)
                } else {
                    Color32::from_rgba_unmultiplied(30, 30, 30, 170)
                };
                ui.painter().rect_filled(rect, 4.0, bg);
                paint_icon(ui.painter(), rect.shrink(6.0), button, locked);

                if response.clicked() {
                    clicked = Some(button);
                }
            }
        });

    clicked
}

fn paint_icon(painter: &egui::Painter, r: Rect, button: StripButton, locked: bool) {
    let stroke = Stroke::new(1.6, Color32::WHITE);
    match button {
        StripButton::NewFrame => {
            painter.line_segment([pos2(r.center().x, r.min.y), pos2(r.center().x, r.max.y)], stroke);
            painter.line_segment([pos2(r.min.x, r.center().y), pos2(r.max.x, r.center().y)], stroke);
        }
        StripButton::Lock => {
            let body = Rect::from_min_max(pos2(r.min.x, r.center().y - 1.0), r.max);
            painter.rect_stroke(body, 1.0, stroke);
            let shackle_x = if locked { r.max.x - 3.0 } else { r.max.x + 2.0 };
            let top = r.min.y + 1.0;
            painter.line_segment([pos2(r.min.x + 3.0, body.min.y), pos2(r.min.x + 3.0, top)], stroke);
            painter.line_segment([pos2(r.min.x + 3.0, top), pos2(shackle_x, top)], stroke);
            if locked {
                painter.line_segment([pos2(shackle_x, top), pos2(shackle_x, body.min.y)], stroke);
            }
        }
        StripButton::Shuffle => {
            painter.line_segment([r.left_top(), r.right_bottom()], stroke);
            painter.line_segment([r.left_bottom(), r.right_top()], stroke);
            arrow_head(painter, r.right_top(), vec2(-1.0, 1.0), stroke);
            arrow_head(painter, r.right_bottom(), vec2(-1.0, -1.0), stroke);
        }
        StripButton::Close => {
            painter.line_segment([r.left_top(), r.right_bottom()], stroke);
            painter.line_segment([r.right_top(), r.left_bottom()], stroke);
        }
    }
}

fn arrow_head(painter: &egui::Painter, tip: Pos2, back: Vec2, stroke: Stroke) {
    painter.line_segment([tip, tip + vec2(back.x * 4.0, 0.0)], stroke);
    painter.line_segment([tip, tip + vec2(0.0, back.y * 4.0)], stroke);
}

/// Three diagonal ticks in the corner
pub fn paint_grip(painter: &egui::Painter, grip: Rect, hovered: bool) {
    let alpha = if hovered { 200 } else { 90 };
    let stroke = Stroke::new(1.2, Color32::from_white_alpha(alpha));
    for k in 1..=3 {
        let d = k as f32 * 4.0;
        painter.line_segment(
            [pos2(grip.max.x - d, grip.max.y - 1.0), pos2(grip.max.x - 1.0, grip.max.y - d)],
            stroke,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(320.0, 240.0))
    }

    #[test]
    fn strip_sits_in_top_right_corner() {
        let strip = strip_rect(screen());
        assert!(screen().contains_rect(strip));
        assert_eq!(strip.max.x, 316.0);
        assert_eq!(strip.min.y, 4.0);
        assert_eq!(strip.width(), 4.0 * 24.0 + 3.0 * 2.0);
    }

    #[test]
    fn buttons_tile_the_strip_in_order() {
        let s = screen();
        let strip = strip_rect(s);
        let rects: Vec<Rect> = StripButton::ALL.iter().map(|b| button_rect(s, *b)).collect();
        assert_eq!(rects[0].min, strip.min);
        assert_eq!(rects[3].max, strip.max);
        for pair in rects.windows(2) {
            assert!(pair[0].max.x < pair[1].min.x);
            assert!(!pair[0].intersects(pair[1]));
        }
    }

    #[test]
    fn reveal_zone_covers_strip_and_stays_on_screen() {
        let zone = reveal_zone(screen());
        assert!(zone.contains_rect(strip_rect(screen())));
        assert!(screen().contains_rect(zone));
        assert!(!zone.contains(pos2(10.0, 200.0)));
    }

    #[test]
    fn grip_is_bottom_right() {
        let grip = grip_rect(screen());
        assert_eq!(grip.max, pos2(320.0, 240.0));
        assert_eq!(grip.size(), Vec2::splat(14.0));
        assert!(!grip.intersects(strip_rect(screen())));
    }

    #[test]
    fn buttons_map_to_frame_inputs() {
        assert_eq!(StripButton::NewFrame.input(), FrameInput::NewFrame);
        assert_eq!(StripButton::Lock.input(), FrameInput::ToggleLock);
        assert_eq!(StripButton::Shuffle.input(), FrameInput::ToggleRandomOrder);
        assert_eq!(StripButton::Close.input(), FrameInput::Close);
    }
}
