//! Frame windows
//!
//! Each frame lives in its own borderless, always-on-top egui viewport.
//! `FrameWindow` keeps the per-viewport state that is not part of the
//! frame itself: the uploaded texture, the input translator and the last
//! geometry reported to the frame.

use std::sync::Arc;
use std::time::Instant;

use egui::viewport::{ResizeDirection, WindowLevel};
use egui::{pos2, vec2, Align2, Color32, FontId, PointerButton, Rect, Stroke, Vec2};
use tracing::debug;

use crate::config::{SettingsStore, WindowRect};
use crate::frame::{FrameId, FrameInput, FrameInstance, DEFAULT_FRAME_SIZE};
use crate::image_loader::is_supported_image;
use crate::input::InputTranslator;
use crate::orchestrator::FrameOrchestrator;
use crate::preview::PreviewStyle;
use crate::ui;

pub const MIN_FRAME_SIZE: Vec2 = Vec2::new(80.0, 60.0);

const BLUR_RING_TAPS: usize = 8;

pub struct FrameWindow {
    id: FrameId,
    viewport_id: egui::ViewportId,
    builder: egui::ViewportBuilder,
    translator: InputTranslator,
    texture: Option<egui::TextureHandle>,
    texture_generation: u64,
    last_rect: Option<WindowRect>,
}

impl FrameWindow {
    pub fn new(frame: &FrameInstance) -> Self {
        let id = frame.id();
        let mut builder = egui::ViewportBuilder::default()
            .with_title(format!("desk-frame {}", id.0))
            .with_decorations(false)
            .with_transparent(true)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_taskbar(false)
            .with_drag_and_drop(true)
            .with_min_inner_size(MIN_FRAME_SIZE)
            .with_icon(Arc::new(frame_icon()));

        builder = match frame.initial_rect() {
            Some(rect) => builder
                .with_position(rect.position())
                .with_inner_size(rect.size().max(MIN_FRAME_SIZE)),
            None => builder.with_inner_size(DEFAULT_FRAME_SIZE),
        };

        Self {
            id,
            viewport_id: egui::ViewportId::from_hash_of(("desk-frame", id.0)),
            builder,
            translator: InputTranslator::new(),
            texture: None,
            texture_generation: 0,
            last_rect: None,
        }
    }

    pub fn viewport_id(&self) -> egui::ViewportId {
        self.viewport_id
    }

    /// Builder passed on every paint; it never changes so egui issues no
    /// geometry commands after the window is created.
    pub fn builder(&self) -> egui::ViewportBuilder {
        self.builder.clone()
    }

    /// Run one paint of this frame's viewport. Returns true when another
    /// paint is needed soon.
    pub fn show<S: SettingsStore>(
        &mut self,
        ctx: &egui::Context,
        orchestrator: &mut FrameOrchestrator<S>,
        now: Instant,
    ) -> bool {
        let id = self.id;
        let (close_requested, inner_rect, screen) = ctx.input(|i| {
            (
                i.viewport().close_requested(),
                i.viewport().inner_rect,
                i.screen_rect(),
            )
        });

        if close_requested {
            // The viewport goes away once the orchestrator drops the frame.
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            orchestrator.dispatch(id, FrameInput::Close, now);
            return true;
        }

        let mut repaint = false;

        if let Some(rect) = inner_rect.map(WindowRect::from) {
            if self.last_rect != Some(rect) {
                self.last_rect = Some(rect);
                orchestrator.dispatch(id, FrameInput::Moved { rect }, now);
            }
        }
        repaint |= orchestrator.dispatch(
            id,
            FrameInput::Resized {
                viewport: screen.size(),
            },
            now,
        );

        let hover = ctx.input(|i| i.pointer.hover_pos());
        let strip_visible = hover.is_some_and(|p| ui::reveal_zone(screen).contains(p));
        let grip = ui::grip_rect(screen);
        let mut blocked = vec![grip];
        if strip_visible {
            blocked.push(ui::strip_rect(screen));
        }

        let translator = &mut self.translator;
        let inputs = ctx.input(|i| translator.translate(&i.events, &i.raw.dropped_files, &blocked, now));
        for input in inputs {
            repaint |= orchestrator.dispatch(id, input, now);
        }

        self.window_commands(ctx, &blocked, grip);

        let Some(frame) = orchestrator.frame_mut(id) else {
            return repaint;
        };
        let style = frame.preview_style(now);
        self.sync_texture(ctx, frame);
        let image_rect = frame.transform().image_rect().translate(screen.min.to_vec2());
        let locked = frame.is_locked();
        let random_order = frame.cycler().is_random_order();
        let panning = frame.gestures().is_capturing();
        repaint |= frame.is_animating();

        if panning {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if hover.is_some_and(|p| grip.contains(p)) {
            ctx.set_cursor_icon(egui::CursorIcon::ResizeSouthEast);
        }

        let drop_hint = ctx.input(|i| {
            i.raw
                .hovered_files
                .first()
                .map(|f| f.path.as_deref().is_some_and(is_supported_image))
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let painter = ui.painter();
                match &self.texture {
                    Some(texture) => paint_image(painter, texture.id(), image_rect, style),
                    None => paint_placeholder(painter, screen),
                }
                if let Some(supported) = drop_hint {
                    let color = if supported {
                        Color32::from_rgb(90, 200, 120)
                    } else {
                        Color32::GRAY
                    };
                    painter.rect_stroke(screen.shrink(1.0), 0.0, Stroke::new(2.0, color));
                }
                ui::paint_grip(painter, grip, hover.is_some());
            });

        if strip_visible {
            if let Some(button) = ui::show_button_strip(ctx, screen, locked, random_order) {
                debug!(frame = %id, ?button, "strip button");
                repaint |= orchestrator.dispatch(id, button.input(), now);
            }
        }

        repaint
    }

    /// Secondary drag moves the window, a primary press on the grip resizes it
    fn window_commands(&self, ctx: &egui::Context, blocked: &[Rect], grip: Rect) {
        let (secondary, grip_pressed) = ctx.input(|i| {
            let origin = i.pointer.press_origin();
            (
                i.pointer.button_pressed(PointerButton::Secondary)
                    && !origin.is_some_and(|p| blocked.iter().any(|r| r.contains(p))),
                i.pointer.button_pressed(PointerButton::Primary)
                    && origin.is_some_and(|p| grip.contains(p)),
            )
        });

        if secondary {
            ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
        }
        if grip_pressed {
            ctx.send_viewport_cmd(egui::ViewportCommand::BeginResize(ResizeDirection::SouthEast));
        }
    }

    /// Upload the frame's image when it changed since the last paint
    fn sync_texture(&mut self, ctx: &egui::Context, frame: &FrameInstance) {
        if self.texture_generation == frame.image_generation() {
            return;
        }
        self.texture_generation = frame.image_generation();
        self.texture = frame.image().map(|img| {
            let color = egui::ColorImage::from_rgba_unmultiplied(img.pixel_size, &img.pixels);
            ctx.load_texture(format!("{}-image", self.id), color, egui::TextureOptions::LINEAR)
        });
    }
}

fn paint_image(painter: &egui::Painter, texture: egui::TextureId, rect: Rect, style: PreviewStyle) {
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    for (offset, weight) in blur_taps(style.blur_radius.unwrap_or(0.0)) {
        let tint = Color32::WHITE.gamma_multiply(style.opacity * weight);
        painter.image(texture, rect.translate(offset), uv, tint);
    }
}

fn paint_placeholder(painter: &egui::Painter, screen: Rect) {
    painter.rect_filled(screen, 6.0, Color32::from_rgba_unmultiplied(20, 20, 20, 180));
    painter.text(
        screen.center(),
        Align2::CENTER_CENTER,
        "Drop an image here",
        FontId::proportional(14.0),
        Color32::GRAY,
    );
}

/// Offsets and weights approximating a blur of `radius`: the image itself
/// plus a ring of shifted copies. Weights sum to 1.
pub fn blur_taps(radius: f32) -> Vec<(Vec2, f32)> {
    if radius.is_nan() || radius < 0.5 {
        return vec![(Vec2::ZERO, 1.0)];
    }

    let center_weight = 0.2;
    let ring_weight = (1.0 - center_weight) / BLUR_RING_TAPS as f32;
    let spread = radius * 0.5;

    let mut taps = Vec::with_capacity(BLUR_RING_TAPS + 1);
    taps.push((Vec2::ZERO, center_weight));
    for k in 0..BLUR_RING_TAPS {
        let angle = k as f32 * std::f32::consts::TAU / BLUR_RING_TAPS as f32;
        taps.push((Vec2::angled(angle) * spread, ring_weight));
    }
    taps
}

/// Procedural app icon: a picture frame with a sun and a hill line
pub fn frame_icon() -> egui::IconData {
    let w: usize = 64;
    let h: usize = 64;
    let mut rgba = vec![0u8; w * h * 4];

    let border = 6.0;
    let (left, right) = (border, w as f32 - border);
    let (top, bottom) = (border, h as f32 - border);

    for y in 0..h {
        for x in 0..w {
            let fx = x as f32 + 0.5;
            let fy = y as f32 + 0.5;

            let inside_x = fx >= left && fx <= right;
            let inside_y = fy >= top && fy <= bottom;
            let on_border = (inside_x && ((fy - top).abs() < 2.0 || (fy - bottom).abs() < 2.0))
                || (inside_y && ((fx - left).abs() < 2.0 || (fx - right).abs() < 2.0));

            let sun = vec2(fx - (right - 14.0), fy - (top + 14.0));
            let on_sun = sun.length_sq() <= 6.0 * 6.0;

            let hill_y = bottom - 4.0 - (fx - left) * 0.45;
            let on_hill = inside_x && fx <= right - 6.0 && (fy - hill_y).abs() < 1.5;

            if on_border || on_sun || on_hill {
                let idx = (y * w + x) * 4;
                rgba[idx..idx + 4].copy_from_slice(&[255, 255, 255, 235]);
            }
        }
    }

    egui::IconData {
        rgba,
        width: w as u32,
        height: h as u32,
    }
}
