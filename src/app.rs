//! Main application module
//!
//! Hosts the orchestrator inside eframe. The root viewport is a 1x1
//! transparent window; every frame is painted into its own immediate viewport.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use tracing::{error, info};

use crate::config::SettingsStore;
use crate::frame::FrameId;
use crate::orchestrator::{FrameOrchestrator, ServiceEvent};
use crate::window::FrameWindow;

/// Slowest repaint cadence while idle
const IDLE_REPAINT: Duration = Duration::from_secs(1);

pub struct DeskFrameApp<S: SettingsStore> {
    orchestrator: FrameOrchestrator<S>,
    events: Receiver<ServiceEvent>,
    windows: HashMap<FrameId, FrameWindow>,
    shutting_down: bool,
}

impl<S: SettingsStore> DeskFrameApp<S> {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        orchestrator: FrameOrchestrator<S>,
        events: Receiver<ServiceEvent>,
    ) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = egui::Color32::TRANSPARENT;
        visuals.panel_fill = egui::Color32::TRANSPARENT;
        cc.egui_ctx.set_visuals(visuals);

        let mut app = Self {
            orchestrator,
            events,
            windows: HashMap::new(),
            shutting_down: false,
        };
        app.sync_windows();
        app
    }

    /// One window per live frame
    fn sync_windows(&mut self) {
        let frames = self.orchestrator.frames();
        self.windows
            .retain(|id, _| frames.iter().any(|f| f.id() == *id));
        for frame in frames {
            self.windows
                .entry(frame.id())
                .or_insert_with(|| FrameWindow::new(frame));
        }
    }

    fn handle_events(&mut self, ctx: &egui::Context) {
        for event in self.events.try_iter() {
            match event {
                ServiceEvent::ForceStop => {
                    info!("no frames left, exiting");
                    self.shutting_down = true;
                    ctx.send_viewport_cmd_to(egui::ViewportId::ROOT, egui::ViewportCommand::Close);
                }
                ServiceEvent::RunningChanged(running) => {
                    info!(running, state = ?self.orchestrator.state(), "frame service")
                }
            }
        }
    }

    /// Earliest slideshow deadline, never later than `IDLE_REPAINT`.
    /// Locked and empty frames have no deadline.
    fn next_wakeup(&self, now: Instant) -> Duration {
        earliest_wakeup(self.orchestrator.frames().iter().map(|f| f.next_advance_in(now)))
    }
}

impl<S: SettingsStore> eframe::App for DeskFrameApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let mut repaint = self.orchestrator.tick(now);

        let ids: Vec<FrameId> = self.orchestrator.frames().iter().map(|f| f.id()).collect();
        for id in ids {
            let Some(window) = self.windows.get_mut(&id) else {
                continue;
            };
            let orchestrator = &mut self.orchestrator;
            repaint |= ctx.show_viewport_immediate(window.viewport_id(), window.builder(), |ctx, _class| {
                window.show(ctx, orchestrator, now)
            });
        }

        if self.orchestrator.process_requests(now) {
            self.sync_windows();
            repaint = true;
        }
        self.handle_events(ctx);

        if self.shutting_down {
            return;
        }
        if repaint {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.next_wakeup(now));
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.orchestrator.stop() {
            error!(error = %e, "frame layout was not saved");
        }
    }
}

fn earliest_wakeup(deadlines: impl Iterator<Item = Option<Duration>>) -> Duration {
    deadlines.flatten().fold(IDLE_REPAINT, Duration::min)
}
