//! Desktop picture frames
//! Built with Rust + egui (eframe)

#![windows_subsystem = "windows"]

mod animation;
mod app;
mod config;
mod cycler;
mod frame;
mod gesture;
mod image_loader;
mod input;
mod orchestrator;
mod preview;
mod ui;
mod window;

use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::DeskFrameApp;
use config::{JsonSettingsStore, SETTINGS_KEY, SETTINGS_NAMESPACE};
use image_loader::FileDecoder;
use orchestrator::FrameOrchestrator;

/// Fallback log filter when `RUST_LOG` is unset, e.g. `debug`
const LOG_ENV: &str = "DESK_FRAME_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Root window driving `update()` for every frame viewport: visible, but a
/// 1x1 transparent click-through window with no taskbar entry.
fn root_viewport() -> egui::ViewportBuilder {
    egui::ViewportBuilder::default()
        .with_title("desk-frame")
        .with_inner_size([1.0, 1.0])
        .with_position([0.0, 0.0])
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(false)
        .with_mouse_passthrough(true)
        .with_active(false)
        .with_taskbar(false)
        .with_icon(std::sync::Arc::new(window::frame_icon()))
}

fn main() -> eframe::Result<()> {
    init_logging();

    let store = JsonSettingsStore::from_env();
    info!(
        path = %store.path_for(SETTINGS_KEY, SETTINGS_NAMESPACE).display(),
        "settings location"
    );

    let mut orchestrator = FrameOrchestrator::new(store, Box::new(FileDecoder::default()));
    let events = orchestrator.subscribe();
    if let Err(e) = orchestrator.start(Instant::now()) {
        error!(error = %e, "could not load frame settings, starting with a default frame");
        orchestrator.start_with_defaults(Instant::now());
    }

    let options = eframe::NativeOptions {
        viewport: root_viewport(),
        ..Default::default()
    };

    eframe::run_native(
        "desk-frame",
        options,
        Box::new(move |cc| Ok(Box::new(DeskFrameApp::new(cc, orchestrator, events)))),
    )
}
