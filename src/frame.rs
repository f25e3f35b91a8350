//! One picture frame: gesture engine, image cycler, hover preview and
//! slideshow timer composed behind a single typed input entry point.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use egui::{Pos2, Vec2};
use tracing::{debug, info, warn};

use crate::config::{FrameConfig, WindowRect};
use crate::cycler::{Advance, ImageCycler};
use crate::gesture::{FitMode, GestureEngine, GestureOutcome, TransformState};
use crate::image_loader::{DecodedImage, ImageDecoder};
use crate::preview::{HoverPreview, PreviewStyle};

/// Window size used when no usable geometry was stored
pub const DEFAULT_FRAME_SIZE: Vec2 = Vec2::new(320.0, 240.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

/// What a frame may ask of its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    NewFrame,
    Remove(FrameId),
}

/// Raw input, already translated into frame coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum FrameInput {
    PointerEnter,
    PointerLeave,
    PrimaryDown { pos: Pos2, click_count: u32 },
    PrimaryMove { pos: Pos2 },
    PrimaryUp { pos: Pos2 },
    Wheel { pivot: Pos2, step: f32 },
    TouchStart { origin: Pos2 },
    TouchDelta { scale: Vec2, translation: Vec2, origin: Pos2 },
    TouchEnd,
    Resized { viewport: Vec2 },
    Moved { rect: WindowRect },
    FileDropped(PathBuf),
    ToggleLock,
    ToggleRandomOrder,
    ToggleFitMode,
    NewFrame,
    Close,
    Tick,
}

/// Automatic advance every `interval`
#[derive(Debug, Clone)]
pub struct SlideshowTimer {
    interval: Duration,
    last_advance: Instant,
}

impl SlideshowTimer {
    pub fn new(interval_minutes: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs(u64::from(interval_minutes.max(1)) * 60),
            last_advance: now,
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.last_advance = now;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_advance) >= self.interval
    }

    /// Time left until the next automatic advance
    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_advance))
    }
}

pub struct FrameInstance {
    id: FrameId,
    requests: Sender<HostRequest>,
    cycler: ImageCycler,
    gestures: GestureEngine,
    preview: HoverPreview,
    timer: SlideshowTimer,
    interval_minutes: u32,
    window_rect: WindowRect,
    last_geometry: Option<WindowRect>,
    image: Option<DecodedImage>,
    image_generation: u64,
}

impl FrameInstance {
    /// Build a frame from its stored config. The image at the stored index
    /// is shown at rest; nothing advances.
    pub fn create(
        id: FrameId,
        config: FrameConfig,
        requests: Sender<HostRequest>,
        decoder: &dyn ImageDecoder,
        now: Instant,
    ) -> Self {
        let cycler = ImageCycler::new(
            config.image_paths,
            config.index,
            config.locked,
            config.random_order,
        );
        Self::with_cycler(
            id,
            cycler,
            config.interval_minutes,
            config.fit_mode,
            config.window_rect,
            requests,
            decoder,
            now,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn with_cycler(
        id: FrameId,
        cycler: ImageCycler,
        interval_minutes: u32,
        fit_mode: FitMode,
        window_rect: WindowRect,
        requests: Sender<HostRequest>,
        decoder: &dyn ImageDecoder,
        now: Instant,
    ) -> Self {
        let mut gestures = GestureEngine::new(fit_mode);
        gestures.set_viewport(if window_rect.is_usable() {
            window_rect.size()
        } else {
            DEFAULT_FRAME_SIZE
        });

        let mut frame = Self {
            id,
            requests,
            cycler,
            gestures,
            preview: HoverPreview::new(),
            timer: SlideshowTimer::new(interval_minutes, now),
            interval_minutes: interval_minutes.max(1),
            window_rect,
            last_geometry: None,
            image: None,
            image_generation: 0,
        };

        match frame.cycler.show_current(decoder) {
            Advance::Shown(img) => frame.display(img),
            Advance::Failed(e) => info!(frame = %id, error = %e, "opened without an image"),
            Advance::Empty => debug!(frame = %id, "opened with an empty image list"),
        }
        info!(frame = %id, images = frame.cycler.paths().len(), "frame created");
        frame
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    /// Stored geometry to open with, if it has a positive size
    pub fn initial_rect(&self) -> Option<WindowRect> {
        self.window_rect.is_usable().then_some(self.window_rect)
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    /// Bumped every time a new image is displayed
    pub fn image_generation(&self) -> u64 {
        self.image_generation
    }

    pub fn transform(&self) -> &TransformState {
        self.gestures.transform()
    }

    pub fn gestures(&self) -> &GestureEngine {
        &self.gestures
    }

    pub fn cycler(&self) -> &ImageCycler {
        &self.cycler
    }

    pub fn is_locked(&self) -> bool {
        self.cycler.is_locked()
    }

    /// Time until the slideshow advances; `None` when locked or empty
    pub fn next_advance_in(&self, now: Instant) -> Option<Duration> {
        self.can_auto_advance().then(|| self.timer.remaining(now))
    }

    fn can_auto_advance(&self) -> bool {
        !self.cycler.is_locked() && !self.cycler.paths().is_empty()
    }

    /// Sample the hover transition for this paint
    pub fn preview_style(&mut self, now: Instant) -> PreviewStyle {
        self.preview.update(now)
    }

    pub fn is_animating(&self) -> bool {
        self.preview.is_animating()
    }

    /// Persistable snapshot reflecting the latest known geometry
    pub fn config(&self) -> FrameConfig {
        FrameConfig {
            image_paths: self.cycler.paths().to_vec(),
            index: self.cycler.index(),
            locked: self.cycler.is_locked(),
            interval_minutes: self.interval_minutes,
            random_order: self.cycler.is_random_order(),
            fit_mode: self.gestures.fit_mode(),
            window_rect: self.last_geometry.unwrap_or(self.window_rect),
        }
    }

    /// Tear down, writing the current geometry into the returned config
    pub fn close(mut self) -> FrameConfig {
        if let Some(rect) = self.last_geometry.take() {
            self.window_rect = rect;
        }
        info!(frame = %self.id, rect = ?self.window_rect, "frame closed");
        self.config()
    }

    /// Dispatch one input event. Returns true when a repaint is needed.
    pub fn handle(&mut self, input: FrameInput, decoder: &dyn ImageDecoder, now: Instant) -> bool {
        match input {
            FrameInput::PointerEnter => {
                let locked = self.cycler.is_locked();
                if !locked {
                    self.advance(decoder, now);
                }
                self.preview.on_pointer_enter(locked, now)
            }
            FrameInput::PointerLeave => self.preview.on_pointer_leave(self.cycler.is_locked(), now),
            FrameInput::PrimaryDown { pos, click_count } => {
                self.gestures.on_primary_down(pos, click_count) == GestureOutcome::Reset
            }
            FrameInput::PrimaryMove { pos } => self.gestures.on_primary_move(pos),
            FrameInput::PrimaryUp { pos } => match self.gestures.on_primary_up(pos) {
                GestureOutcome::Click if !self.cycler.is_locked() => {
                    self.advance(decoder, now);
                    true
                }
                _ => false,
            },
            FrameInput::Wheel { pivot, step } => self.gestures.on_wheel_or_pinch(pivot, step),
            FrameInput::TouchStart { origin } => {
                self.gestures.on_touch_manipulation_start(origin);
                false
            }
            FrameInput::TouchDelta {
                scale,
                translation,
                origin,
            } => self
                .gestures
                .on_touch_manipulation_delta(scale, translation, origin),
            FrameInput::TouchEnd => {
                self.gestures.on_touch_manipulation_end();
                false
            }
            FrameInput::Resized { viewport } => {
                let before = *self.gestures.transform();
                self.gestures.set_viewport(viewport);
                before != *self.gestures.transform()
            }
            FrameInput::Moved { rect } => {
                self.last_geometry = Some(rect);
                false
            }
            FrameInput::FileDropped(path) => {
                info!(frame = %self.id, path = %path.display(), "image dropped");
                let outcome = self.cycler.add_and_show(path, decoder);
                self.apply(outcome, now);
                true
            }
            FrameInput::ToggleLock => {
                let locked = self.cycler.toggle_lock();
                info!(frame = %self.id, locked, "lock toggled");
                true
            }
            FrameInput::ToggleRandomOrder => {
                let random = self.cycler.toggle_random_order();
                info!(frame = %self.id, random, "cycling order toggled");
                true
            }
            FrameInput::ToggleFitMode => {
                let next = match self.gestures.fit_mode() {
                    FitMode::Contain => FitMode::Fill,
                    FitMode::Fill => FitMode::Contain,
                };
                self.gestures.set_fit_mode(next);
                true
            }
            FrameInput::NewFrame => {
                self.request(HostRequest::NewFrame);
                false
            }
            FrameInput::Close => {
                self.request(HostRequest::Remove(self.id));
                false
            }
            FrameInput::Tick => {
                if self.can_auto_advance() && self.timer.is_due(now) {
                    debug!(frame = %self.id, "slideshow interval elapsed");
                    return self.advance(decoder, now);
                }
                self.preview.is_animating()
            }
        }
    }

    /// Returns true when a new image is on screen
    fn advance(&mut self, decoder: &dyn ImageDecoder, now: Instant) -> bool {
        let outcome = self.cycler.advance(decoder);
        self.apply(outcome, now)
    }

    fn apply(&mut self, outcome: Advance, now: Instant) -> bool {
        self.timer.restart(now);
        match outcome {
            Advance::Shown(img) => {
                self.display(img);
                true
            }
            Advance::Failed(e) => {
                debug!(frame = %self.id, error = %e, "previous image kept");
                false
            }
            Advance::Empty => false,
        }
    }

    fn display(&mut self, img: DecodedImage) {
        debug!(frame = %self.id, path = %img.path.display(), size = ?img.dimensions(), "showing image");
        self.gestures.set_content(Some(img.size_vec2()));
        self.image = Some(img);
        self.image_generation += 1;
    }

    fn request(&self, request: HostRequest) {
        if self.requests.send(request).is_err() {
            warn!(frame = %self.id, ?request, "host is gone, request dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycler::tests::FakeDecoder;
    use crossbeam_channel::{unbounded, Receiver};
    use egui::{pos2, vec2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn decoder() -> FakeDecoder {
        FakeDecoder::with(&[("a.png", 400, 300), ("b.png", 800, 400), ("c.png", 100, 200)])
    }

    fn config(locked: bool) -> FrameConfig {
        FrameConfig {
            image_paths: vec!["a.png".into(), "b.png".into(), "c.png".into()],
            index: 0,
            locked,
            window_rect: WindowRect::new(0.0, 0.0, 400.0, 300.0),
            ..FrameConfig::default()
        }
    }

    fn frame(cfg: FrameConfig, dec: &FakeDecoder, now: Instant) -> (FrameInstance, Receiver<HostRequest>) {
        let (tx, rx) = unbounded();
        (FrameInstance::create(FrameId(1), cfg, tx, dec, now), rx)
    }

    fn click(f: &mut FrameInstance, dec: &FakeDecoder, now: Instant, p: Pos2) {
        f.handle(FrameInput::PrimaryDown { pos: p, click_count: 1 }, dec, now);
        f.handle(FrameInput::PrimaryUp { pos: p }, dec, now);
    }

    #[test]
    fn create_shows_stored_index_at_rest() {
        let dec = decoder();
        let mut cfg = config(false);
        cfg.index = 1;
        let (f, _rx) = frame(cfg, &dec, Instant::now());

        assert_eq!(f.cycler().index(), 1);
        assert_eq!(*dec.calls.borrow(), vec![PathBuf::from("b.png")]);
        assert_eq!(f.image().unwrap().dimensions(), (800, 400));
        assert_eq!(f.image_generation(), 1);
        // contain fit into the stored 400x300 geometry
        assert!(approx(f.transform().display_size, vec2(400.0, 200.0)));
    }

    #[test]
    fn create_with_bad_image_opens_empty() {
        let dec = FakeDecoder::default();
        let (f, _rx) = frame(config(false), &dec, Instant::now());
        assert!(f.image().is_none());
        assert_eq!(f.image_generation(), 0);
    }

    #[test]
    fn create_with_no_images_does_not_decode() {
        let dec = decoder();
        let (f, _rx) = frame(FrameConfig::default(), &dec, Instant::now());
        assert_eq!(dec.call_count(), 0);
        assert!(f.initial_rect().is_none());
        assert_eq!(f.gestures().viewport(), DEFAULT_FRAME_SIZE);
    }

    #[test]
    fn click_advances_when_unlocked() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, _rx) = frame(config(false), &dec, now);

        click(&mut f, &dec, now, pos2(10.0, 10.0));
        assert_eq!(f.cycler().index(), 1);
        assert_eq!(dec.call_count(), 2);
        assert_eq!(f.image().unwrap().dimensions(), (800, 400));
    }

    #[test]
    fn drag_pans_without_advancing() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, _rx) = frame(config(false), &dec, now);
        let before = f.transform().translation;

        f.handle(FrameInput::PrimaryDown { pos: pos2(10.0, 10.0), click_count: 1 }, &dec, now);
        f.handle(FrameInput::PrimaryMove { pos: pos2(30.0, 15.0) }, &dec, now);
        f.handle(FrameInput::PrimaryUp { pos: pos2(30.0, 15.0) }, &dec, now);

        assert_eq!(f.cycler().index(), 0);
        assert_eq!(dec.call_count(), 1);
        assert!(approx(f.transform().translation - before, vec2(20.0, 5.0)));
    }

    #[test]
    fn lock_suppresses_hover_and_click() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, _rx) = frame(config(true), &dec, now);
        let calls = dec.call_count();

        assert!(!f.handle(FrameInput::PointerEnter, &dec, now));
        assert!(!f.handle(FrameInput::PointerLeave, &dec, now));
        click(&mut f, &dec, now, pos2(5.0, 5.0));

        assert_eq!(dec.call_count(), calls);
        assert_eq!(f.cycler().index(), 0);
        assert!(!f.is_animating());
    }

    #[test]
    fn hover_enter_advances_and_animates() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, _rx) = frame(config(false), &dec, now);

        assert!(f.handle(FrameInput::PointerEnter, &dec, now));
        assert_eq!(f.cycler().index(), 1);
        assert!(f.is_animating());

        let style = f.preview_style(now);
        assert!(style.blur_radius.is_some());

        assert!(f.handle(FrameInput::PointerLeave, &dec, now));
        assert_eq!(f.cycler().index(), 1);
    }

    #[test]
    fn unlocking_reenables_triggers() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, _rx) = frame(config(true), &dec, now);

        f.handle(FrameInput::ToggleLock, &dec, now);
        assert!(!f.is_locked());
        click(&mut f, &dec, now, pos2(1.0, 1.0));
        assert_eq!(f.cycler().index(), 1);
    }

    #[test]
    fn drop_bypasses_lock_and_shows_new_image() {
        let dec = FakeDecoder::with(&[("a.png", 400, 300), ("new.png", 50, 100)]);
        let now = Instant::now();
        let (mut f, _rx) = frame(config(true), &dec, now);

        assert!(f.handle(FrameInput::FileDropped("new.png".into()), &dec, now));
        assert_eq!(f.cycler().paths().len(), 4);
        assert_eq!(f.cycler().index(), 3);
        assert_eq!(f.image().unwrap().dimensions(), (50, 100));
        assert!(approx(f.transform().display_size, vec2(150.0, 300.0)));
    }

    #[test]
    fn failed_advance_keeps_previous_image() {
        let dec = FakeDecoder::with(&[("a.png", 400, 300)]);
        let now = Instant::now();
        let (mut f, _rx) = frame(config(false), &dec, now);
        let generation = f.image_generation();

        click(&mut f, &dec, now, pos2(1.0, 1.0));
        assert_eq!(f.cycler().index(), 1);
        assert_eq!(f.image().unwrap().path, PathBuf::from("a.png"));
        assert_eq!(f.image_generation(), generation);
    }

    #[test]
    fn double_click_resets_view() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, _rx) = frame(config(false), &dec, now);
        let fitted = *f.transform();

        f.handle(FrameInput::Wheel { pivot: pos2(10.0, 10.0), step: 1.1 }, &dec, now);
        assert_ne!(*f.transform(), fitted);
        f.handle(FrameInput::PrimaryDown { pos: pos2(3.0, 3.0), click_count: 1 }, &dec, now);
        f.handle(FrameInput::PrimaryUp { pos: pos2(3.0, 3.0) }, &dec, now);
        // the first click of the pair advanced to b.png
        let refitted = *f.transform();
        f.handle(FrameInput::Wheel { pivot: pos2(10.0, 10.0), step: 1.1 }, &dec, now);
        assert!(f.handle(FrameInput::PrimaryDown { pos: pos2(3.0, 3.0), click_count: 2 }, &dec, now));
        assert_eq!(*f.transform(), refitted);
        // release of the reset press is not a click
        f.handle(FrameInput::PrimaryUp { pos: pos2(3.0, 3.0) }, &dec, now);
        assert_eq!(f.cycler().index(), 1);
    }

    #[test]
    fn touch_session_swallows_clicks() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, _rx) = frame(config(false), &dec, now);

        f.handle(FrameInput::TouchStart { origin: pos2(0.0, 0.0) }, &dec, now);
        click(&mut f, &dec, now, pos2(2.0, 2.0));
        assert_eq!(f.cycler().index(), 0);

        assert!(f.handle(
            FrameInput::TouchDelta { scale: vec2(1.0, 1.0), translation: vec2(4.0, 0.0), origin: pos2(0.0, 0.0) },
            &dec,
            now,
        ));
        f.handle(FrameInput::TouchEnd, &dec, now);
        click(&mut f, &dec, now, pos2(2.0, 2.0));
        assert_eq!(f.cycler().index(), 1);
    }

    #[test]
    fn close_captures_latest_geometry() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, _rx) = frame(config(false), &dec, now);
        f.handle(FrameInput::ToggleRandomOrder, &dec, now);
        f.handle(FrameInput::Moved { rect: WindowRect::new(50.0, 60.0, 640.0, 480.0) }, &dec, now);

        let cfg = f.close();
        assert_eq!(cfg.window_rect, WindowRect::new(50.0, 60.0, 640.0, 480.0));
        assert!(cfg.random_order);
        assert_eq!(cfg.image_paths.len(), 3);
        assert_eq!(cfg.interval_minutes, 5);
    }

    #[test]
    fn close_without_geometry_keeps_stored_rect() {
        let dec = decoder();
        let (f, _rx) = frame(config(false), &dec, Instant::now());
        assert_eq!(f.close().window_rect, WindowRect::new(0.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn buttons_reach_the_host() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, rx) = frame(config(false), &dec, now);

        f.handle(FrameInput::NewFrame, &dec, now);
        f.handle(FrameInput::Close, &dec, now);
        assert_eq!(rx.try_recv(), Ok(HostRequest::NewFrame));
        assert_eq!(rx.try_recv(), Ok(HostRequest::Remove(FrameId(1))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn slideshow_advances_after_interval() {
        let dec = decoder();
        let t0 = Instant::now();
        let mut cfg = config(false);
        cfg.interval_minutes = 2;
        let (mut f, _rx) = frame(cfg, &dec, t0);

        f.handle(FrameInput::Tick, &dec, t0 + Duration::from_secs(119));
        assert_eq!(f.cycler().index(), 0);

        assert!(f.handle(FrameInput::Tick, &dec, t0 + Duration::from_secs(120)));
        assert_eq!(f.cycler().index(), 1);

        // interval restarts from the last advance
        f.handle(FrameInput::Tick, &dec, t0 + Duration::from_secs(200));
        assert_eq!(f.cycler().index(), 1);
        assert_eq!(
            f.next_advance_in(t0 + Duration::from_secs(200)),
            Some(Duration::from_secs(40))
        );
    }

    #[test]
    fn idle_frames_do_not_request_repaints() {
        let dec = decoder();
        let t0 = Instant::now();
        let (mut empty, _rx1) = frame(FrameConfig::default(), &dec, t0);
        let (mut locked, _rx2) = frame(config(true), &dec, t0);

        for secs in [301, 302, 900] {
            let now = t0 + Duration::from_secs(secs);
            assert!(!empty.handle(FrameInput::Tick, &dec, now));
            assert!(!locked.handle(FrameInput::Tick, &dec, now));
            assert_eq!(empty.next_advance_in(now), None);
            assert_eq!(locked.next_advance_in(now), None);
        }
        assert_eq!(dec.call_count(), 1);
        assert_eq!(locked.cycler().index(), 0);
    }

    #[test]
    fn unlocking_resumes_the_slideshow() {
        let dec = decoder();
        let t0 = Instant::now();
        let (mut f, _rx) = frame(config(true), &dec, t0);
        f.handle(FrameInput::ToggleLock, &dec, t0 + Duration::from_secs(10));
        assert_eq!(f.next_advance_in(t0 + Duration::from_secs(10)), Some(Duration::from_secs(290)));
    }

    #[test]
    fn slideshow_respects_lock() {
        let dec = decoder();
        let t0 = Instant::now();
        let (mut f, _rx) = frame(config(true), &dec, t0);
        f.handle(FrameInput::Tick, &dec, t0 + Duration::from_secs(3600));
        assert_eq!(f.cycler().index(), 0);
    }

    #[test]
    fn random_cycler_can_be_injected() {
        let dec = decoder();
        let (tx, _rx) = unbounded();
        let cycler = ImageCycler::with_rng(
            vec!["a.png".into(), "b.png".into()],
            0,
            false,
            true,
            StdRng::seed_from_u64(1),
        );
        let now = Instant::now();
        let mut f = FrameInstance::with_cycler(
            FrameId(9),
            cycler,
            5,
            FitMode::Fill,
            WindowRect::default(),
            tx,
            &dec,
            now,
        );
        for _ in 0..10 {
            f.handle(FrameInput::PointerEnter, &dec, now);
            assert!(f.cycler().index() < 2);
        }
        assert_eq!(f.config().fit_mode, FitMode::Fill);
    }

    #[test]
    fn fit_mode_toggle_refits() {
        let dec = decoder();
        let now = Instant::now();
        let mut cfg = config(false);
        cfg.index = 1;
        let (mut f, _rx) = frame(cfg, &dec, now);

        assert!(f.handle(FrameInput::ToggleFitMode, &dec, now));
        assert!(approx(f.transform().display_size, vec2(600.0, 300.0)));
        assert_eq!(f.config().fit_mode, FitMode::Fill);
    }

    #[test]
    fn resize_refits_current_image() {
        let dec = decoder();
        let now = Instant::now();
        let (mut f, _rx) = frame(config(false), &dec, now);
        assert!(f.handle(FrameInput::Resized { viewport: vec2(200.0, 150.0) }, &dec, now));
        assert!(approx(f.transform().display_size, vec2(200.0, 150.0)));
        assert!(!f.handle(FrameInput::Resized { viewport: vec2(200.0, 150.0) }, &dec, now));
    }
}
