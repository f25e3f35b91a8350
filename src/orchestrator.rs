//! Owns the set of frames and their persisted configuration.
//!
//! Lifecycle: `Stopped -> Starting -> Running -> Stopping -> Stopped`.
//! Removing the last frame while running emits `ServiceEvent::ForceStop`;
//! the host reacts by calling `stop()`.

use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::config::{
    ConfigCollection, FrameConfig, SettingsError, SettingsStore, SETTINGS_KEY, SETTINGS_NAMESPACE,
};
use crate::frame::{FrameId, FrameInput, FrameInstance, HostRequest};
use crate::image_loader::ImageDecoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceEvent {
    /// Fired only when the running flag actually changes
    RunningChanged(bool),
    /// The last frame is gone
    ForceStop,
}

pub struct FrameOrchestrator<S: SettingsStore> {
    store: S,
    decoder: Box<dyn ImageDecoder>,
    state: ServiceState,
    frames: Vec<FrameInstance>,
    next_id: u64,
    requests_tx: Sender<HostRequest>,
    requests_rx: Receiver<HostRequest>,
    subscribers: Vec<Sender<ServiceEvent>>,
}

impl<S: SettingsStore> FrameOrchestrator<S> {
    pub fn new(store: S, decoder: Box<dyn ImageDecoder>) -> Self {
        let (requests_tx, requests_rx) = unbounded();
        Self {
            store,
            decoder,
            state: ServiceState::Stopped,
            frames: Vec::new(),
            next_id: 1,
            requests_tx,
            requests_rx,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ServiceState::Running
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn frames(&self) -> &[FrameInstance] {
        &self.frames
    }

    pub fn frame_mut(&mut self, id: FrameId) -> Option<&mut FrameInstance> {
        self.frames.iter_mut().find(|f| f.id() == id)
    }

    /// Receive lifecycle events from now on
    pub fn subscribe(&mut self) -> Receiver<ServiceEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Current configuration of every live frame, in creation order
    #[cfg(test)]
    pub fn collection(&self) -> ConfigCollection {
        ConfigCollection {
            frame_configs: self.frames.iter().map(FrameInstance::config).collect(),
        }
    }

    /// Load stored frames and open them. On error the orchestrator stays
    /// stopped and nothing is opened.
    pub fn start(&mut self, now: Instant) -> Result<(), SettingsError> {
        if self.state != ServiceState::Stopped {
            warn!(state = ?self.state, "start ignored");
            return Ok(());
        }

        self.set_state(ServiceState::Starting);
        let collection = match self.store.load(SETTINGS_KEY, SETTINGS_NAMESPACE) {
            Ok(collection) => collection,
            Err(e) => {
                self.set_state(ServiceState::Stopped);
                return Err(e);
            }
        };
        self.open_all(collection, now);
        self.set_state(ServiceState::Running);
        Ok(())
    }

    /// Start with a single default frame, without touching the store
    pub fn start_with_defaults(&mut self, now: Instant) {
        if self.state != ServiceState::Stopped {
            warn!(state = ?self.state, "start ignored");
            return;
        }
        self.set_state(ServiceState::Starting);
        self.open_all(ConfigCollection::default(), now);
        self.set_state(ServiceState::Running);
    }

    fn open_all(&mut self, mut collection: ConfigCollection, now: Instant) {
        if collection.is_empty() {
            info!("no stored frames, opening a default one");
            collection.frame_configs.push(FrameConfig::default());
        }
        for config in collection.frame_configs {
            self.open(config, now);
        }
    }

    fn open(&mut self, config: FrameConfig, now: Instant) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        let frame = FrameInstance::create(id, config, self.requests_tx.clone(), &*self.decoder, now);
        self.frames.push(frame);
        id
    }

    pub fn create_new_frame(&mut self, now: Instant) -> FrameId {
        let id = self.open(FrameConfig::default(), now);
        info!(frame = %id, total = self.frames.len(), "new frame");
        id
    }

    /// Close and forget a frame. Unknown ids are ignored.
    pub fn remove_frame(&mut self, id: FrameId) -> Option<FrameConfig> {
        let Some(pos) = self.frames.iter().position(|f| f.id() == id) else {
            debug!(frame = %id, "remove of unknown frame ignored");
            return None;
        };

        let config = self.frames.remove(pos).close();
        info!(frame = %id, remaining = self.frames.len(), "frame removed");

        if self.frames.is_empty() && self.state == ServiceState::Running {
            info!("last frame removed, requesting shutdown");
            self.emit(ServiceEvent::ForceStop);
        }
        Some(config)
    }

    /// Close every frame, then persist their configs
    pub fn stop(&mut self) -> Result<(), SettingsError> {
        if self.state != ServiceState::Running {
            debug!(state = ?self.state, "stop ignored");
            return Ok(());
        }

        self.set_state(ServiceState::Stopping);
        let collection = ConfigCollection {
            frame_configs: self.frames.drain(..).map(FrameInstance::close).collect(),
        };
        let saved = self.store.save(SETTINGS_KEY, SETTINGS_NAMESPACE, &collection);
        match &saved {
            Ok(()) => info!(frames = collection.len(), "frame settings saved"),
            Err(e) => error!(error = %e, "failed to save frame settings"),
        }
        self.set_state(ServiceState::Stopped);
        saved
    }

    /// Route one input to a frame. Returns true when it needs a repaint.
    pub fn dispatch(&mut self, id: FrameId, input: FrameInput, now: Instant) -> bool {
        let decoder = &*self.decoder;
        match self.frames.iter_mut().find(|f| f.id() == id) {
            Some(frame) => frame.handle(input, decoder, now),
            None => false,
        }
    }

    /// Give every frame a chance to run its timers
    pub fn tick(&mut self, now: Instant) -> bool {
        let decoder = &*self.decoder;
        self.frames
            .iter_mut()
            .fold(false, |repaint, f| f.handle(FrameInput::Tick, decoder, now) | repaint)
    }

    /// Apply queued frame requests. Returns true if the frame set changed.
    pub fn process_requests(&mut self, now: Instant) -> bool {
        let pending: Vec<HostRequest> = self.requests_rx.try_iter().collect();
        let mut changed = false;
        for request in pending {
            match request {
                HostRequest::NewFrame => {
                    self.create_new_frame(now);
                    changed = true;
                }
                HostRequest::Remove(id) => changed |= self.remove_frame(id).is_some(),
            }
        }
        changed
    }

    fn set_state(&mut self, state: ServiceState) {
        if self.state == state {
            return;
        }
        let was_running = self.is_running();
        debug!(from = ?self.state, to = ?state, "orchestrator state");
        self.state = state;

        let running = self.is_running();
        if running != was_running {
            self.emit(ServiceEvent::RunningChanged(running));
        }
    }

    fn emit(&mut self, event: ServiceEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}
