//! Persisted frame configuration.
//!
//! The whole `ConfigCollection` is loaded and saved as one JSON document
//! keyed by a namespace/key pair. Missing fields fall back to defaults and
//! out-of-range values are corrected on load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::gesture::FitMode;

pub const SETTINGS_NAMESPACE: &str = "desk-frame";
pub const SETTINGS_KEY: &str = "frames";

/// Overrides the settings root directory
pub const CONFIG_DIR_ENV: &str = "DESK_FRAME_CONFIG_DIR";

pub const DEFAULT_INTERVAL_MINUTES: u32 = 5;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {} is not valid: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Last known on-screen geometry of a frame window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl WindowRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Only rectangles with a positive size are applied on open
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn position(&self) -> egui::Pos2 {
        egui::pos2(self.left, self.top)
    }

    pub fn size(&self) -> egui::Vec2 {
        egui::vec2(self.width, self.height)
    }
}

impl From<egui::Rect> for WindowRect {
    fn from(rect: egui::Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }
}

/// Persisted state of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameConfig {
    /// Cycling order in sequential mode
    pub image_paths: Vec<PathBuf>,
    pub index: usize,
    pub locked: bool,
    pub interval_minutes: u32,
    pub random_order: bool,
    pub fit_mode: FitMode,
    pub window_rect: WindowRect,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            image_paths: Vec::new(),
            index: 0,
            locked: false,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            random_order: false,
            fit_mode: FitMode::Contain,
            window_rect: WindowRect::default(),
        }
    }
}

impl FrameConfig {
    /// Correct out-of-range values in place; returns true if anything changed
    pub fn validate(&mut self) -> bool {
        let mut changed = false;

        if self.interval_minutes < 1 {
            warn!(interval_minutes = self.interval_minutes, "interval below one minute, using 1");
            self.interval_minutes = 1;
            changed = true;
        }

        if self.index != 0 && self.index >= self.image_paths.len() {
            warn!(index = self.index, len = self.image_paths.len(), "image index out of range, using 0");
            self.index = 0;
            changed = true;
        }

        let r = self.window_rect;
        let finite = [r.left, r.top, r.width, r.height].iter().all(|v| v.is_finite());
        if !finite || r.width < 0.0 || r.height < 0.0 {
            warn!(rect = ?r, "invalid window rect, using platform default");
            self.window_rect = WindowRect::default();
            changed = true;
        }

        changed
    }
}

/// All frames, persisted and loaded as a unit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigCollection {
    pub frame_configs: Vec<FrameConfig>,
}

impl ConfigCollection {
    pub fn len(&self) -> usize {
        self.frame_configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_configs.is_empty()
    }

    pub fn validate(&mut self) -> bool {
        self.frame_configs
            .iter_mut()
            .fold(false, |changed, fc| fc.validate() | changed)
    }
}

/// Key-value settings service
pub trait SettingsStore {
    /// Returns an empty collection when nothing is stored yet
    fn load(&self, key: &str, namespace: &str) -> Result<ConfigCollection, SettingsError>;
    fn save(&self, key: &str, namespace: &str, data: &ConfigCollection) -> Result<(), SettingsError>;
}

/// Stores each collection at `<root>/<namespace>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    root: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$DESK_FRAME_CONFIG_DIR`, else the platform config directory, else `.`
    pub fn from_env() -> Self {
        let root = std::env::var_os(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    pub fn path_for(&self, key: &str, namespace: &str) -> PathBuf {
        self.root.join(namespace).join(format!("{key}.json"))
    }

    /// Move an unreadable file aside so a later save cannot clobber it
    fn preserve_corrupt(path: &Path) {
        let mut backup = path.as_os_str().to_owned();
        backup.push(".corrupt");
        match fs::rename(path, &backup) {
            Ok(()) => warn!(path = %path.display(), backup = ?backup, "preserved unreadable settings file"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not preserve unreadable settings file"),
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self, key: &str, namespace: &str) -> Result<ConfigCollection, SettingsError> {
        let path = self.path_for(key, namespace);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no settings file yet");
                return Ok(ConfigCollection::default());
            }
            Err(source) => return Err(SettingsError::Io { path, source }),
        };

        let mut collection: ConfigCollection = match serde_json::from_str(&content) {
            Ok(c) => c,
            Err(source) => {
                Self::preserve_corrupt(&path);
                return Err(SettingsError::Parse { path, source });
            }
        };
        collection.validate();

        info!(path = %path.display(), frames = collection.len(), "loaded frame settings");
        Ok(collection)
    }

    fn save(&self, key: &str, namespace: &str, data: &ConfigCollection) -> Result<(), SettingsError> {
        let path = self.path_for(key, namespace);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(data)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| SettingsError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), frames = data.len(), "saved frame settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigCollection {
        ConfigCollection {
            frame_configs: vec![
                FrameConfig {
                    image_paths: vec![PathBuf::from("/pics/a.png"), PathBuf::from("/pics/b.jpg")],
                    index: 1,
                    locked: true,
                    interval_minutes: 12,
                    random_order: true,
                    fit_mode: FitMode::Fill,
                    window_rect: WindowRect::new(10.0, 20.0, 300.0, 200.0),
                },
                FrameConfig::default(),
            ],
        }
    }

    #[test]
    fn round_trip_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path());

        let data = sample();
        store.save(SETTINGS_KEY, SETTINGS_NAMESPACE, &data).unwrap();
        let loaded = store.load(SETTINGS_KEY, SETTINGS_NAMESPACE).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path());
        assert!(store.load("nothing", "here").unwrap().is_empty());
    }

    #[test]
    fn saved_document_uses_camel_case_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path());
        store.save("frames", "ns", &sample()).unwrap();

        let path = store.path_for("frames", "ns");
        assert_eq!(path, dir.path().join("ns").join("frames.json"));
        let text = fs::read_to_string(&path).unwrap();
        for field in ["frameConfigs", "imagePaths", "intervalMinutes", "randomOrder", "windowRect", "\"fill\""] {
            assert!(text.contains(field), "missing {field} in {text}");
        }
        assert!(!dir.path().join("ns").join("frames.json.tmp").exists());
    }

    #[test]
    fn absent_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path());
        let path = store.path_for("frames", "ns");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"frameConfigs":[{"imagePaths":["x.png"]},{}]}"#).unwrap();

        let loaded = store.load("frames", "ns").unwrap();
        assert_eq!(loaded.len(), 2);
        let first = &loaded.frame_configs[0];
        assert_eq!(first.image_paths, vec![PathBuf::from("x.png")]);
        assert_eq!(first.index, 0);
        assert!(!first.locked);
        assert_eq!(first.interval_minutes, DEFAULT_INTERVAL_MINUTES);
        assert_eq!(first.fit_mode, FitMode::Contain);
        assert!(!first.window_rect.is_usable());
        assert_eq!(loaded.frame_configs[1], FrameConfig::default());
    }

    #[test]
    fn corrupt_file_is_an_error_and_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path());
        let path = store.path_for("frames", "ns");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = store.load("frames", "ns").unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }), "{err:?}");
        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("ns").join("frames.json.corrupt")).unwrap(),
            "{ not json"
        );
    }

    #[test]
    fn load_corrects_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path());
        let path = store.path_for("frames", "ns");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"frameConfigs":[{"imagePaths":["a.png"],"index":4,"intervalMinutes":0,
                "windowRect":{"left":1,"top":2,"width":-5,"height":10}}]}"#,
        )
        .unwrap();

        let fc = &store.load("frames", "ns").unwrap().frame_configs[0];
        assert_eq!(fc.index, 0);
        assert_eq!(fc.interval_minutes, 1);
        assert_eq!(fc.window_rect, WindowRect::default());
    }

    #[test]
    fn validate_reports_changes() {
        let mut fc = FrameConfig::default();
        assert!(!fc.validate());
        fc.interval_minutes = 0;
        assert!(fc.validate());
        assert!(!fc.validate());
    }

    #[test]
    fn rect_usability_needs_positive_size() {
        assert!(WindowRect::new(0.0, 0.0, 1.0, 1.0).is_usable());
        assert!(!WindowRect::new(5.0, 5.0, 0.0, 100.0).is_usable());
        assert!(!WindowRect::new(5.0, 5.0, 100.0, 0.0).is_usable());

        let rect = egui::Rect::from_min_size(egui::pos2(3.0, 4.0), egui::vec2(30.0, 40.0));
        assert_eq!(WindowRect::from(rect), WindowRect::new(3.0, 4.0, 30.0, 40.0));
    }
}
