//! Audio settings and their persistence collaborator.
//!
//! The engine reads the snapshot once at construction and writes it back
//! after every mutating call. Persistence is synchronous and best-effort:
//! a failing store is logged by the engine and the in-memory state stays
//! authoritative for the session.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use chime_core::math::clamp01;

/// The four persisted audio preferences.
///
/// Serialized as camelCase JSON; missing keys fall back to the defaults
/// below, so a partial or empty document loads cleanly.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub music_enabled: bool,
    pub effects_enabled: bool,
    pub music_volume: f32,
    pub effects_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            effects_enabled: true,
            music_volume: 0.3,
            effects_volume: 0.5,
        }
    }
}

impl Settings {
    /// Force volumes into [0,1]. Applied after every load so a hand-edited
    /// or stale store cannot smuggle out-of-range gain into the mix.
    pub fn clamped(mut self) -> Self {
        self.music_volume = clamp01(self.music_volume);
        self.effects_volume = clamp01(self.effects_volume);
        self
    }
}

/// Errors a settings store can produce. The engine never propagates these;
/// they surface as warnings only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings encode/decode: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Where the settings snapshot lives.
pub trait SettingsStore {
    /// Load the snapshot. A store with nothing saved yet returns defaults.
    fn load(&self) -> Result<Settings, StoreError>;
    /// Persist the full snapshot.
    fn save(&self, settings: &Settings) -> Result<(), StoreError>;
}

/// JSON file store. A missing file is not an error: it loads as defaults,
/// exactly like a first run.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Settings, StoreError> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// In-memory store for tests and hosts without a filesystem. Stores the
/// serialized document, so it round-trips the same way the file store does.
#[derive(Debug, Default)]
pub struct MemStore {
    doc: RefCell<Option<String>>,
    failing: std::cell::Cell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the stored document (e.g. a partial JSON snapshot).
    pub fn with_doc(doc: impl Into<String>) -> Self {
        Self { doc: RefCell::new(Some(doc.into())), failing: std::cell::Cell::new(false) }
    }

    /// Make every subsequent load/save fail, to exercise the degraded path.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn doc(&self) -> Option<String> {
        self.doc.borrow().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.get() {
            Err(StoreError::Io(std::io::Error::other("store unavailable")))
        } else {
            Ok(())
        }
    }
}

impl SettingsStore for MemStore {
    fn load(&self) -> Result<Settings, StoreError> {
        self.check()?;
        match self.doc.borrow().as_deref() {
            Some(text) => Ok(serde_json::from_str(text)?),
            None => Ok(Settings::default()),
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        self.check()?;
        *self.doc.borrow_mut() = Some(serde_json::to_string(settings)?);
        Ok(())
    }
}
