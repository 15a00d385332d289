//! Durable player preferences
//!
//! Only [`PlayerPreferences`] crosses this boundary. The store reads it once
//! on construction and writes it whenever one of its four fields changes.

use crate::error::Result;
use crate::types::PlayerPreferences;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Key the preferences are stored under
pub const DEFAULT_NAMESPACE: &str = "music-player-storage";

/// Durable key-value storage for player preferences
pub trait PreferenceStore: Send {
    /// Read stored preferences, `None` if nothing was saved yet
    fn load(&self) -> Result<Option<PlayerPreferences>>;

    /// Persist preferences
    fn save(&mut self, preferences: &PlayerPreferences) -> Result<()>;
}

/// Preferences kept in a JSON file under a namespace key
///
/// ```json
/// {
///   "music-player-storage": {
///     "volume": 0.8,
///     "muted": false,
///     "repeatMode": "off",
///     "shuffleEnabled": false
///   }
/// }
/// ```
///
/// Other top-level keys in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    namespace: String,
}

impl JsonPreferenceStore {
    /// Store under [`DEFAULT_NAMESPACE`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_namespace(path, DEFAULT_NAMESPACE)
    }

    /// Store under a custom namespace key
    pub fn with_namespace(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: namespace.into(),
        }
    }

    /// File backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Option<Map<String, Value>>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Sibling file the next save is written to before the rename
    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn load(&self) -> Result<Option<PlayerPreferences>> {
        let Some(mut document) = self.read_document()? else {
            debug!(path = %self.path.display(), "No preference file yet");
            return Ok(None);
        };

        match document.remove(&self.namespace) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, preferences: &PlayerPreferences) -> Result<()> {
        // A corrupt file is replaced rather than blocking every save
        let mut document = self.read_document().ok().flatten().unwrap_or_default();
        document.insert(self.namespace.clone(), serde_json::to_value(preferences)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        std::fs::write(&tmp, serde_json::to_string_pretty(&document)?)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "Saved player preferences");
        Ok(())
    }
}

/// In-memory preference store
///
/// Clones share the same slot, so a caller can keep a handle and observe
/// what the player saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    slot: Arc<Mutex<Option<PlayerPreferences>>>,
}

impl MemoryPreferenceStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `preferences`
    pub fn with_preferences(preferences: PlayerPreferences) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(preferences))),
        }
    }

    /// Last saved preferences
    pub fn current(&self) -> Option<PlayerPreferences> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<PlayerPreferences>> {
        Ok(self.current())
    }

    fn save(&mut self, preferences: &PlayerPreferences) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(*preferences);
        Ok(())
    }
}
