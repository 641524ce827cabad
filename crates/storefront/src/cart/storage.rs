//! Cart storage backends.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use truper_catalog_core::{Cart, CartStorage, StorageError};

/// Stores the cart as `<dir>/<key>.json`.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a crash mid-write leaves the previous cart intact.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    key: String,
    path: PathBuf,
}

impl FileCartStorage {
    #[must_use]
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            key: key.to_string(),
            path: dir.join(format!("{key}.json")),
        }
    }

    /// Path of the JSON file holding the cart.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileCartStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<Cart, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Cart::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string(cart)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps the serialized cart in memory.
///
/// Clones share the same slot, so a fresh store opened on a clone sees what
/// an earlier store saved.
#[derive(Debug, Clone)]
pub struct MemoryCartStorage {
    key: String,
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStorage {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Start with `raw` already stored under the key.
    #[must_use]
    pub fn with_contents(key: &str, raw: &str) -> Self {
        Self {
            key: key.to_string(),
            slot: Arc::new(Mutex::new(Some(raw.to_string()))),
        }
    }

    /// The raw stored value, if anything was stored.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl CartStorage for MemoryCartStorage {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<Cart, StorageError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("memory slot lock poisoned".to_string()))?;

        match slot.as_deref() {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Cart::new()),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let json = serde_json::to_string(cart)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("memory slot lock poisoned".to_string()))?;
        *slot = Some(json);
        Ok(())
    }
}
