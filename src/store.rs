//! Slot-backed persistence for the item sequence.
//!
//! The entire store is one slot: a single file holding the full item
//! array as JSON. There is no partial update primitive; every mutation
//! goes through a read-modify-write of the whole sequence.

use crate::error::{PantryError, Result};
use crate::types::Item;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Name of the slot file inside the store directory.
const SLOT_FILE: &str = "items.json";

/// Name of the lock file guarding exclusive access.
const LOCK_FILE: &str = "LOCK";

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Base path for the store directory.
    pub path: PathBuf,

    /// Whether to create the store if it doesn't exist.
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./pantry"),
            create_if_missing: true,
        }
    }
}

/// File-backed item store.
///
/// Holds an advisory lock for its lifetime; exactly one `ItemStore` may
/// own a store directory at a time (the tracker is a single-actor system,
/// so the lock is the only concurrency control needed).
pub struct ItemStore {
    config: StoreConfig,

    /// Lock file for exclusive access.
    _lock_file: File,
}

impl ItemStore {
    /// Open an existing store or create a new one.
    pub fn open_or_create(config: StoreConfig) -> Result<Self> {
        if config.path.exists() {
            Self::open(config)
        } else if config.create_if_missing {
            Self::create(config)
        } else {
            Err(PantryError::NotInitialized)
        }
    }

    /// Create a new, empty store.
    pub fn create(config: StoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.path)?;
        let lock_file = Self::acquire_lock(&config.path)?;
        Ok(Self {
            config,
            _lock_file: lock_file,
        })
    }

    /// Open an existing store.
    pub fn open(config: StoreConfig) -> Result<Self> {
        if !config.path.is_dir() {
            return Err(PantryError::NotInitialized);
        }
        let lock_file = Self::acquire_lock(&config.path)?;
        Ok(Self {
            config,
            _lock_file: lock_file,
        })
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path.join(LOCK_FILE))?;
        file.try_lock_exclusive().map_err(|_| PantryError::Locked)?;
        Ok(file)
    }

    fn slot_path(&self) -> PathBuf {
        self.config.path.join(SLOT_FILE)
    }

    /// Load the full item sequence.
    ///
    /// A missing slot means the store has never been written. Unparsable
    /// slot contents are treated the same way rather than failing the
    /// caller; the next save replaces them.
    pub fn load(&self) -> Result<Vec<Item>> {
        let text = match fs::read_to_string(self.slot_path()) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&text) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "slot contents are not valid JSON, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the slot with the given sequence.
    ///
    /// Writes to a sibling temp file and renames it over the slot, so no
    /// partial write is ever observable.
    pub fn save_all(&self, items: &[Item]) -> Result<()> {
        let data = serde_json::to_vec(items)?;
        let tmp = self.config.path.join(format!("{SLOT_FILE}.tmp"));
        fs::write(&tmp, &data)?;
        fs::rename(&tmp, self.slot_path())?;
        Ok(())
    }
}
