//! File-backed local storage
//!
//! All slots live in one `storage.json` object (`{"key": "value", ...}`) in
//! the storefront directory. Readers take a shared lock and writers an
//! exclusive lock on a sidecar `storage.json.lock`, so a second `shop`
//! process never observes a half-written file. Writes go to a temp file in
//! the same directory and are renamed into place.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::ports::LocalStorage;

pub const STORAGE_FILE: &str = "storage.json";
pub const DEMO_STORAGE_FILE: &str = "demo-storage.json";

/// Lock guard; unlocks on drop
struct StorageLock {
    file: File,
}

impl Drop for StorageLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Local storage persisted to `storage.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileStorage {
    /// Storage rooted in the given directory (created if missing)
    pub fn new(dir: &Path) -> Result<Self> {
        Self::with_file_name(dir, STORAGE_FILE)
    }

    /// Storage backed by a differently named file in `dir`, e.g. the
    /// separate demo-mode store
    pub fn with_file_name(dir: &Path, file_name: &str) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            path: dir.join(file_name),
            lock_path: dir.join(format!("{}.lock", file_name)),
        })
    }

    /// Path of the backing JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_lock_file(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|e| Error::storage(format!("Failed to open {}: {}", self.lock_path.display(), e)))
    }

    fn lock_shared(&self) -> Result<StorageLock> {
        let file = self.open_lock_file()?;
        file.lock_shared()
            .map_err(|e| Error::storage(format!("Failed to lock storage: {}", e)))?;
        Ok(StorageLock { file })
    }

    fn lock_exclusive(&self) -> Result<StorageLock> {
        let file = self.open_lock_file()?;
        file.lock_exclusive()
            .map_err(|e| Error::storage(format!("Failed to lock storage: {}", e)))?;
        Ok(StorageLock { file })
    }

    /// Read every slot. A missing file is an empty store.
    fn read_slots(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            Error::storage(format!("{} is not a valid storage file: {}", self.path.display(), e))
        })
    }

    fn write_slots(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(slots)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| Error::storage(format!("Failed to write {}: {}", self.path.display(), e)))?;
        Ok(())
    }

    /// Read-modify-write under the exclusive lock
    ///
    /// A corrupt storage file is replaced rather than blocking every write.
    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _lock = self.lock_exclusive()?;
        let mut slots = self.read_slots().unwrap_or_default();
        f(&mut slots);
        self.write_slots(&slots)
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _lock = self.lock_shared()?;
        Ok(self.read_slots()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|slots| {
            slots.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|slots| {
            slots.remove(key);
        })
    }
}
