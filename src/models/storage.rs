use crate::error::StoreError;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which the recipe list is persisted.
pub const RECIPES_KEY: &str = "recipes";

/// Durable string slots addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Storage Manager for disk operations
///
/// Each key maps to `<data_dir>/<key>.json`. Writes go to a sibling temp file
/// first and are renamed into place.
#[derive(Debug)]
pub struct StorageManager {
    data_dir: PathBuf,
}

impl StorageManager {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    /// Backup a stored key to a timestamped file under `backups/`
    pub fn backup(&self, key: &str) -> Result<PathBuf> {
        let source = self.key_path(key);
        if !source.exists() {
            anyhow::bail!("Nothing stored under `{key}` yet");
        }

        let backup_dir = self.data_dir.join("backups");
        fs::create_dir_all(&backup_dir).context("Failed to create backup directory")?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let backup_file = backup_dir.join(format!("{key}_{timestamp}.json"));

        fs::copy(&source, &backup_file).context("Failed to copy data file")?;

        Ok(backup_file)
    }
}

impl KeyValueStore for StorageManager {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Opens disk storage under `data_dir`. When the directory cannot be
/// created the session runs on [`MemoryStorage`] and the error is handed back
/// so the caller can tell the user nothing will be saved.
pub fn open_storage(data_dir: &Path) -> (Box<dyn KeyValueStore>, Option<StoreError>) {
    match StorageManager::new(data_dir) {
        Ok(storage) => (Box::new(storage), None),
        Err(error) => (Box::new(MemoryStorage::new()), Some(error)),
    }
}

/// In-process storage, used by tests and as the fallback when the data
/// directory cannot be created.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    rejected_writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    /// Every `set` fails, as a full disk or quota would.
    pub fn rejecting_writes() -> Self {
        Self::rejecting_next_writes(usize::MAX)
    }

    /// The next `count` writes fail, later ones succeed.
    pub fn rejecting_next_writes(count: usize) -> Self {
        Self {
            rejected_writes: count,
            ..Self::default()
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.rejected_writes > 0 {
            self.rejected_writes -= 1;
            return Err(StoreError::WriteRejected(format!("quota exceeded for `{key}`")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
