//! File Storage - Atomic File-Per-Key Persistence
//!
//! Durable `KeyValueStorage` backend: each key maps to one file in the
//! data directory, written atomically (write to tmp file, then rename).
//! This guarantees a reader always sees either the old or the new
//! value, never a partial write.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use tracing::{debug, info};

use crate::ports::storage::KeyValueStorage;

/// Atomic file-per-key storage rooted in a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `data_dir`, creating the directory
    /// if it doesn't exist.
    pub fn new(data_dir: &str) -> Result<Self> {
        let dir = Path::new(data_dir).to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create data directory")?;
        info!(dir = %dir.display(), "File storage ready");
        Ok(Self { dir })
    }

    /// Resolve the file path for a key, rejecting anything that could
    /// escape the data directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        ensure!(!key.is_empty(), "storage key must not be empty");
        ensure!(
            key.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "storage key contains invalid characters: {key}"
        );
        Ok(self.dir.join(key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read storage key {key}"))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{key}.tmp"));

        fs::write(&tmp, value)
            .with_context(|| format!("Failed to write tmp file for key {key}"))?;

        // Atomic rename
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to rename tmp file for key {key}"))?;

        debug!(key, bytes = value.len(), "Storage entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove storage key {key}"))
            }
        }
    }
}
