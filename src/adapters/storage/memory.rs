//! Memory Storage - In-Process `KeyValueStorage` for Tests
//!
//! HashMap behind a mutex. Same contract as `FileStorage`, nothing
//! survives the process.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use crate::ports::storage::KeyValueStorage;

/// Volatile key-value storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries (test helper).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("storage mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .remove(key);
        Ok(())
    }
}
