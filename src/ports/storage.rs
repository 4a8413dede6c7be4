//! Storage Port - Local Key-Value Persistence Interface
//!
//! Models the browser localStorage contract the portal was built
//! against: opaque string keys mapping to whole string values, with no
//! partial reads or writes. Every store operation is a synchronous
//! read-modify-write of one entry; there are no suspension points, no
//! transactions, and no cross-process coordination (last-writer-wins
//! is an accepted limitation of this model).

use anyhow::Result;

/// Trait for local key-value persistence providers.
///
/// Values are raw strings: most entries hold JSON-encoded collections,
/// but the legacy token key stores a bare string, so the port stays
/// encoding-agnostic.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the entry under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}
