//! Storage Medium Module
//!
//! Synchronous string key/value media the cache persists its entries into.
//! A medium is shared process-wide: anything holding a handle may read,
//! write or evict keys between two cache calls.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::collections::HashMap;

use crate::error::{StorageError, StorageResult};

// == Storage Trait ==
/// A synchronous key/value medium with string keys and string values.
///
/// Implementations are internally synchronized so a single medium can be
/// shared behind an `Arc` by several cache instances and foreign writers.
pub trait Storage: Send + Sync {
    /// Returns the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Fails with `StorageError::QuotaExceeded` when the medium is full.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove_item(&self, key: &str);

    /// Snapshot of every key currently held by the medium.
    fn keys(&self) -> Vec<String>;

    /// Number of keys currently held by the medium.
    fn len(&self) -> usize {
        self.keys().len()
    }

    /// Returns true if the medium holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bytes a key/value pair occupies against a medium quota.
pub(crate) fn item_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Rejects writing `key = value` into `items` if it would push the medium past
/// `quota`. The bytes of a value being replaced are not counted.
pub(crate) fn check_quota(
    items: &HashMap<String, String>,
    quota: Option<usize>,
    key: &str,
    value: &str,
) -> StorageResult<()> {
    let Some(quota) = quota else {
        return Ok(());
    };

    let used: usize = items.iter().map(|(k, v)| item_size(k, v)).sum();
    let replaced = items.get(key).map(|old| item_size(key, old)).unwrap_or(0);
    let needed = used - replaced + item_size(key, value);
    if needed > quota {
        return Err(StorageError::QuotaExceeded { needed, quota });
    }
    Ok(())
}
