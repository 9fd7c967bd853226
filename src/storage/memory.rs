//! In-memory storage medium, cleared when the process ends.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{check_quota, item_size, Storage};
use crate::error::StorageResult;

// == Memory Storage ==
/// Session-scoped medium backed by a `HashMap`, with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    /// Creates an unbounded medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a medium that rejects writes once keys and values together
    /// would exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes of keys and values currently stored.
    pub fn used_bytes(&self) -> usize {
        self.items
            .read()
            .iter()
            .map(|(k, v)| item_size(k, v))
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.items.write();

        check_quota(&items, self.quota_bytes, key, value)?;

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.write().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.items.read().keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.items.read().len()
    }
}
