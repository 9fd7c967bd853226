//! Cache Statistics Module
//!
//! Introspection over the namespace, computed by scanning every entry at call
//! time. Nothing is counted incrementally, so the figures also reflect writes
//! made by other holders of the medium.

use serde::de::IgnoredAny;
use serde::Serialize;

use crate::cache::{CacheEntry, CacheService};
use crate::storage::item_size;

// == Cache Stats ==
/// Snapshot of the cache namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of keys in the namespace, expired ones included
    pub total_keys: usize,
    /// Number of keys that are expired or undecodable
    pub expired_keys: usize,
    /// Bytes used by physical keys and raw values
    pub total_size: usize,
    /// `total_size` in kilobytes, rounded to two decimals
    pub total_size_kb: f64,
}

impl CacheStats {
    // == Valid Keys ==
    /// Keys that a read would currently return.
    pub fn valid_keys(&self) -> usize {
        self.total_keys - self.expired_keys
    }
}

impl CacheService {
    // == Stats ==
    /// Scans the namespace and returns current statistics. Does not purge.
    pub fn stats(&self) -> CacheStats {
        let now = self.now_ms();
        let mut stats = CacheStats::default();

        for physical in self.storage.keys() {
            if !physical.starts_with(&self.prefix) {
                continue;
            }
            let Some(raw) = self.storage.get_item(&physical) else {
                continue;
            };

            stats.total_keys += 1;
            stats.total_size += item_size(&physical, &raw);

            let expired = serde_json::from_str::<CacheEntry<IgnoredAny>>(&raw)
                .map(|entry| entry.is_expired_at(now))
                .unwrap_or(true);
            if expired {
                stats.expired_keys += 1;
            }
        }

        stats.total_size_kb = (stats.total_size as f64 / 1024.0 * 100.0).round() / 100.0;
        stats
    }
}
