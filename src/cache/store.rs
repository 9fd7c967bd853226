//! Cache Store Module
//!
//! Main cache engine: typed entries with per-entry TTL written into a shared
//! storage medium under a namespace prefix. Reads never fail: a corrupt or
//! expired entry is deleted and reported as absent.

use std::sync::Arc;
use std::time::Duration;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, Clock, SystemClock};
use crate::config::{CacheConfig, TagTtlPolicy};
use crate::error::StorageResult;
use crate::storage::Storage;

// == Cache Service ==
/// TTL cache over a storage medium.
///
/// Construct one per application and share it by reference (or `Arc`) with
/// every consumer. Validity is never remembered in memory: every read
/// re-checks the stored timestamp and TTL, since other holders of the medium
/// may change it between calls.
pub struct CacheService {
    /// Shared key/value medium
    pub(super) storage: Arc<dyn Storage>,
    /// Time source for timestamps and expiry checks
    pub(super) clock: Arc<dyn Clock>,
    /// Namespace prepended to every physical key
    pub(super) prefix: String,
    /// TTL for writes that give none
    pub(super) default_ttl: Duration,
    /// TTL policy for tag index entries
    pub(super) tag_ttl_policy: TagTtlPolicy,
}

impl CacheService {
    // == Constructor ==
    /// Creates a cache over `storage` using the given configuration.
    pub fn new(config: &CacheConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
            prefix: config.prefix.clone(),
            default_ttl: config.default_ttl,
            tag_ttl_policy: config.tag_ttl_policy,
        }
    }

    /// Opens the configured storage medium and builds a cache over it.
    pub fn open(config: &CacheConfig) -> StorageResult<Self> {
        Ok(Self::new(config, config.open_storage()?))
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Namespace prefix of this cache.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// TTL applied to writes that give none.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// The underlying storage medium.
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(super) fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub(super) fn physical_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key is absent, expired or cannot be decoded as
    /// `T`. Expired and undecodable entries are deleted on the way out.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_entry(key).map(|entry| entry.data)
    }

    /// Retrieves the full entry for a key, with the same lazy deletion as `get`.
    pub fn get_entry<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        let physical = self.physical_key(key);
        let raw = self.storage.get_item(&physical)?;

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Removing undecodable cache entry {}: {}", key, err);
                self.storage.remove_item(&physical);
                return None;
            }
        };

        if entry.is_expired_at(self.now_ms()) {
            debug!("Cache entry {} expired", key);
            self.storage.remove_item(&physical);
            return None;
        }

        Some(entry)
    }

    // == Set ==
    /// Stores a value with optional TTL (uses the default TTL if `None`).
    ///
    /// If the medium is full, expired entries are swept once and the write is
    /// retried once. Returns false if the value could not be stored; callers
    /// should carry on without caching.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, data: &T, ttl: Option<Duration>) -> bool {
        let entry = CacheEntry::new(data, self.now_ms(), ttl.unwrap_or(self.default_ttl));

        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Failed to serialize cache entry {}: {}", key, err);
                return false;
            }
        };

        self.write_raw(key, &raw)
    }

    fn write_raw(&self, key: &str, raw: &str) -> bool {
        let physical = self.physical_key(key);

        match self.storage.set_item(&physical, raw) {
            Ok(()) => true,
            Err(err) if err.is_quota_exceeded() => {
                let removed = self.clean_expired();
                warn!(
                    "Storage quota exceeded writing {}, swept {} expired entries and retrying",
                    key, removed
                );
                match self.storage.set_item(&physical, raw) {
                    Ok(()) => true,
                    Err(err) => {
                        warn!("Cache write for {} failed after sweep: {}", key, err);
                        false
                    }
                }
            }
            Err(err) => {
                warn!("Cache write for {} failed: {}", key, err);
                false
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns true once the key is gone, including when it was never there.
    pub fn delete(&self, key: &str) -> bool {
        self.storage.remove_item(&self.physical_key(key));
        true
    }

    // == Has ==
    /// Returns true iff `get` would currently succeed for some payload type.
    pub fn has(&self, key: &str) -> bool {
        self.get_entry::<IgnoredAny>(key).is_some()
    }

    // == Clear ==
    /// Removes every key in this cache's namespace and nothing else.
    ///
    /// Returns the number of keys removed.
    pub fn clear(&self) -> usize {
        let physical: Vec<String> = self
            .storage
            .keys()
            .into_iter()
            .filter(|k| k.starts_with(&self.prefix))
            .collect();

        for key in &physical {
            self.storage.remove_item(key);
        }

        info!("Cleared {} cache entries", physical.len());
        physical.len()
    }

    // == Keys ==
    /// Snapshot of logical keys in this namespace.
    ///
    /// May include expired entries that have not been purged yet; it is not a
    /// validity guarantee.
    pub fn keys(&self) -> Vec<String> {
        self.storage
            .keys()
            .into_iter()
            .filter_map(|k| k.strip_prefix(&self.prefix).map(str::to_string))
            .collect()
    }

    // == Clean Expired ==
    /// Removes every expired or undecodable entry in the namespace.
    ///
    /// Keys that disappear during the scan are skipped. Returns the number of
    /// entries removed.
    pub fn clean_expired(&self) -> usize {
        let now = self.now_ms();
        let mut removed = 0;

        for physical in self.storage.keys() {
            if !physical.starts_with(&self.prefix) {
                continue;
            }
            let Some(raw) = self.storage.get_item(&physical) else {
                continue;
            };

            let stale = match serde_json::from_str::<CacheEntry<IgnoredAny>>(&raw) {
                Ok(entry) => entry.is_expired_at(now),
                Err(_) => true,
            };

            if stale {
                self.storage.remove_item(&physical);
                removed += 1;
            }
        }

        if removed > 0 {
            debug!("Swept {} expired cache entries", removed);
        }
        removed
    }

    // == Length ==
    /// Returns the number of keys in the namespace, expired ones included.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("prefix", &self.prefix)
            .field("default_ttl", &self.default_ttl)
            .field("tag_ttl_policy", &self.tag_ttl_policy)
            .finish_non_exhaustive()
    }
}
