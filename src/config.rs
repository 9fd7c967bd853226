//! Configuration Module
//!
//! Construction parameters for the cache and the inspection server, loaded
//! from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::StorageResult;
use crate::storage::{FileStorage, MemoryStorage, Storage};

/// Prefix owned by the cache inside a shared storage medium.
pub const DEFAULT_PREFIX: &str = "booking_cache_";

/// Default entry lifetime: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

// == Storage Kind ==
/// Lifetime of the medium entries are written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Survives restarts (file backed)
    Durable,
    /// Cleared when the session (process) ends
    Session,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "durable" | "local" => Ok(StorageKind::Durable),
            "session" | "memory" => Ok(StorageKind::Session),
            other => Err(format!("unknown storage kind '{}'", other)),
        }
    }
}

// == Tag TTL Policy ==
/// How long a tag index entry lives after a tagged write updates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTtlPolicy {
    /// Same TTL as the entry written in that call. A short-lived write can
    /// shorten the set and drop longer-lived members from the index.
    InheritEntry,
    /// Lives until the latest expiry of any member recorded into it.
    ExtendToLongest,
    /// Every tag index write uses this TTL.
    Fixed(Duration),
}

impl Default for TagTtlPolicy {
    fn default() -> Self {
        TagTtlPolicy::ExtendToLongest
    }
}

impl FromStr for TagTtlPolicy {
    type Err = String;

    /// Accepts `inherit`, `longest` or a fixed TTL in milliseconds. A zero
    /// TTL is rejected: the index would expire before it could be used.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inherit" => Ok(TagTtlPolicy::InheritEntry),
            "longest" => Ok(TagTtlPolicy::ExtendToLongest),
            other => match other.parse::<u64>() {
                Ok(0) => Err("tag ttl must be greater than 0".to_string()),
                Ok(ms) => Ok(TagTtlPolicy::Fixed(Duration::from_millis(ms))),
                Err(_) => Err(format!("unknown tag ttl policy '{}'", other)),
            },
        }
    }
}

// == Cache Config ==
/// Construction parameters for a `CacheService`.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied when a write gives none
    pub default_ttl: Duration,
    /// Prefix prepended to every physical key
    pub prefix: String,
    /// Medium lifetime
    pub storage: StorageKind,
    /// File used by durable storage
    pub storage_path: PathBuf,
    /// Optional byte quota for the medium
    pub quota_bytes: Option<usize>,
    /// TTL policy for tag index entries
    pub tag_ttl_policy: TagTtlPolicy,
}

impl CacheConfig {
    /// Loads cache parameters from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_PREFIX` - Key prefix (default: `booking_cache_`)
    /// - `CACHE_STORAGE` - `durable` or `session` (default: session)
    /// - `CACHE_STORAGE_PATH` - File for durable storage (default: `booking_cache.json`)
    /// - `CACHE_QUOTA_BYTES` - Medium quota in bytes (default: none)
    /// - `CACHE_TAG_TTL` - `inherit`, `longest` or milliseconds (default: longest)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_parse::<u64>("CACHE_DEFAULT_TTL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.default_ttl),
            prefix: env::var("CACHE_PREFIX")
                .ok()
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.prefix),
            storage: env_parse("CACHE_STORAGE").unwrap_or(defaults.storage),
            storage_path: env::var("CACHE_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            quota_bytes: env_parse("CACHE_QUOTA_BYTES"),
            tag_ttl_policy: env_parse("CACHE_TAG_TTL").unwrap_or(defaults.tag_ttl_policy),
        }
    }

    /// Sets the key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the default TTL.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Sets the tag index TTL policy.
    pub fn with_tag_ttl_policy(mut self, policy: TagTtlPolicy) -> Self {
        self.tag_ttl_policy = policy;
        self
    }

    /// Opens the storage medium described by this configuration.
    pub fn open_storage(&self) -> StorageResult<Arc<dyn Storage>> {
        let storage: Arc<dyn Storage> = match self.storage {
            StorageKind::Durable => {
                Arc::new(FileStorage::open(&self.storage_path, self.quota_bytes)?)
            }
            StorageKind::Session => match self.quota_bytes {
                Some(quota) => Arc::new(MemoryStorage::with_quota(quota)),
                None => Arc::new(MemoryStorage::new()),
            },
        };
        Ok(storage)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            prefix: DEFAULT_PREFIX.to_string(),
            storage: StorageKind::Session,
            storage_path: PathBuf::from("booking_cache.json"),
            quota_bytes: None,
            tag_ttl_policy: TagTtlPolicy::default(),
        }
    }
}

// == Server Config ==
/// Inspection server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache construction parameters
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Periodic sweep interval in seconds, `None` disables the sweep
    pub cleanup_interval: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: disabled, 0 disables)
    /// - plus every variable read by [`CacheConfig::from_env`]
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig::from_env(),
            server_port: env_parse("SERVER_PORT").unwrap_or(3000),
            cleanup_interval: env_parse::<u64>("CLEANUP_INTERVAL").filter(|secs| *secs > 0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            cleanup_interval: None,
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache.default_ttl, Duration::from_secs(300));
        assert_eq!(config.cache.prefix, DEFAULT_PREFIX);
        assert_eq!(config.cache.storage, StorageKind::Session);
        assert_eq!(config.cache.tag_ttl_policy, TagTtlPolicy::ExtendToLongest);
        assert_eq!(config.server_port, 3000);
        assert!(config.cleanup_interval.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        for name in [
            "CACHE_DEFAULT_TTL_MS",
            "CACHE_PREFIX",
            "CACHE_STORAGE",
            "CACHE_STORAGE_PATH",
            "CACHE_QUOTA_BYTES",
            "CACHE_TAG_TTL",
            "SERVER_PORT",
            "CLEANUP_INTERVAL",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.cache.default_ttl, DEFAULT_TTL);
        assert_eq!(config.cache.prefix, DEFAULT_PREFIX);
        assert!(config.cache.quota_bytes.is_none());
        assert_eq!(config.server_port, 3000);
        assert!(config.cleanup_interval.is_none());
    }

    #[test]
    fn test_storage_kind_parse() {
        assert_eq!("durable".parse::<StorageKind>(), Ok(StorageKind::Durable));
        assert_eq!("Session".parse::<StorageKind>(), Ok(StorageKind::Session));
        assert!("cloud".parse::<StorageKind>().is_err());
    }

    #[test]
    fn test_tag_ttl_policy_parse() {
        assert_eq!("inherit".parse::<TagTtlPolicy>(), Ok(TagTtlPolicy::InheritEntry));
        assert_eq!("longest".parse::<TagTtlPolicy>(), Ok(TagTtlPolicy::ExtendToLongest));
        assert_eq!(
            "60000".parse::<TagTtlPolicy>(),
            Ok(TagTtlPolicy::Fixed(Duration::from_secs(60)))
        );
        assert!("forever".parse::<TagTtlPolicy>().is_err());
        assert!("0".parse::<TagTtlPolicy>().is_err());
    }

    #[test]
    fn test_open_session_storage_with_quota() {
        let config = CacheConfig {
            quota_bytes: Some(8),
            ..CacheConfig::default()
        };
        let storage = config.open_storage().unwrap();
        assert!(storage.set_item("key", "too long").is_err());
    }
}
