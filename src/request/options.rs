//! Per-call cache options for read requests.

use std::time::Duration;

// == Request Options ==
/// Cache behavior for a single read call-site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Serve from and store into the cache (default true)
    pub enabled: bool,
    /// TTL override for the stored response
    pub ttl: Option<Duration>,
    /// Tags to record the response under
    pub tags: Vec<String>,
    /// Explicit cache key instead of the derived one
    pub key: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: None,
            tags: Vec::new(),
            key: None,
        }
    }
}

impl RequestOptions {
    /// Cached read with default TTL and no tags.
    pub fn cached() -> Self {
        Self::default()
    }

    /// Skips the cache entirely: always fetches, never stores.
    pub fn bypass() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Adds tags, skipping ones already present.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }
}
