//! Tag Index Module
//!
//! Maps a tag name to the set of cache keys written with that tag, so every
//! entry sharing a tag can be invalidated at once. The index lives in the
//! cache itself: each tag is an ordinary entry under `tag_<name>` holding a
//! deduplicated key set. There is no reverse index from key to tags.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::entry::duration_ms;
use crate::cache::CacheService;
use crate::config::TagTtlPolicy;

/// Prefix of the logical key holding a tag's member set.
pub const TAG_KEY_PREFIX: &str = "tag_";

/// Logical key of the index entry for `tag`.
pub fn tag_key(tag: &str) -> String {
    format!("{}{}", TAG_KEY_PREFIX, tag)
}

impl CacheService {
    // == Set With Tags ==
    /// Stores a value and records its key under each tag.
    ///
    /// The primary write happens first; if it fails no tag is touched and
    /// false is returned. A failed tag update is logged and does not undo the
    /// primary write.
    pub fn set_with_tags<T, S>(&self, key: &str, data: &T, tags: &[S], ttl: Option<Duration>) -> bool
    where
        T: Serialize + ?Sized,
        S: AsRef<str>,
    {
        if !self.set(key, data, ttl) {
            return false;
        }

        let entry_ttl = ttl.unwrap_or(self.default_ttl);
        for tag in tags {
            let tag = tag.as_ref();
            if !self.add_to_tag(tag, key, entry_ttl) {
                warn!("Failed to record key {} under tag {}", key, tag);
            }
        }
        true
    }

    fn add_to_tag(&self, tag: &str, key: &str, entry_ttl: Duration) -> bool {
        let index_key = tag_key(tag);
        let existing = self.get_entry::<BTreeSet<String>>(&index_key);

        let ttl = match self.tag_ttl_policy {
            TagTtlPolicy::InheritEntry => entry_ttl,
            TagTtlPolicy::Fixed(ttl) => ttl,
            TagTtlPolicy::ExtendToLongest => {
                let remaining = existing
                    .as_ref()
                    .map(|entry| entry.ttl_remaining_ms(self.now_ms()))
                    .unwrap_or(0);
                Duration::from_millis(remaining.max(duration_ms(entry_ttl)))
            }
        };

        let mut members = existing.map(|entry| entry.data).unwrap_or_default();
        members.insert(key.to_string());

        self.set(&index_key, &members, Some(ttl))
    }

    // == Tag Members ==
    /// Keys currently recorded under `tag`. Unknown tags yield an empty set.
    pub fn tag_members(&self, tag: &str) -> BTreeSet<String> {
        self.get::<BTreeSet<String>>(&tag_key(tag)).unwrap_or_default()
    }

    // == Invalidate Tag ==
    /// Deletes every key recorded under `tag`, then the tag's index entry.
    ///
    /// Returns the number of member keys processed. Members that were already
    /// gone still count. Unknown tags return 0.
    pub fn invalidate_tag(&self, tag: &str) -> usize {
        let members = self.tag_members(tag);

        let deleted = members.iter().filter(|key| self.delete(key)).count();
        self.delete(&tag_key(tag));

        debug!("Invalidated tag {}: {} keys", tag, deleted);
        deleted
    }

    // == Invalidate Tags ==
    /// Invalidates each tag in turn and returns the total keys processed.
    pub fn invalidate_tags<S: AsRef<str>>(&self, tags: &[S]) -> usize {
        tags.iter().map(|tag| self.invalidate_tag(tag.as_ref())).sum()
    }
}
