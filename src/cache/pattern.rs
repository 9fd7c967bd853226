//! Pattern Invalidation Module
//!
//! Bulk deletion of every logical key matching a pattern. The scan is linear
//! over the namespace, which is fine at client scale.

use regex::Regex;
use tracing::debug;

use crate::cache::CacheService;

// == Key Pattern ==
/// Matcher applied to logical (unprefixed) cache keys.
#[derive(Debug, Clone)]
pub enum KeyPattern {
    /// Key contains the substring
    Contains(String),
    /// Key starts with the string
    Prefix(String),
    /// Key matches the regular expression
    Regex(Regex),
}

impl KeyPattern {
    /// Compiles a regular expression pattern.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(KeyPattern::Regex)
    }

    /// Returns true if `key` matches.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyPattern::Contains(needle) => key.contains(needle.as_str()),
            KeyPattern::Prefix(prefix) => key.starts_with(prefix.as_str()),
            KeyPattern::Regex(re) => re.is_match(key),
        }
    }
}

impl From<&str> for KeyPattern {
    fn from(s: &str) -> Self {
        KeyPattern::Contains(s.to_string())
    }
}

impl From<String> for KeyPattern {
    fn from(s: String) -> Self {
        KeyPattern::Contains(s)
    }
}

impl From<Regex> for KeyPattern {
    fn from(re: Regex) -> Self {
        KeyPattern::Regex(re)
    }
}

impl CacheService {
    // == Delete Pattern ==
    /// Deletes every key in the namespace matching `pattern`.
    ///
    /// Tag index entries (`tag_<name>`) are ordinary keys here: they go only
    /// when they match. Returns the number of keys deleted.
    pub fn delete_pattern(&self, pattern: impl Into<KeyPattern>) -> usize {
        let pattern = pattern.into();

        let deleted = self
            .keys()
            .into_iter()
            .filter(|key| pattern.matches(key))
            .filter(|key| self.delete(key))
            .count();

        debug!("Pattern {:?} deleted {} keys", pattern, deleted);
        deleted
    }
}
