//! Cache Entry Module
//!
//! Defines the stored record for individual cache entries with TTL support.
//! The serialized form has exactly three fields: `data`, `timestamp` and
//! `ttl`, the last two in integer milliseconds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A single cached value together with when it was written and how long it lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Write time (Unix milliseconds)
    pub timestamp: u64,
    /// Time to live in milliseconds
    pub ttl: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry written at `now_ms` that lives for `ttl`.
    pub fn new(data: T, now_ms: u64, ttl: Duration) -> Self {
        Self {
            data,
            timestamp: now_ms,
            ttl: duration_ms(ttl),
        }
    }

    // == Is Valid ==
    /// An entry is valid while `now - timestamp <= ttl`.
    ///
    /// Boundary condition: an entry is still valid at exactly `timestamp + ttl`
    /// and expires one millisecond later. A timestamp in the future (clock
    /// skew between writers) counts as zero elapsed time.
    pub fn is_valid_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.timestamp) <= self.ttl
    }

    // == Is Expired ==
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        !self.is_valid_at(now_ms)
    }

    // == Expires At ==
    /// Last millisecond at which the entry is still valid.
    pub fn expires_at(&self) -> u64 {
        self.timestamp.saturating_add(self.ttl)
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at().saturating_sub(now_ms)
    }
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("value", 1_000, Duration::from_secs(60));

        assert_eq!(entry.data, "value");
        assert_eq!(entry.timestamp, 1_000);
        assert_eq!(entry.ttl, 60_000);
        assert!(entry.is_valid_at(1_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(1u8, 1_000, Duration::from_millis(100));

        assert!(entry.is_valid_at(1_100), "Entry is valid at exactly ttl");
        assert!(entry.is_expired_at(1_101), "Entry expires one ms after ttl");
    }

    #[test]
    fn test_future_timestamp_is_valid() {
        let entry = CacheEntry::new(1u8, 5_000, Duration::from_millis(10));
        assert!(entry.is_valid_at(1_000));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(1u8, 1_000, Duration::from_secs(10));

        assert_eq!(entry.ttl_remaining_ms(1_000), 10_000);
        assert_eq!(entry.ttl_remaining_ms(6_000), 5_000);
        assert_eq!(entry.ttl_remaining_ms(20_000), 0);
    }

    #[test]
    fn test_wire_format_has_exactly_three_fields() {
        let entry = CacheEntry::new(vec![1, 2], 42, Duration::from_millis(7));
        let json = serde_json::to_value(&entry).unwrap();

        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["timestamp"], 42);
        assert_eq!(json["ttl"], 7);
    }

    #[test]
    fn test_decodes_foreign_written_record() {
        let raw = r#"{"data":{"name":"Gala"},"timestamp":1700000000000,"ttl":300000}"#;
        let entry: CacheEntry<serde_json::Value> = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.data["name"], "Gala");
        assert_eq!(entry.expires_at(), 1_700_000_300_000);
    }
}
