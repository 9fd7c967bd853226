//! Cache Module
//!
//! TTL cache over a shared storage medium, with a tag index for bulk
//! invalidation, pattern deletion and namespace statistics.

mod clock;
mod entry;
mod pattern;
mod stats;
mod store;
mod tags;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::{duration_ms, CacheEntry};
pub use pattern::KeyPattern;
pub use stats::CacheStats;
pub use store::CacheService;
pub use tags::{tag_key, TAG_KEY_PREFIX};
