//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against arbitrary keys, values and
//! operation sequences.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheService, ManualClock};
use crate::config::CacheConfig;
use crate::storage::{MemoryStorage, Storage};

// == Test Configuration ==
const START: u64 = 1_700_000_000_000;

fn test_store() -> (CacheService, Arc<MemoryStorage>, ManualClock) {
    let storage = Arc::new(MemoryStorage::new());
    let clock = ManualClock::new(START);
    let store = CacheService::new(&CacheConfig::default(), storage.clone())
        .with_clock(Arc::new(clock.clone()));
    (store, storage, clock)
}

// == Strategies ==
/// Generates logical cache keys. Never starts with `t`, so generated keys
/// cannot collide with tag index keys.
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-su-z][a-z0-9_]{0,31}".prop_map(|s| s)
}

/// Generates cached payloads
fn valid_value_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-zA-Z ]{0,16}", any::<i64>()), 0..8)
}

fn tag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("events"), Just("bookings"), Just("hubs")].prop_map(String::from)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: i64 },
    SetTagged { key: String, value: i64, tag: String },
    Delete { key: String },
    Invalidate { tag: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), any::<i64>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        (valid_key_strategy(), any::<i64>(), tag_strategy())
            .prop_map(|(key, value, tag)| CacheOp::SetTagged { key, value, tag }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
        tag_strategy().prop_map(|tag| CacheOp::Invalidate { tag }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a value and reading it back before expiry returns the same value.
    #[test]
    fn prop_roundtrip_storage(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        ttl_ms in 1u64..10_000_000
    ) {
        let (store, _, _) = test_store();

        prop_assert!(store.set(&key, &value, Some(Duration::from_millis(ttl_ms))));
        let retrieved: Option<Vec<(String, i64)>> = store.get(&key);
        prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
    }

    // After the TTL has fully elapsed, the entry reads as absent.
    #[test]
    fn prop_entry_expires_after_ttl(
        key in valid_key_strategy(),
        ttl_ms in 1u64..1_000_000,
        extra_ms in 1u64..1_000_000
    ) {
        let (store, _, clock) = test_store();

        store.set(&key, &1u8, Some(Duration::from_millis(ttl_ms)));

        clock.advance(Duration::from_millis(ttl_ms));
        prop_assert!(store.has(&key), "Entry must be valid at exactly its TTL");

        clock.advance(Duration::from_millis(extra_ms));
        prop_assert!(!store.has(&key), "Entry must be gone after its TTL");
        prop_assert!(store.keys().is_empty(), "Expired read must purge the entry");
    }

    // Storing V1 then V2 under one key yields V2.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in valid_value_strategy(),
        value2 in valid_value_strategy()
    ) {
        let (store, _, _) = test_store();

        store.set(&key, &value1, None);
        store.set(&key, &value2, None);

        let retrieved: Option<Vec<(String, i64)>> = store.get(&key);
        prop_assert_eq!(retrieved, Some(value2), "Overwrite should return new value");
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
    }

    // clear() removes every cache key and no foreign key.
    #[test]
    fn prop_clear_respects_namespace(
        own in prop::collection::hash_set(valid_key_strategy(), 0..20),
        foreign in prop::collection::hash_set("[A-Z][A-Z0-9]{0,15}", 0..20)
    ) {
        let (store, storage, _) = test_store();

        for key in &own {
            store.set(key, &0u8, None);
        }
        for key in &foreign {
            storage.set_item(key, "foreign").unwrap();
        }

        prop_assert_eq!(store.clear(), own.len());
        prop_assert!(store.keys().is_empty());

        let remaining: HashSet<String> = storage.keys().into_iter().collect();
        prop_assert_eq!(remaining, foreign);
    }

    // Reads agree with a simple model under any mix of sets, deletes and
    // tag invalidations.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let (store, _, _) = test_store();
        let mut model: HashMap<String, i64> = HashMap::new();
        let mut tags: HashMap<String, HashSet<String>> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(&key, &value, None);
                    model.insert(key, value);
                }
                CacheOp::SetTagged { key, value, tag } => {
                    store.set_with_tags(&key, &value, &[tag.as_str()], None);
                    model.insert(key.clone(), value);
                    tags.entry(tag).or_default().insert(key);
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                    model.remove(&key);
                }
                CacheOp::Invalidate { tag } => {
                    let members = tags.remove(&tag).unwrap_or_default();
                    prop_assert_eq!(store.invalidate_tag(&tag), members.len());
                    for key in members {
                        model.remove(&key);
                    }
                }
            }
        }

        for (key, value) in &model {
            prop_assert_eq!(store.get::<i64>(key), Some(*value), "Model mismatch for {}", key);
        }
    }
}
