//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the store contract and the key scheme the
//! cache-aside policy relies on.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::{CacheClient, EntityCache, KeyValueStore, MemoryStore};
use crate::domain::EntityKind;

const TEST_TTL: u64 = 300;

// == Strategies ==
/// Generates store keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:=]{1,64}".prop_map(|s| s)
}

/// Generates store values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}".prop_map(|s| s)
}

fn kind_strategy() -> impl Strategy<Value = EntityKind> {
    prop_oneof![
        Just(EntityKind::Clubs),
        Just(EntityKind::Players),
        Just(EntityKind::Competitions),
        Just(EntityKind::Countries),
        Just(EntityKind::Users),
    ]
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Runtime::new().unwrap().block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any key-value pair, storing and then reading it back before
    // expiration returns exactly the stored value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        block_on(async {
            let store = MemoryStore::new();

            store.set(&key, value.clone(), TEST_TTL).await.unwrap();
            let retrieved = store.get(&key).await.unwrap();

            prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
            Ok(())
        })?;
    }

    // For any stored key, deleting it makes a subsequent read a miss.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        block_on(async {
            let store = MemoryStore::new();

            store.set(&key, value, TEST_TTL).await.unwrap();
            prop_assert!(store.get(&key).await.unwrap().is_some());

            let removed = store.del(&[key.clone()]).await.unwrap();
            prop_assert_eq!(removed, 1);

            prop_assert!(store.get(&key).await.unwrap().is_none());
            Ok(())
        })?;
    }

    // For any key, storing V1 and then V2 leaves exactly one entry
    // holding V2.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        block_on(async {
            let store = MemoryStore::new();

            store.set(&key, value1, TEST_TTL).await.unwrap();
            store.set(&key, value2.clone(), TEST_TTL).await.unwrap();

            prop_assert_eq!(store.get(&key).await.unwrap(), Some(value2));
            prop_assert_eq!(store.len().await, 1);
            Ok(())
        })?;
    }

    // For any set of stored keys, a prefix scan returns exactly the keys
    // starting with that prefix.
    #[test]
    fn prop_prefix_scan_exactness(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 1..30),
        prefix in "[a-z]{1,4}"
    ) {
        block_on(async {
            let store = MemoryStore::new();

            for (key, value) in &entries {
                store.set(key, value.clone(), TEST_TTL).await.unwrap();
            }

            let mut scanned = store.keys(&prefix).await.unwrap();
            scanned.sort();

            let mut expected: Vec<String> = entries
                .keys()
                .filter(|key| key.starts_with(&prefix))
                .cloned()
                .collect();
            expected.sort();

            prop_assert_eq!(scanned, expected, "Prefix scan mismatch");
            Ok(())
        })?;
    }

    // For any mix of single-entity and page views across collections,
    // invalidating one collection removes all of its views and none of
    // the others'.
    #[test]
    fn prop_invalidation_completeness(
        ids in prop::collection::vec(1i64..1000, 1..10),
        pages in prop::collection::vec((1u64..50, 1u64..100), 1..10),
        target in kind_strategy(),
        other in kind_strategy()
    ) {
        prop_assume!(target != other);

        block_on(async {
            let store = Arc::new(MemoryStore::new());
            let client = CacheClient::new(store.clone(), TEST_TTL);
            let cache = EntityCache::new(client.clone());

            for kind in [target, other] {
                for id in &ids {
                    client.set(&EntityCache::entity_key(kind, *id), &"view").await.unwrap();
                }
                for (page, limit) in &pages {
                    client.set(&EntityCache::page_key(kind, *page, *limit), &"page").await.unwrap();
                }
            }
            let other_views = store.keys(other.key_prefix()).await.unwrap().len();

            cache.invalidate(target).await;

            prop_assert!(
                store.keys(target.key_prefix()).await.unwrap().is_empty(),
                "Invalidated collection still has cached views"
            );
            prop_assert_eq!(
                store.keys(other.key_prefix()).await.unwrap().len(),
                other_views,
                "Invalidation leaked into another collection"
            );
            Ok(())
        })?;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Distinct views never share a key: two entity ids, two page
    // parameter pairs, or an entity view and a page view always map to
    // different keys within a collection.
    #[test]
    fn prop_key_scheme_injective(
        kind in kind_strategy(),
        id1 in 1i64..10_000,
        id2 in 1i64..10_000,
        page1 in (1u64..100, 1u64..100),
        page2 in (1u64..100, 1u64..100)
    ) {
        if id1 != id2 {
            prop_assert_ne!(
                EntityCache::entity_key(kind, id1),
                EntityCache::entity_key(kind, id2)
            );
        }
        if page1 != page2 {
            prop_assert_ne!(
                EntityCache::page_key(kind, page1.0, page1.1),
                EntityCache::page_key(kind, page2.0, page2.1)
            );
        }
        prop_assert_ne!(
            EntityCache::entity_key(kind, id1),
            EntityCache::page_key(kind, page1.0, page1.1)
        );
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // For any entry, once its TTL has elapsed a read is a miss.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in value_strategy()) {
        block_on(async {
            let store = MemoryStore::new();

            store.set(&key, value.clone(), 1).await.unwrap();
            prop_assert_eq!(store.get(&key).await.unwrap(), Some(value));

            tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

            prop_assert!(store.get(&key).await.unwrap().is_none());
            Ok(())
        })?;
    }
}
