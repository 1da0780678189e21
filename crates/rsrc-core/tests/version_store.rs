mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rsrc_core::cache::CacheStore;
use rsrc_core::context::ResolverContext;
use rsrc_core::store::{
    MemoryCollection, ShotCollection, ShotDocument, StoreError, VersionQuery, VersionStore,
};

use support::{default_hooks, show_shot_env};

fn wall_collection() -> MemoryCollection {
    MemoryCollection::from_json(
        r#"[
            {
                "shot_name": "AAA_084_0010",
                "cache_usd_geo": {"v001": "/path/v001/geo.usda", "v002": "/path/geo.usda"},
                "cache_usd_anim": {"v001": "/path/anim.usda"}
            }
        ]"#,
    )
    .unwrap()
}

/// Counts round-trips to the wrapped collection.
struct CountingCollection {
    inner: MemoryCollection,
    calls: AtomicUsize,
}

impl ShotCollection for CountingCollection {
    async fn find_shot(&self, shot_name: &str) -> Result<Option<ShotDocument>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_shot(shot_name).await
    }
}

#[tokio::test]
async fn resolves_stored_version_path() {
    let store = VersionStore::new(wall_collection());

    assert_eq!(
        store.get_path("AAA_084_0010/cache_usd_geo/v002").await,
        Ok("/path/geo.usda".to_string())
    );
    assert_eq!(
        store.get_path("AAA_084_0010/cache_usd_anim/v001").await,
        Ok("/path/anim.usda".to_string())
    );
}

#[tokio::test]
async fn each_missing_level_has_its_own_error() {
    let store = VersionStore::new(wall_collection());

    assert_eq!(
        store.get_path("BBB_001_0010/cache_usd_geo/v002").await,
        Err(StoreError::ShotNotFound {
            shot: "BBB_001_0010".to_string()
        })
    );
    assert_eq!(
        store.get_path("AAA_084_0010/missing_type/v002").await,
        Err(StoreError::CacheTypeNotFound {
            cache_type: "missing_type".to_string(),
            shot: "AAA_084_0010".to_string()
        })
    );
    assert_eq!(
        store.get_path("AAA_084_0010/cache_usd_geo/v999").await,
        Err(StoreError::VersionNotFound {
            version: "v999".to_string(),
            cache_type: "cache_usd_geo".to_string(),
            shot: "AAA_084_0010".to_string()
        })
    );
}

#[tokio::test]
async fn malformed_queries_are_rejected() {
    let store = VersionStore::new(wall_collection());

    for query in ["AAA_084_0010", "AAA_084_0010/cache_usd_geo", "a/b/c/d", "a//c"] {
        assert!(
            matches!(
                store.get_path(query).await,
                Err(StoreError::MalformedQuery { .. })
            ),
            "{}",
            query
        );
    }
}

#[tokio::test]
async fn lookup_accepts_parsed_queries() {
    let store = VersionStore::new(wall_collection());
    let query = VersionQuery::new("AAA_084_0010", "cache_usd_geo", "v001");

    assert_eq!(store.lookup(&query).await.unwrap(), "/path/v001/geo.usda");
}

#[tokio::test]
async fn context_caches_versioned_results() {
    let store = VersionStore::new(CountingCollection {
        inner: wall_collection(),
        calls: AtomicUsize::new(0),
    });
    let context = ResolverContext::new(Arc::new(default_hooks(show_shot_env())));

    let first = context
        .resolve_versioned(&store, "AAA_084_0010/cache_usd_geo/v002")
        .await
        .unwrap();
    let second = context
        .resolve_versioned(&store, "AAA_084_0010/cache_usd_geo/v002")
        .await
        .unwrap();

    assert_eq!(first, "/path/geo.usda");
    assert_eq!(second, first);
    assert_eq!(store.collection().calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        context.versions().get("AAA_084_0010/cache_usd_geo/v002").as_deref(),
        Some("/path/geo.usda")
    );
    assert!(!context.cache().contains("AAA_084_0010/cache_usd_geo/v002"));
}

#[tokio::test]
async fn failed_versioned_lookups_are_not_cached() {
    let store = VersionStore::new(wall_collection());
    let context = ResolverContext::new(Arc::new(default_hooks(show_shot_env())));

    let result = context
        .resolve_versioned(&store, "AAA_084_0010/missing_type/v002")
        .await;

    assert!(matches!(result, Err(StoreError::CacheTypeNotFound { .. })));
    assert!(!context.versions().contains("AAA_084_0010/missing_type/v002"));
}
