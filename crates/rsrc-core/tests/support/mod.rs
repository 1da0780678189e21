#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rsrc_core::cache::{CacheStore, ResolutionCache};
use rsrc_core::config::ResolverConfig;
use rsrc_core::context::{ContextResolver, MapEnv, Resolution, SHOT_NAME_VAR, SHOW_NAME_VAR};
use rsrc_core::hooks::{DefaultHooks, ResolverHooks};

/// Environment with `SHOW_NAME=AAA` and `SHOT_NAME=084_0010`.
pub fn show_shot_env() -> Arc<MapEnv> {
    Arc::new(
        MapEnv::new()
            .with(SHOW_NAME_VAR, "AAA")
            .with(SHOT_NAME_VAR, "084_0010"),
    )
}

pub fn default_hooks(env: Arc<MapEnv>) -> DefaultHooks {
    DefaultHooks::new(ContextResolver::with_env(&ResolverConfig::default(), env))
}

/// Cache that counts reads and writes.
#[derive(Debug, Default)]
pub struct CountingCache {
    inner: ResolutionCache,
    puts: AtomicUsize,
    gets: AtomicUsize,
}

impl CountingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &ResolutionCache {
        &self.inner
    }
}

impl CacheStore for CountingCache {
    fn put(&self, key: &str, value: &str) {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }
}

/// Hooks that count every call before delegating.
pub struct CountingHooks<H> {
    inner: H,
    create_relative_path_identifier: AtomicUsize,
    initialize: AtomicUsize,
    resolve_and_cache: AtomicUsize,
}

impl<H: ResolverHooks> CountingHooks<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            create_relative_path_identifier: AtomicUsize::new(0),
            initialize: AtomicUsize::new(0),
            resolve_and_cache: AtomicUsize::new(0),
        }
    }

    pub fn identifier_calls(&self) -> usize {
        self.create_relative_path_identifier.load(Ordering::SeqCst)
    }

    pub fn initialize_calls(&self) -> usize {
        self.initialize.load(Ordering::SeqCst)
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_and_cache.load(Ordering::SeqCst)
    }
}

impl<H: ResolverHooks> ResolverHooks for CountingHooks<H> {
    fn create_relative_path_identifier(
        &self,
        cache: &dyn CacheStore,
        anchored_asset_path: &str,
        asset_path: &str,
        anchor_asset_path: &str,
    ) -> String {
        self.create_relative_path_identifier
            .fetch_add(1, Ordering::SeqCst);
        self.inner.create_relative_path_identifier(
            cache,
            anchored_asset_path,
            asset_path,
            anchor_asset_path,
        )
    }

    fn initialize(&self, cache: &dyn CacheStore) {
        self.initialize.fetch_add(1, Ordering::SeqCst);
        self.inner.initialize(cache);
    }

    fn resolve_and_cache(&self, cache: &dyn CacheStore, asset_path: &str) -> Resolution {
        self.resolve_and_cache.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_and_cache(cache, asset_path)
    }
}
