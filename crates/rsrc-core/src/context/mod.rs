//! Resolver contexts.
//!
//! A [`ResolverContext`] owns one [`ResolutionCache`] for its whole lifetime
//! and routes host calls through a [`ResolverHooks`] implementation. The
//! environment-driven resolution rules live in [`ContextResolver`].
//!
//! The shared cache holds two kinds of value under asset paths: resolved
//! paths and `relativePath|` identifiers. Identifier values are only served
//! back to [`ResolverContext::create_identifier`]; resolution treats them as
//! a miss. Versioned lookups keep their own cache so that query strings never
//! shadow asset paths.

mod env;
mod resolver;

pub use env::{EnvSource, MapEnv, ProcessEnv, SHOT_NAME_VAR, SHOW_NAME_VAR};
pub use resolver::{ContextResolver, Resolution, UnresolvedReason};

use std::sync::Arc;

use crate::cache::{CacheStore, ResolutionCache};
use crate::hooks::ResolverHooks;
use crate::identifier::{anchor_relative_path, is_relative_identifier, is_relative_path};
use crate::path::normalize_path;
use crate::store::{ShotCollection, StoreError, VersionStore};

/// Host-facing resolution context.
pub struct ResolverContext {
    cache: ResolutionCache,
    versions: ResolutionCache,
    hooks: Arc<dyn ResolverHooks>,
}

impl ResolverContext {
    /// Create a context and run the hooks' initialization against its cache.
    pub fn new(hooks: Arc<dyn ResolverHooks>) -> Self {
        let context = Self {
            cache: ResolutionCache::new(),
            versions: ResolutionCache::new(),
            hooks,
        };
        context.hooks.initialize(&context.cache);
        tracing::debug!(entries = context.cache.len(), "resolver context initialized");
        context
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Results of [`resolve_versioned`](Self::resolve_versioned), keyed by query.
    pub fn versions(&self) -> &ResolutionCache {
        &self.versions
    }

    /// Pre-seed a pair; later resolutions of `key` are served from the cache.
    pub fn add_caching_pair(&self, key: &str, value: &str) {
        self.cache.put(key, value);
    }

    /// Resolve `asset_path`, serving cached paths without calling the hooks.
    ///
    /// A cached identifier is not a path, so it falls through to the hooks.
    pub fn resolve(&self, asset_path: &str) -> Resolution {
        match self.cache.get(asset_path) {
            Some(cached) if !is_relative_identifier(&cached) => {
                tracing::trace!(asset_path, resolved = %cached, "cache hit");
                Resolution::Resolved(cached)
            }
            _ => self.hooks.resolve_and_cache(&self.cache, asset_path),
        }
    }

    /// Create the identifier the host should use for `asset_path` authored in
    /// the document at `anchor_asset_path`.
    ///
    /// Relative references are anchored and handed to the hooks; everything
    /// else is returned normalized. An identifier already cached under the
    /// anchored path is returned as is, since the anchored path names the file.
    pub fn create_identifier(&self, asset_path: &str, anchor_asset_path: &str) -> String {
        if asset_path.is_empty() {
            return String::new();
        }
        if anchor_asset_path.is_empty() || !is_relative_path(asset_path) {
            return normalize_path(asset_path);
        }

        let anchored = anchor_relative_path(anchor_asset_path, asset_path);
        if let Some(cached) = self
            .cache
            .get(&anchored)
            .filter(|value| is_relative_identifier(value))
        {
            tracing::trace!(anchored = %anchored, identifier = %cached, "identifier cache hit");
            return cached;
        }

        self.hooks.create_relative_path_identifier(
            &self.cache,
            &anchored,
            asset_path,
            anchor_asset_path,
        )
    }

    /// Resolve a `{shot}/{cacheType}/{version}` query through `store`,
    /// caching the result under the query string in [`versions`](Self::versions).
    ///
    /// The cache lock is never held across the store round-trip.
    pub async fn resolve_versioned<C: ShotCollection>(
        &self,
        store: &VersionStore<C>,
        query: &str,
    ) -> Result<String, StoreError> {
        if let Some(cached) = self.versions.get(query) {
            return Ok(cached);
        }

        let path = store.get_path(query).await?;
        self.versions.put(query, &path);
        Ok(path)
    }
}

impl std::fmt::Debug for ResolverContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverContext")
            .field("cache", &self.cache)
            .field("versions", &self.versions)
            .finish_non_exhaustive()
    }
}
