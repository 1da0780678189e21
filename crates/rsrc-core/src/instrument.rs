//! Call tracing for resolver hooks.
//!
//! [`Instrumented`] wraps any [`ResolverHooks`] and records each call in a
//! `tracing` span with its arguments and result. Business logic stays in the
//! wrapped hooks.

use crate::cache::CacheStore;
use crate::context::Resolution;
use crate::hooks::ResolverHooks;

#[derive(Debug)]
pub struct Instrumented<H> {
    inner: H,
}

impl<H: ResolverHooks> Instrumented<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: ResolverHooks> ResolverHooks for Instrumented<H> {
    fn create_relative_path_identifier(
        &self,
        cache: &dyn CacheStore,
        anchored_asset_path: &str,
        asset_path: &str,
        anchor_asset_path: &str,
    ) -> String {
        let span = tracing::debug_span!(
            "create_relative_path_identifier",
            anchored_asset_path,
            asset_path,
            anchor_asset_path
        );
        span.in_scope(|| {
            let identifier = self.inner.create_relative_path_identifier(
                cache,
                anchored_asset_path,
                asset_path,
                anchor_asset_path,
            );
            tracing::debug!(%identifier, "identifier created");
            identifier
        })
    }

    fn initialize(&self, cache: &dyn CacheStore) {
        tracing::debug_span!("initialize").in_scope(|| {
            self.inner.initialize(cache);
            tracing::debug!("context initialized");
        })
    }

    fn resolve_and_cache(&self, cache: &dyn CacheStore, asset_path: &str) -> Resolution {
        tracing::debug_span!("resolve_and_cache", asset_path).in_scope(|| {
            let resolution = self.inner.resolve_and_cache(cache, asset_path);
            tracing::debug!(?resolution, "resolution finished");
            resolution
        })
    }
}
