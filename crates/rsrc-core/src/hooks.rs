//! The plugin boundary hosts call into.
//!
//! Hosts hold a `dyn ResolverHooks` and never depend on the concrete
//! resolvers behind it.

use crate::cache::CacheStore;
use crate::config::ResolverConfig;
use crate::context::{ContextResolver, Resolution};
use crate::identifier::IdentifierResolver;

/// Operations a host invokes per asset reference.
pub trait ResolverHooks: Send + Sync {
    /// Identifier for a relative reference; registers
    /// `(anchored_asset_path -> identifier)` in `cache`.
    fn create_relative_path_identifier(
        &self,
        cache: &dyn CacheStore,
        anchored_asset_path: &str,
        asset_path: &str,
        anchor_asset_path: &str,
    ) -> String;

    /// Called once when a context is created.
    fn initialize(&self, cache: &dyn CacheStore);

    /// Resolve `asset_path`, caching successful results.
    fn resolve_and_cache(&self, cache: &dyn CacheStore, asset_path: &str) -> Resolution;
}

/// Hooks backed by [`IdentifierResolver`] and [`ContextResolver`].
#[derive(Debug)]
pub struct DefaultHooks {
    context: ContextResolver,
}

impl DefaultHooks {
    pub fn new(context: ContextResolver) -> Self {
        Self { context }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(ContextResolver::new(config))
    }

    pub fn context_resolver(&self) -> &ContextResolver {
        &self.context
    }
}

impl ResolverHooks for DefaultHooks {
    fn create_relative_path_identifier(
        &self,
        cache: &dyn CacheStore,
        anchored_asset_path: &str,
        asset_path: &str,
        anchor_asset_path: &str,
    ) -> String {
        IdentifierResolver::create_relative_path_identifier(
            cache,
            anchored_asset_path,
            asset_path,
            anchor_asset_path,
        )
    }

    fn initialize(&self, cache: &dyn CacheStore) {
        self.context.initialize(cache);
    }

    fn resolve_and_cache(&self, cache: &dyn CacheStore, asset_path: &str) -> Resolution {
        self.context.resolve_and_cache(cache, asset_path)
    }
}
