//! rsrc Core Library
//!
//! Asset identifier resolution and caching for scene loading hosts:
//! relative-path identifiers, environment-driven `rsrc:` resolution,
//! versioned-asset lookups against a shot document store, and URI parsing.

pub mod cache;
pub mod config;
pub mod context;
pub mod hooks;
pub mod identifier;
pub mod instrument;
pub mod path;
pub mod store;
pub mod uri;

/// Re-exports of commonly used types
pub mod prelude {
    // Cache
    pub use crate::cache::{CacheStore, CachedPair, ResolutionCache};

    // Configuration
    pub use crate::config::{ConfigStore, ResolverConfig, StoreConfig};

    // Resolution
    pub use crate::context::{
        ContextResolver, EnvSource, MapEnv, ProcessEnv, Resolution, ResolverContext,
        UnresolvedReason,
    };
    pub use crate::hooks::{DefaultHooks, ResolverHooks};
    pub use crate::identifier::IdentifierResolver;
    pub use crate::instrument::Instrumented;

    // Version store
    pub use crate::store::{
        HttpCollection, MemoryCollection, RetryPolicy, ShotCollection, ShotDocument, StoreError,
        VersionQuery, VersionStore,
    };

    // URI
    pub use crate::uri::{ParsedUri, QueryValue, UriError};
}
