//! Versioned-asset lookups against a shot document store.
//!
//! Queries have the form `{shot}/{cacheType}/{version}` and are resolved in
//! three steps: shot document, cache section, version entry. Each missing
//! level reports its own error.

mod collection;
mod document;
mod error;
mod query;
mod version_store;

pub use collection::{HttpCollection, MemoryCollection, ShotCollection};
pub use document::{CacheSection, ShotDocument};
pub use error::StoreError;
pub use query::VersionQuery;
pub use version_store::{RetryPolicy, VersionStore};
