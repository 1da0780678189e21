//! Resolution cache shared by every resolver component of a context.
//!
//! Entries are never evicted: the cache lives exactly as long as the owning
//! [`ResolverContext`](crate::context::ResolverContext).

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Write/read capability the resolver components depend on.
///
/// Hosts that keep their own cache can implement this instead of using
/// [`ResolutionCache`].
pub trait CacheStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str);

    /// Look up the value cached for `key`.
    fn get(&self, key: &str) -> Option<String>;
}

/// An `(unresolved key, resolved value)` association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPair {
    pub key: String,
    pub value: String,
}

impl CachedPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Thread-safe, insertion-ordered resolution cache.
///
/// Overwriting a key keeps its first insertion position so that inspection order
/// stays deterministic across repeated resolutions.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<IndexMap<String, String>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host-facing name for [`CacheStore::put`].
    pub fn add_caching_pair(&self, key: &str, value: &str) {
        self.put(key, value);
    }

    /// Batch preload, applied under a single write lock.
    pub fn seed<I, K, V>(&self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = self.entries.write();
        for (key, value) in pairs {
            entries.insert(key.into(), value.into());
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of all pairs in insertion order.
    pub fn pairs(&self) -> Vec<CachedPair> {
        self.entries
            .read()
            .iter()
            .map(|(key, value)| CachedPair::new(key.clone(), value.clone()))
            .collect()
    }
}

impl CacheStore for ResolutionCache {
    fn put(&self, key: &str, value: &str) {
        let mut entries = self.entries.write();
        match entries.get_mut(key) {
            Some(existing) => {
                if existing.as_str() != value {
                    tracing::debug!(key, old = %existing, new = value, "overwriting cached pair");
                    *existing = value.to_string();
                }
            }
            None => {
                entries.insert(key.to_string(), value.to_string());
            }
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }
}
