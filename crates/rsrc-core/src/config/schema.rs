//! Configuration schema for rsrc.toml

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::store::RetryPolicy;

/// Root location `rsrc:` references resolve under.
pub const DEFAULT_ROOT: &str = "D:/inferno";

/// Reserved scheme token handled by the context resolver.
pub const DEFAULT_SCHEME: &str = "rsrc";

/// Root configuration structure for rsrc.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Root directory; resolved paths are `<root>/<show>/<shot>/<relative>`
    pub root: String,

    /// Scheme token; `<scheme>:/` and `<scheme>://` prefixes are recognized
    pub scheme: String,

    /// Pairs preloaded into every new context cache
    pub seed: IndexMap<String, String>,

    /// Version store access
    pub store: StoreConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let mut seed = IndexMap::new();
        seed.insert(
            "shot.usd".to_string(),
            "/some/path/to/a/file.usd".to_string(),
        );

        Self {
            root: DEFAULT_ROOT.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            seed,
            store: StoreConfig::default(),
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.root.trim().is_empty() {
            anyhow::bail!("root must not be empty");
        }
        if !is_valid_scheme(&self.scheme) {
            anyhow::bail!("Invalid scheme token: '{}'", self.scheme);
        }
        if self.store.timeout_ms == 0 {
            anyhow::bail!("store.timeout_ms must be greater than zero");
        }
        if let Some(url) = &self.store.url {
            url::Url::parse(url)
                .map_err(|e| anyhow::anyhow!("Invalid store url '{}': {}", url, e))?;
        }
        Ok(())
    }
}

/// `[store]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Base URL of the shot document service
    pub url: Option<String>,

    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,

    /// Retries after the first attempt for transient failures
    pub max_retries: u32,

    /// Initial backoff in milliseconds, doubled per retry
    pub backoff_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            url: None,
            timeout_ms: policy.timeout.as_millis() as u64,
            max_retries: policy.max_retries,
            backoff_ms: policy.backoff.as_millis() as u64,
        }
    }
}

impl StoreConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_millis(self.timeout_ms),
            max_retries: self.max_retries,
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
