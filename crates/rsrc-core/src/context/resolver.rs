//! Environment-driven resolution of `rsrc:` references.

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use super::env::{EnvSource, ProcessEnv, SHOT_NAME_VAR, SHOW_NAME_VAR};
use crate::cache::CacheStore;
use crate::config::ResolverConfig;
use crate::path::normalize_path;

/// Outcome of resolving one asset path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing to resolve (empty asset path).
    NotApplicable,
    /// Resolved and cached.
    Resolved(String),
    /// Resolution was attempted and failed; nothing was cached.
    Unresolved(UnresolvedReason),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Resolved(path) => Some(path.as_str()),
            _ => None,
        }
    }

    /// Collapse to the host string contract: the path, or `""` otherwise.
    pub fn into_host_path(self) -> String {
        match self {
            Self::Resolved(path) => path,
            Self::NotApplicable | Self::Unresolved(_) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnresolvedReason {
    #[error("{variable} is not set in the environment")]
    MissingEnvironment { variable: String },
}

/// Resolves scheme-prefixed references under `<root>/<show>/<shot>/` and
/// passes everything else through unchanged.
pub struct ContextResolver {
    root: String,
    scheme_prefix: String,
    seed: IndexMap<String, String>,
    env: Arc<dyn EnvSource>,
}

impl ContextResolver {
    /// Build from configuration, reading the process environment.
    pub fn new(config: &ResolverConfig) -> Self {
        Self::with_env(config, Arc::new(ProcessEnv))
    }

    pub fn with_env(config: &ResolverConfig, env: Arc<dyn EnvSource>) -> Self {
        Self {
            root: config.root.trim_end_matches(['/', '\\']).to_string(),
            scheme_prefix: format!("{}:/", config.scheme),
            seed: config.seed.clone(),
            env,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Preload the configured seed pairs.
    pub fn initialize(&self, cache: &dyn CacheStore) {
        for (key, value) in &self.seed {
            cache.put(key, value);
        }
    }

    /// The reference relative to `<root>/<show>/<shot>`, if `asset_path`
    /// uses the reserved scheme. Covers both `rsrc:/` and `rsrc://` forms.
    pub fn strip_scheme<'a>(&self, asset_path: &'a str) -> Option<&'a str> {
        asset_path
            .strip_prefix(self.scheme_prefix.as_str())
            .map(|rest| rest.trim_start_matches('/'))
    }

    /// Resolve `asset_path` and cache successful results under it.
    pub fn resolve_and_cache(&self, cache: &dyn CacheStore, asset_path: &str) -> Resolution {
        if asset_path.is_empty() {
            return Resolution::NotApplicable;
        }

        let resolved = match self.strip_scheme(asset_path) {
            Some(relative_path) => match self.resolve_scoped(relative_path) {
                Ok(path) => path,
                Err(reason) => {
                    tracing::warn!(asset_path, %reason, "cannot resolve scheme reference");
                    return Resolution::Unresolved(reason);
                }
            },
            None => asset_path.to_string(),
        };

        cache.put(asset_path, &resolved);
        tracing::debug!(asset_path, resolved = %resolved, "resolved");
        Resolution::Resolved(resolved)
    }

    fn resolve_scoped(&self, relative_path: &str) -> Result<String, UnresolvedReason> {
        let show = self.required_var(SHOW_NAME_VAR)?;
        let shot = self.required_var(SHOT_NAME_VAR)?;

        Ok(normalize_path(&format!(
            "{}/{}/{}/{}",
            self.root, show, shot, relative_path
        )))
    }

    fn required_var(&self, name: &str) -> Result<String, UnresolvedReason> {
        self.env
            .var(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| UnresolvedReason::MissingEnvironment {
                variable: name.to_string(),
            })
    }
}

impl std::fmt::Debug for ContextResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextResolver")
            .field("root", &self.root)
            .field("scheme_prefix", &self.scheme_prefix)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
