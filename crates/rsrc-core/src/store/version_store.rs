//! Three-level version lookups with bounded timeout and retry.

use std::time::Duration;

use super::{ShotCollection, ShotDocument, StoreError, VersionQuery};

/// Timeout and retry settings for store round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Limit for a single attempt
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each further one
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_retries: 2,
            backoff: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (zero-based).
    pub fn backoff_for(&self, retry: u32) -> Duration {
        self.backoff
            .saturating_mul(2u32.saturating_pow(retry.min(16)))
    }
}

/// Resolves `{shot}/{cacheType}/{version}` queries to stored paths.
///
/// Results are not cached here; callers cache through a
/// [`ResolverContext`](crate::context::ResolverContext).
#[derive(Debug, Clone)]
pub struct VersionStore<C> {
    collection: C,
    policy: RetryPolicy,
}

impl<C: ShotCollection> VersionStore<C> {
    pub fn new(collection: C) -> Self {
        Self {
            collection,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Parse `query_path` and resolve it.
    pub async fn get_path(&self, query_path: &str) -> Result<String, StoreError> {
        let query = VersionQuery::parse(query_path)?;
        self.lookup(&query).await
    }

    /// Resolve an already parsed query.
    pub async fn lookup(&self, query: &VersionQuery) -> Result<String, StoreError> {
        let document = self
            .find_shot_with_retry(&query.shot)
            .await?
            .ok_or_else(|| StoreError::ShotNotFound {
                shot: query.shot.clone(),
            })?;

        let path = document.version_path(query)?;
        tracing::debug!(%query, path, "resolved version query");
        Ok(path.to_string())
    }

    /// [`get_path`](Self::get_path) for synchronous callers.
    ///
    /// Drives the lookup on its own runtime, so it must not be called from
    /// inside an async context.
    pub fn get_path_blocking(&self, query_path: &str) -> Result<String, StoreError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Transport(format!("Failed to create tokio runtime: {}", e)))?;

        runtime.block_on(self.get_path(query_path))
    }

    async fn find_shot_with_retry(&self, shot: &str) -> Result<Option<ShotDocument>, StoreError> {
        let mut retry = 0;
        loop {
            let outcome =
                match tokio::time::timeout(self.policy.timeout, self.collection.find_shot(shot))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(StoreError::Timeout(self.policy.timeout)),
                };

            match outcome {
                Err(err) if err.is_transient() && retry < self.policy.max_retries => {
                    let delay = self.policy.backoff_for(retry);
                    tracing::warn!(
                        shot,
                        retry = retry + 1,
                        max_retries = self.policy.max_retries,
                        ?delay,
                        error = %err,
                        "transient store error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                other => return other,
            }
        }
    }
}
