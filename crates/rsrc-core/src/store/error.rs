//! Error types for version store lookups

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Query path must be in 'shot/cache_type/version' format, got '{query}'")]
    MalformedQuery { query: String },

    #[error("No shot found with name: {shot}")]
    ShotNotFound { shot: String },

    #[error("'{cache_type}' not found in shot '{shot}'")]
    CacheTypeNotFound { cache_type: String, shot: String },

    #[error("Version '{version}' not found under '{cache_type}' for shot '{shot}'")]
    VersionNotFound {
        version: String,
        cache_type: String,
        shot: String,
    },

    #[error("Store transport error: {0}")]
    Transport(String),

    #[error("Store request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to decode shot document: {0}")]
    Decode(String),
}

impl StoreError {
    /// Failures worth retrying; everything else is a data or input problem.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_and_timeout_are_transient() {
        assert!(StoreError::Transport("reset".into()).is_transient());
        assert!(StoreError::Timeout(Duration::from_millis(5)).is_transient());
        assert!(!StoreError::Decode("bad".into()).is_transient());
        assert!(
            !StoreError::ShotNotFound {
                shot: "AAA".into()
            }
            .is_transient()
        );
    }

    #[test]
    fn not_found_messages_name_resolved_segments() {
        let err = StoreError::VersionNotFound {
            version: "v009".into(),
            cache_type: "cache_usd_geo".into(),
            shot: "AAA_084_0010".into(),
        };
        assert_eq!(
            err.to_string(),
            "Version 'v009' not found under 'cache_usd_geo' for shot 'AAA_084_0010'"
        );
    }
}
