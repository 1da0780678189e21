//! Version query parsing.

use std::fmt;
use std::str::FromStr;

use super::StoreError;

/// A parsed `{shot}/{cacheType}/{version}` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionQuery {
    pub shot: String,
    pub cache_type: String,
    pub version: String,
}

impl VersionQuery {
    pub fn new(
        shot: impl Into<String>,
        cache_type: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            shot: shot.into(),
            cache_type: cache_type.into(),
            version: version.into(),
        }
    }

    /// Parse a query path; exactly three non-empty segments are required.
    pub fn parse(query: &str) -> Result<Self, StoreError> {
        let segments: Vec<&str> = query.split('/').collect();
        match segments.as_slice() {
            [shot, cache_type, version]
                if !shot.is_empty() && !cache_type.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*shot, *cache_type, *version))
            }
            _ => Err(StoreError::MalformedQuery {
                query: query.to_string(),
            }),
        }
    }
}

impl FromStr for VersionQuery {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.shot, self.cache_type, self.version)
    }
}
