//! Shot documents as stored in the version store.
//!
//! Wire form:
//!
//! ```json
//! {
//!   "shot_name": "AAA_084_0010",
//!   "cache_usd_geo": { "v001": "/path/v001/geo.usda", "v002": "/path/v002/geo.usda" }
//! }
//! ```
//!
//! Every object-valued field besides `shot_name` is a cache section. Other
//! fields (store ids, timestamps) are ignored, as are non-string versions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{StoreError, VersionQuery};

/// Version name to stored path.
pub type CacheSection = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawShotDocument")]
pub struct ShotDocument {
    pub shot_name: String,
    #[serde(flatten)]
    pub cache_sections: BTreeMap<String, CacheSection>,
}

#[derive(Deserialize)]
struct RawShotDocument {
    shot_name: String,
    #[serde(flatten)]
    fields: BTreeMap<String, serde_json::Value>,
}

impl From<RawShotDocument> for ShotDocument {
    fn from(raw: RawShotDocument) -> Self {
        let cache_sections = raw
            .fields
            .into_iter()
            .filter_map(|(cache_type, value)| match value {
                serde_json::Value::Object(entries) => {
                    let section = entries
                        .into_iter()
                        .filter_map(|(version, path)| match path {
                            serde_json::Value::String(path) => Some((version, path)),
                            _ => None,
                        })
                        .collect();
                    Some((cache_type, section))
                }
                _ => None,
            })
            .collect();

        Self {
            shot_name: raw.shot_name,
            cache_sections,
        }
    }
}

impl ShotDocument {
    pub fn new(shot_name: impl Into<String>) -> Self {
        Self {
            shot_name: shot_name.into(),
            cache_sections: BTreeMap::new(),
        }
    }

    /// Add a version entry, creating the cache section if needed.
    pub fn with_version(
        mut self,
        cache_type: impl Into<String>,
        version: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.cache_sections
            .entry(cache_type.into())
            .or_default()
            .insert(version.into(), path.into());
        self
    }

    /// Walk the cache section and version levels of `query`.
    ///
    /// An empty section or an empty path counts as absent.
    pub fn version_path(&self, query: &VersionQuery) -> Result<&str, StoreError> {
        let section = self
            .cache_sections
            .get(&query.cache_type)
            .filter(|section| !section.is_empty())
            .ok_or_else(|| StoreError::CacheTypeNotFound {
                cache_type: query.cache_type.clone(),
                shot: self.shot_name.clone(),
            })?;

        section
            .get(&query.version)
            .map(String::as_str)
            .filter(|path| !path.is_empty())
            .ok_or_else(|| StoreError::VersionNotFound {
                version: query.version.clone(),
                cache_type: query.cache_type.clone(),
                shot: self.shot_name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_form_and_ignores_foreign_fields() {
        let doc: ShotDocument = serde_json::from_str(
            r#"{
                "_id": "65f1c0ffee",
                "shot_name": "AAA_084_0010",
                "frame_range": [1001, 1100],
                "cache_usd_geo": {"v002": "/path/geo.usda", "note": 3}
            }"#,
        )
        .unwrap();

        assert_eq!(doc.shot_name, "AAA_084_0010");
        assert_eq!(doc.cache_sections.len(), 1);
        assert_eq!(doc.cache_sections["cache_usd_geo"].len(), 1);
        assert_eq!(doc.cache_sections["cache_usd_geo"]["v002"], "/path/geo.usda");
    }

    #[test]
    fn serializes_sections_flat() {
        let doc = ShotDocument::new("AAA").with_version("cache_usd_geo", "v001", "/a.usda");
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"shot_name": "AAA", "cache_usd_geo": {"v001": "/a.usda"}})
        );
    }

    #[test]
    fn version_path_walks_levels() {
        let doc = ShotDocument::new("AAA").with_version("cache_usd_geo", "v002", "/geo.usda");

        assert_eq!(
            doc.version_path(&VersionQuery::new("AAA", "cache_usd_geo", "v002")),
            Ok("/geo.usda")
        );
        assert!(matches!(
            doc.version_path(&VersionQuery::new("AAA", "cache_anim", "v002")),
            Err(StoreError::CacheTypeNotFound { .. })
        ));
        assert!(matches!(
            doc.version_path(&VersionQuery::new("AAA", "cache_usd_geo", "v003")),
            Err(StoreError::VersionNotFound { .. })
        ));
    }

    #[test]
    fn empty_entries_count_as_absent() {
        let mut doc = ShotDocument::new("AAA").with_version("geo", "v001", "");
        doc.cache_sections.insert("anim".to_string(), CacheSection::new());

        assert!(matches!(
            doc.version_path(&VersionQuery::new("AAA", "geo", "v001")),
            Err(StoreError::VersionNotFound { .. })
        ));
        assert!(matches!(
            doc.version_path(&VersionQuery::new("AAA", "anim", "v001")),
            Err(StoreError::CacheTypeNotFound { .. })
        ));
    }
}
