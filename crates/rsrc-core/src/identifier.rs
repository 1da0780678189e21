//! Relative-path identifiers.
//!
//! A host anchors a relative reference (`../textures/a.png`) against the
//! document that authored it. Returning that anchored path verbatim would make
//! the host treat it as a plain filesystem path and skip this resolver, so
//! relative references are instead encoded into an opaque identifier:
//!
//! ```text
//! relativePath|<asset path>?<anchor path>
//! ```
//!
//! The identifier never starts with `/`, `./` or `../` and never uses a
//! `scheme:` form.

use crate::cache::CacheStore;
use crate::path::{is_drive, normalize_path};

/// Reserved prefix tagging relative-path identifiers.
pub const RELATIVE_PATH_PREFIX: &str = "relativePath|";

/// Delimiter between the asset path and its anchor.
pub const ANCHOR_DELIMITER: char = '?';

/// Builds canonical identifiers for relative asset references.
pub struct IdentifierResolver;

impl IdentifierResolver {
    /// Build the identifier for `asset_path` anchored at `anchor_asset_path`
    /// and register `(anchored_asset_path -> identifier)` in `cache`.
    ///
    /// `anchored_asset_path` is the key the host looks the identifier up with
    /// later, so it must be the host's canonical anchored form.
    pub fn create_relative_path_identifier(
        cache: &dyn CacheStore,
        anchored_asset_path: &str,
        asset_path: &str,
        anchor_asset_path: &str,
    ) -> String {
        let identifier = format!(
            "{}{}{}{}",
            RELATIVE_PATH_PREFIX, asset_path, ANCHOR_DELIMITER, anchor_asset_path
        )
        .replace('\\', "/");

        cache.put(anchored_asset_path, &identifier);
        identifier
    }
}

/// True if `identifier` carries the relative-path prefix.
pub fn is_relative_identifier(identifier: &str) -> bool {
    identifier.starts_with(RELATIVE_PATH_PREFIX)
}

/// Split a relative-path identifier back into `(asset_path, anchor_path)`.
///
/// Splits on the first delimiter, so asset paths containing `?` are not
/// recoverable.
pub fn parse_relative_path_identifier(identifier: &str) -> Option<(&str, &str)> {
    identifier
        .strip_prefix(RELATIVE_PATH_PREFIX)?
        .split_once(ANCHOR_DELIMITER)
}

/// `./` and `../` references.
pub fn is_file_relative_path(path: &str) -> bool {
    path.starts_with("./") || path.starts_with("../")
}

/// Non-empty and not absolute in either POSIX or Windows form.
pub fn is_relative_path(path: &str) -> bool {
    if path.is_empty() || path.starts_with('/') || path.starts_with('\\') {
        return false;
    }
    let drive_rooted = path.get(..2).is_some_and(is_drive)
        && matches!(path.as_bytes().get(2), Some(b'/' | b'\\'));
    !drive_rooted
}

/// Relative references that are not file-relative (`textures/a.png`).
pub fn is_search_path(path: &str) -> bool {
    is_relative_path(path) && !is_file_relative_path(path)
}

/// Anchor `path` against the directory of `anchor_path`.
///
/// An anchor not ending in `/` names a file, so its last component is
/// dropped. Returns `path` untouched if the anchor is relative or `path` is
/// not relative.
pub fn anchor_relative_path(anchor_path: &str, path: &str) -> String {
    if is_relative_path(anchor_path) || anchor_path.is_empty() || !is_relative_path(path) {
        return path.to_string();
    }

    let forward = anchor_path.replace('\\', "/");
    let directory = match forward.rfind('/') {
        Some(index) => &forward[..=index],
        None => "",
    };

    normalize_path(&format!("{}{}", directory, path))
}
