//! URI decomposition for scheme-based asset references.
//!
//! Components are split per RFC 3986 Appendix B and returned exactly as
//! written: no percent-encoding, dot-segment removal, host case folding or
//! default-port elision. Only the scheme is lowercased.
//!
//! Invalid input never fails loudly: [`parse`] logs a diagnostic and returns
//! an empty [`ParsedUri`]. Use [`try_parse`] to see why.

use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("empty URI string")]
    Empty,

    #[error("no scheme found in URI")]
    NoScheme,

    #[error("invalid URI: {0}")]
    Invalid(String),
}

/// A query parameter: scalar when seen once, list when repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Multiple(Vec<String>),
}

impl QueryValue {
    fn from_values(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            Self::Single(values.remove(0))
        } else {
            Self::Multiple(values)
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.as_str()),
            Self::Multiple(_) => None,
        }
    }

    /// All values in encounter order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Structured URI components.
///
/// The default value is the empty result; it serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUri {
    pub scheme: String,
    pub authority: String,
    pub path: String,
    pub query_raw: String,
    pub query: IndexMap<String, QueryValue>,
    pub fragment: String,
}

impl ParsedUri {
    /// Only produced for empty or schemeless input.
    pub fn is_empty(&self) -> bool {
        self.scheme.is_empty()
    }
}

impl Serialize for ParsedUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_map(Some(0))?.end();
        }

        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("scheme", &self.scheme)?;
        map.serialize_entry("authority", &self.authority)?;
        map.serialize_entry("path", &self.path)?;
        map.serialize_entry("query_raw", &self.query_raw)?;
        map.serialize_entry("query", &self.query)?;
        map.serialize_entry("fragment", &self.fragment)?;
        map.end()
    }
}

/// True if `uri` starts with an RFC 3986 scheme followed by `:`.
pub fn has_scheme(uri: &str) -> bool {
    let Some((scheme, _)) = uri.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Parse `uri`, degrading to an empty result with a logged diagnostic.
pub fn parse(uri: &str) -> ParsedUri {
    match try_parse(uri) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(uri, "{}", err);
            ParsedUri::default()
        }
    }
}

/// Parse `uri`, reporting why it could not be decomposed.
pub fn try_parse(uri: &str) -> Result<ParsedUri, UriError> {
    if uri.is_empty() {
        return Err(UriError::Empty);
    }
    if !has_scheme(uri) {
        return Err(UriError::NoScheme);
    }

    let (scheme, rest) = uri.split_once(':').ok_or(UriError::NoScheme)?;
    let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
    let (rest, query_raw) = rest.split_once('?').unwrap_or((rest, ""));
    let (authority, path) = match rest.strip_prefix("//") {
        Some(after) => after.split_at(after.find('/').unwrap_or(after.len())),
        None => ("", rest),
    };

    if authority.contains('[') != authority.contains(']') {
        return Err(UriError::Invalid(format!(
            "unbalanced IPv6 brackets in authority '{}'",
            authority
        )));
    }

    Ok(ParsedUri {
        scheme: scheme.to_ascii_lowercase(),
        authority: authority.to_string(),
        path: path.to_string(),
        query_raw: query_raw.to_string(),
        query: parse_query(query_raw),
        fragment: fragment.to_string(),
    })
}

/// Group form-decoded query pairs by key, dropping blank values.
pub fn parse_query(raw: &str) -> IndexMap<String, QueryValue> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        grouped
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    grouped
        .into_iter()
        .map(|(key, values)| (key, QueryValue::from_values(values)))
        .collect()
}
