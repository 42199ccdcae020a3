//! URL joining and query-string construction.

use roster_domain::RosterError;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;
use url::Url;

/// Join `base` and `path` with exactly one `/` between them.
///
/// `base` may or may not end with a slash and `path` may or may not start
/// with one; an empty path addresses the base itself.
///
/// # Errors
/// Returns `RosterError::Config` if the joined string is not an absolute URL.
pub fn join_url(base: &str, path: &str, query: &Query) -> Result<Url, RosterError> {
    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.trim_start_matches('/');

    let mut joined = format!("{base}/{path}");
    if !query.is_empty() {
        joined.push(if path.contains('?') { '&' } else { '?' });
        joined.push_str(&query.encode());
    }

    Url::parse(&joined).map_err(|err| RosterError::Config(format!("invalid URL '{joined}': {err}")))
}

/// Ordered query parameters; absent values are never emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the top-level fields of a serializable value.
    ///
    /// `null` fields are skipped. Strings are used verbatim, numbers and
    /// booleans are rendered as text, and nested values as compact JSON.
    ///
    /// # Errors
    /// Returns `RosterError::Serialization` if `params` does not serialize to
    /// a JSON object (or `null`, which yields an empty query).
    pub fn from_params<P: Serialize + ?Sized>(params: &P) -> Result<Self, RosterError> {
        let value = serde_json::to_value(params)
            .map_err(|err| RosterError::Serialization(err.to_string()))?;

        let map = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(map) => map,
            other => {
                return Err(RosterError::Serialization(format!(
                    "query parameters must be an object, got {other}"
                )))
            }
        };

        let mut query = Self::new();
        for (key, value) in map {
            let rendered = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                nested => nested.to_string(),
            };
            query.pairs.push((key, rendered));
        }
        Ok(query)
    }

    /// Append `key=value` when `value` is present.
    #[must_use]
    pub fn push(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key.into(), value.to_string()));
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded` rendering, without the leading `?`.
    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish()
    }
}
