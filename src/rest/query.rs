//! Query string builder for optional list and search filters.
//!
//! Resource methods accept option structs whose fields are mostly unset. The
//! [`QueryBuilder`] lets them chain every field unconditionally while only
//! the ones carrying a meaningful value reach the URL.
//!
//! # Omit-on-default
//!
//! The plain helpers ([`int`](QueryBuilder::int), [`string`](QueryBuilder::string),
//! [`bool`](QueryBuilder::bool)) treat the type's default value as "not set":
//! `0`, `""` and `false` never appear in the output. When the default value is
//! itself meaningful, use the `Option` helpers ([`bool_opt`](QueryBuilder::bool_opt),
//! [`time`](QueryBuilder::time)), which only omit `None`.
//!
//! # Example
//!
//! ```rust
//! use shopline_api::rest::QueryBuilder;
//!
//! let query = QueryBuilder::new()
//!     .int("page", 2)
//!     .int("page_size", 0)
//!     .string("status", "open")
//!     .bool_opt("accepts_marketing", Some(false));
//!
//! assert_eq!(query.len(), 3);
//! assert_eq!(query.build(), "?accepts_marketing=false&page=2&status=open");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// Accumulates URL query parameters, skipping unset values.
///
/// Keys render in sorted order so the same inputs always produce the same
/// string. Scalar helpers replace any previous value for their key;
/// [`strings`](Self::strings) appends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct QueryBuilder {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key=value` if `value` is positive.
    pub fn int(self, key: &str, value: impl Into<i64>) -> Self {
        let value = value.into();
        if value > 0 {
            self.set(key, value.to_string())
        } else {
            self
        }
    }

    /// Adds `key=value` if `value` is non-empty. The value is not trimmed.
    pub fn string(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.set(key, value.to_string())
        }
    }

    /// Adds one `key=value` pair per non-empty entry, keeping their order.
    pub fn strings<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if !values.is_empty() {
            self.params
                .entry(key.to_string())
                .or_default()
                .extend(values);
        }
        self
    }

    /// Adds `key=true` if `value` is `true`; `false` is treated as unset.
    pub fn bool(self, key: &str, value: bool) -> Self {
        if value {
            self.set(key, "true".to_string())
        } else {
            self
        }
    }

    /// Adds `key=true` or `key=false` when `value` is `Some`.
    pub fn bool_opt(self, key: &str, value: Option<bool>) -> Self {
        match value {
            Some(v) => self.set(key, v.to_string()),
            None => self,
        }
    }

    /// Adds the timestamp as RFC 3339 in UTC (e.g. `2024-01-15T10:30:00Z`)
    /// when `value` is `Some`.
    pub fn time(self, key: &str, value: Option<DateTime<Utc>>) -> Self {
        match value {
            Some(t) => self.set(key, t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => self,
        }
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameter has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Renders the percent-encoded `key=value&...` string without a leading `?`.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.params {
            let key = urlencoding::encode(key);
            for value in values {
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(&key);
                out.push('=');
                out.push_str(&urlencoding::encode(value));
            }
        }
        out
    }

    /// Renders the query as a path suffix: `""` when empty, otherwise
    /// `"?"` followed by [`encode`](Self::encode).
    #[must_use]
    pub fn build(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("?{}", self.encode())
        }
    }

    fn set(mut self, key: &str, value: String) -> Self {
        self.params.insert(key.to_string(), vec![value]);
        self
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
