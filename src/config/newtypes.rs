//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Shopline access token.
///
/// The token is sent both as a bearer token and in the
/// `X-Shopline-Access-Token` header.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AccessToken(*****)`.
///
/// # Example
///
/// ```rust
/// use shopline_api::AccessToken;
///
/// let token = AccessToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token.to_string()))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated store handle, the subdomain of `{handle}.myshopline.com`.
///
/// # Example
///
/// ```rust
/// use shopline_api::StoreHandle;
///
/// let handle = StoreHandle::new("my-store").unwrap();
/// assert_eq!(handle.as_ref(), "my-store");
/// assert!(StoreHandle::new("my store").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreHandle(String);

impl StoreHandle {
    /// Creates a new validated store handle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreHandle`] if the handle is empty or
    /// contains anything other than ASCII alphanumerics and hyphens.
    pub fn new(handle: impl Into<String>) -> Result<Self, ConfigError> {
        let handle: String = handle.into();
        let handle = handle.trim().to_string();

        let valid = !handle.is_empty()
            && handle
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(ConfigError::InvalidStoreHandle { handle });
        }

        Ok(Self(handle))
    }
}

impl AsRef<str> for StoreHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StoreHandle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StoreHandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated API base URL, used to point the client at a proxy or a mock server.
///
/// Trailing slashes are trimmed so request paths (which start with `/`) can be
/// appended directly.
///
/// # Example
///
/// ```rust
/// use shopline_api::BaseUrl;
///
/// let url = BaseUrl::new("http://localhost:8080/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080");
/// assert_eq!(url.scheme(), "http");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not use the
    /// `http` or `https` scheme or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let Some(scheme_end) = url.find("://") else {
            return Err(ConfigError::InvalidBaseUrl { url });
        };

        let scheme = &url[..scheme_end];
        let host = &url[scheme_end + 3..];
        if !matches!(scheme, "http" | "https") || host.is_empty() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self { url, scheme_end })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
