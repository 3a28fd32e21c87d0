//! Shopline Admin API version definitions.
//!
//! The Admin OpenAPI (`{handle}.myshopline.com/admin/openapi/{version}`) is
//! versioned by release date. The token-scoped Open API at `open.shopline.io`
//! is always `v1` and ignores this setting.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shopline Admin API version.
///
/// # Example
///
/// ```rust
/// use shopline_api::ApiVersion;
///
/// let version = ApiVersion::latest();
/// assert_eq!(version.to_string(), "v20251201");
///
/// let version: ApiVersion = "v20260301".parse().unwrap();
/// assert_eq!(version, ApiVersion::Custom("v20260301".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version released 2025-12-01.
    V20251201,
    /// Any other `vYYYYMMDD` release.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V20251201
    }

    fn is_valid_version_format(s: &str) -> bool {
        let Some(digits) = s.strip_prefix('v') else {
            return false;
        };
        if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }

        let month: u32 = digits[4..6].parse().unwrap_or(0);
        let day: u32 = digits[6..8].parse().unwrap_or(0);
        (1..=12).contains(&month) && (1..=31).contains(&day)
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V20251201 => f.write_str("v20251201"),
            Self::Custom(s) => f.write_str(s),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "v20251201" => Ok(Self::V20251201),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}
