//! Configuration types for the Shopline API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ShoplineConfig`]: The main configuration struct holding all client settings
//! - [`ShoplineConfigBuilder`]: A builder for constructing [`ShoplineConfig`] instances
//! - [`AccessToken`]: A validated access token with masked debug output
//! - [`StoreHandle`]: A validated store handle for the Admin API host
//! - [`BaseUrl`]: A validated base URL override
//! - [`ApiMode`]: Which Shopline API host family to talk to
//! - [`ApiVersion`]: The Admin API version to use
//! - [`RetryConfig`]: Backoff settings for network retries
//!
//! # Example
//!
//! ```rust
//! use shopline_api::{ShoplineConfig, AccessToken};
//!
//! let config = ShoplineConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://open.shopline.io/v1");
//! ```

mod newtypes;
mod retry;
mod version;

pub use newtypes::{AccessToken, BaseUrl, StoreHandle};
pub use retry::RetryConfig;
pub use version::ApiVersion;

use std::time::Duration;

use crate::error::ConfigError;

/// Base URL of the token-scoped Open API.
pub const OPEN_API_BASE_URL: &str = "https://open.shopline.io/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which Shopline API host the client talks to.
///
/// The Open API bearer token is scoped to one store, so no handle appears in
/// the URL. The Admin API is addressed per store and per version.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ApiMode {
    /// `https://open.shopline.io/v1`
    #[default]
    OpenApi,
    /// `https://{handle}.myshopline.com/admin/openapi/{version}`
    Admin(StoreHandle),
}

/// Configuration for the Shopline API client.
///
/// # Thread Safety
///
/// `ShoplineConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use shopline_api::{AccessToken, ApiMode, ShoplineConfig, StoreHandle};
///
/// let config = ShoplineConfig::builder()
///     .access_token(AccessToken::new("token").unwrap())
///     .api_mode(ApiMode::Admin(StoreHandle::new("my-store").unwrap()))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     config.base_url(),
///     "https://my-store.myshopline.com/admin/openapi/v20251201"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ShoplineConfig {
    access_token: AccessToken,
    api_mode: ApiMode,
    api_version: ApiVersion,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Duration,
    retry: RetryConfig,
}

impl ShoplineConfig {
    /// Creates a new builder for constructing a `ShoplineConfig`.
    #[must_use]
    pub fn builder() -> ShoplineConfigBuilder {
        ShoplineConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API mode.
    #[must_use]
    pub const fn api_mode(&self) -> &ApiMode {
        &self.api_mode
    }

    /// Returns the Admin API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the network retry settings.
    #[must_use]
    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Resolves the base URL requests are sent to.
    ///
    /// An explicit override wins; otherwise the URL is derived from the API
    /// mode and version.
    #[must_use]
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.as_ref().to_string();
        }
        match &self.api_mode {
            ApiMode::OpenApi => OPEN_API_BASE_URL.to_string(),
            ApiMode::Admin(handle) => format!(
                "https://{handle}.myshopline.com/admin/openapi/{}",
                self.api_version
            ),
        }
    }
}

// Verify ShoplineConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShoplineConfig>();
};

/// Builder for constructing [`ShoplineConfig`] instances.
///
/// The only required field is `access_token`.
///
/// # Defaults
///
/// - `api_mode`: [`ApiMode::OpenApi`]
/// - `api_version`: latest
/// - `base_url`: `None` (derived from the mode)
/// - `user_agent_prefix`: `None`
/// - `timeout`: 30 seconds
/// - `retry`: [`RetryConfig::from_env`], i.e. the defaults adjusted by any
///   `SHOPLINE_RETRY_*` environment variables
#[derive(Debug, Default)]
pub struct ShoplineConfigBuilder {
    access_token: Option<AccessToken>,
    api_mode: Option<ApiMode>,
    api_version: Option<ApiVersion>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl ShoplineConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API mode.
    #[must_use]
    pub fn api_mode(mut self, mode: ApiMode) -> Self {
        self.api_mode = Some(mode);
        self
    }

    /// Sets the Admin API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Overrides the base URL, e.g. for a proxy or a local mock server.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the network retry settings.
    ///
    /// An explicit config takes precedence over the `SHOPLINE_RETRY_*`
    /// environment variables.
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Builds the [`ShoplineConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_token` is not set.
    pub fn build(self) -> Result<ShoplineConfig, ConfigError> {
        self.build_with_env(|key| std::env::var(key).ok())
    }

    fn build_with_env<F>(self, lookup: F) -> Result<ShoplineConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        Ok(ShoplineConfig {
            access_token,
            api_mode: self.api_mode.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            base_url: self.base_url,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry: self
                .retry
                .unwrap_or_else(|| RetryConfig::from_lookup(lookup)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> AccessToken {
        AccessToken::new("token").unwrap()
    }

    #[test]
    fn test_builder_requires_access_token() {
        let result = ShoplineConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_token"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ShoplineConfig::builder()
            .access_token(token())
            .build()
            .unwrap();

        assert_eq!(config.api_mode(), &ApiMode::OpenApi);
        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.retry(), &RetryConfig::from_env());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.base_url(), OPEN_API_BASE_URL);
    }

    #[test]
    fn test_builder_reads_retry_settings_from_env() {
        let lookup = |key: &str| match key {
            "SHOPLINE_RETRY_BASE" => Some("500ms".to_string()),
            "SHOPLINE_RETRY_BUDGET" => Some("0".to_string()),
            _ => None,
        };
        let config = ShoplineConfig::builder()
            .access_token(token())
            .build_with_env(lookup)
            .unwrap();

        assert_eq!(config.retry().base_delay(), Duration::from_millis(500));
        assert_eq!(config.retry().budget(), Some(Duration::ZERO));
    }

    #[test]
    fn test_explicit_retry_overrides_env() {
        let lookup = |_: &str| Some("5s".to_string());
        let config = ShoplineConfig::builder()
            .access_token(token())
            .retry(RetryConfig::disabled())
            .build_with_env(lookup)
            .unwrap();

        assert_eq!(config.retry(), &RetryConfig::disabled());
    }

    #[test]
    fn test_admin_mode_base_url_uses_handle_and_version() {
        let config = ShoplineConfig::builder()
            .access_token(token())
            .api_mode(ApiMode::Admin(StoreHandle::new("acme").unwrap()))
            .api_version("v20260101".parse().unwrap())
            .build()
            .unwrap();

        assert_eq!(
            config.base_url(),
            "https://acme.myshopline.com/admin/openapi/v20260101"
        );
    }

    #[test]
    fn test_base_url_override_wins() {
        let config = ShoplineConfig::builder()
            .access_token(token())
            .api_mode(ApiMode::Admin(StoreHandle::new("acme").unwrap()))
            .base_url(BaseUrl::new("http://127.0.0.1:9000/").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_config_debug_masks_token() {
        let config = ShoplineConfig::builder()
            .access_token(AccessToken::new("very-secret").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ShoplineConfig"));
        assert!(!debug_str.contains("very-secret"));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShoplineConfig>();
    }
}
