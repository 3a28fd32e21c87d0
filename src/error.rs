//! Error types for the Shopline API client.
//!
//! This module contains the configuration error type. Transport errors live in
//! [`crate::clients`] and enriched, user-facing errors in [`crate::rest`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use shopline_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Shopline access token.")]
    EmptyAccessToken,

    /// Store handle is invalid.
    #[error("Invalid store handle '{handle}'. Only alphanumeric characters and hyphens are allowed.")]
    InvalidStoreHandle {
        /// The invalid handle that was provided.
        handle: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'vYYYYMMDD' (e.g., 'v20251201').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with an http or https scheme.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
