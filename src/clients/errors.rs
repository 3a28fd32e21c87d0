//! HTTP-specific error types for the Shopline API client.
//!
//! Every failure the transport can produce is a variant of the closed
//! [`HttpError`] enum, so callers (and the error enricher in
//! [`crate::rest`]) classify failures with an exhaustive `match` instead of
//! inspecting message strings.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopline_api::clients::HttpError;
//!
//! match client.get::<Order>("/orders/ord_123").await {
//!     Ok(order) => println!("Order: {}", order.id),
//!     Err(HttpError::RateLimit { retry_after }) => {
//!         println!("Slow down, retry in {}s", retry_after.as_secs());
//!     }
//!     Err(HttpError::Api(e)) if e.status == 404 => println!("No such order"),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the API for a non-2xx response.
///
/// Shopline returns `{"code": "...", "message": "..."}` for most client
/// errors. When the body cannot be decoded the transport fills `code` with
/// `HTTP_<status>` and `message` with the status text plus a body snippet.
///
/// # Example
///
/// ```rust
/// use shopline_api::clients::ApiError;
///
/// let error = ApiError {
///     code: "not_found".to_string(),
///     message: "order not found".to_string(),
///     status: 404,
/// };
/// assert_eq!(error.to_string(), "order not found");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code from the API.
    #[serde(default)]
    pub code: String,
    /// Human-readable error message from the API.
    #[serde(default)]
    pub message: String,
    /// The HTTP status code of the response.
    #[serde(skip)]
    pub status: u16,
}

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A resource ID was empty or whitespace.
    #[error("{resource} id is required")]
    EmptyId {
        /// The singular resource name (e.g., "order").
        resource: &'static str,
    },

    /// The request path is empty or not absolute.
    #[error("Invalid request path '{path}'. Paths must start with '/'.")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// The first five variants carry the shapes the error enricher knows how to
/// explain; the remaining ones classify as `UNKNOWN`.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API answered 429 and the request was not (or no longer) retried.
    #[error("rate limited: retry after {}s", wait_seconds(*retry_after))]
    RateLimit {
        /// How long the API asked the caller to wait.
        retry_after: Duration,
    },

    /// The API rejected the credentials (401).
    #[error("authentication failed: {reason}")]
    Auth {
        /// Reason reported by the API.
        reason: String,
    },

    /// The API rejected a field value (422 with a `field` in the body).
    #[error("validation failed on '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// Message reported by the API.
        message: String,
    },

    /// Any other non-2xx response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Too many consecutive server failures; the request was not sent.
    #[error("circuit breaker is open: too many consecutive server failures, try again later")]
    CircuitOpen,

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request body could not be serialized.
    #[error("failed to marshal request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body could not be deserialized.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl HttpError {
    /// Returns the HTTP status associated with this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimit { .. } => Some(429),
            Self::Auth { .. } => Some(401),
            Self::Validation { .. } => Some(422),
            Self::Api(e) => Some(e.status),
            _ => None,
        }
    }
}

/// Whole seconds to tell a caller to wait: rounded up, and never zero.
#[must_use]
pub(crate) fn wait_seconds(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}
