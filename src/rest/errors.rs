//! Error enrichment for REST resource operations.
//!
//! Transport failures arrive as an [`HttpError`]. Before they reach a user,
//! [`enrich_error`] classifies them into an [`ErrorCode`] and attaches
//! remediation suggestions worded for the resource the call targeted. The
//! original error stays reachable through [`std::error::Error::source`].
//!
//! # Classification
//!
//! Variants are inspected in priority order:
//!
//! - [`HttpError::RateLimit`]: `RATE_LIMITED`, with the retry-after delay
//! - [`HttpError::Auth`]: `AUTH_ERROR`
//! - [`HttpError::Validation`]: `VALIDATION_ERROR`
//! - [`HttpError::Api`]: by status, `NOT_FOUND` (404), `CONFLICT` (409),
//!   `SERVER_ERROR` (500, 502, 503) or `HTTP_<status>`
//! - anything else: `UNKNOWN`
//!
//! # Example
//!
//! ```rust,ignore
//! use shopline_api::rest::{format_rich_error, EnrichResultExt};
//! use shopline_api::rest::resources::Order;
//!
//! match Order::find(&client, "ord_123").await.enrich("orders", "ord_123") {
//!     Ok(order) => println!("{}", order.id),
//!     Err(e) => eprintln!("{}", format_rich_error(&e)),
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::clients::{wait_seconds, HttpError};

/// Classification of an enriched error.
///
/// Renders as the wire-style code, e.g. `NOT_FOUND` or `HTTP_418`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The API throttled the request.
    RateLimited,
    /// The credentials were rejected.
    AuthError,
    /// A field value was rejected.
    ValidationError,
    /// The resource does not exist.
    NotFound,
    /// The request conflicts with the resource's current state.
    Conflict,
    /// The API failed with 500, 502 or 503.
    ServerError,
    /// Any other HTTP status.
    Http(u16),
    /// Not an HTTP-level failure.
    Unknown,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => f.write_str("RATE_LIMITED"),
            Self::AuthError => f.write_str("AUTH_ERROR"),
            Self::ValidationError => f.write_str("VALIDATION_ERROR"),
            Self::NotFound => f.write_str("NOT_FOUND"),
            Self::Conflict => f.write_str("CONFLICT"),
            Self::ServerError => f.write_str("SERVER_ERROR"),
            Self::Http(status) => write!(f, "HTTP_{status}"),
            Self::Unknown => f.write_str("UNKNOWN"),
        }
    }
}

/// An error carrying a classification and remediation suggestions.
///
/// `Display` prints only the message; use [`format_rich_error`] to include
/// the suggestions.
///
/// # Example
///
/// ```rust
/// use shopline_api::rest::{format_rich_error, ErrorCode, RichError};
///
/// let error = RichError::new(ErrorCode::NotFound, "Order not found")
///     .with_suggestions(["Check the order ID", "Run 'spl orders list'"]);
///
/// assert_eq!(
///     format_rich_error(&error),
///     "Order not found\n\nSuggestions:\n  • Check the order ID\n  • Run 'spl orders list'"
/// );
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RichError {
    message: String,
    code: ErrorCode,
    suggestions: Vec<String>,
    resource: String,
    resource_id: String,
    retry_after: Option<Duration>,
    #[source]
    cause: Option<HttpError>,
}

impl RichError {
    /// Creates an error with no suggestions, resource or cause.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            suggestions: Vec::new(),
            resource: String::new(),
            resource_id: String::new(),
            retry_after: None,
            cause: None,
        }
    }

    /// Replaces the suggestions.
    #[must_use]
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    /// Records the resource the failed operation targeted.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>, id: impl Into<String>) -> Self {
        self.resource = resource.into();
        self.resource_id = id.into();
        self
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the classification code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the remediation suggestions, possibly empty.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Returns the resource name, e.g. `orders`.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the resource ID, empty for collection operations.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Returns how long the API asked to wait, for rate-limited errors.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Returns the original transport error.
    #[must_use]
    pub const fn cause(&self) -> Option<&HttpError> {
        self.cause.as_ref()
    }

    /// Consumes the error and returns the original transport error.
    #[must_use]
    pub fn into_cause(self) -> Option<HttpError> {
        self.cause
    }

    fn render(&self) -> String {
        if self.suggestions.is_empty() {
            return self.message.clone();
        }
        let bullets: Vec<String> = self
            .suggestions
            .iter()
            .map(|s| format!("  • {s}"))
            .collect();
        format!("{}\n\nSuggestions:\n{}", self.message, bullets.join("\n"))
    }
}

/// Classifies a transport error and attaches suggestions for `resource`.
///
/// `resource` is the plural resource name used in suggestions (e.g. `orders`);
/// `resource_id` may be empty.
#[must_use]
pub fn enrich_error(err: HttpError, resource: &str, resource_id: &str) -> RichError {
    let name = if resource.is_empty() { "resource" } else { resource };
    let mut retry_after = None;

    let (code, suggestions) = match &err {
        HttpError::RateLimit { retry_after: wait } => {
            retry_after = Some(*wait);
            let secs = wait_seconds(*wait);
            let unit = if secs == 1 { "second" } else { "seconds" };
            (
                ErrorCode::RateLimited,
                vec![
                    format!("Wait {secs} {unit} before retrying"),
                    "Reduce request frequency, for example by using larger page sizes".to_string(),
                ],
            )
        }
        HttpError::Auth { .. } => (
            ErrorCode::AuthError,
            vec![
                "Run 'spl auth login' to re-authenticate".to_string(),
                "Check that the access token has not expired or been revoked".to_string(),
                format!("Confirm the token has permission to access {name}"),
            ],
        ),
        HttpError::Validation { field, .. } => (
            ErrorCode::ValidationError,
            vec![
                format!("Check the value provided for '{field}'"),
                format!("Run 'spl {name} --help' to see accepted fields"),
            ],
        ),
        HttpError::Api(api) => match api.status {
            404 => {
                let verify = if resource_id.is_empty() {
                    format!("Verify the {name} ID is correct")
                } else {
                    format!("Verify the {name} ID '{resource_id}' is correct")
                };
                (
                    ErrorCode::NotFound,
                    vec![verify, format!("Run 'spl {name} list' to see available {name}")],
                )
            }
            409 => (
                ErrorCode::Conflict,
                vec![
                    format!("Fetch the latest {name} data and retry the change"),
                    "Check for duplicate values such as handles or emails".to_string(),
                ],
            ),
            500 | 502 | 503 => (
                ErrorCode::ServerError,
                vec![
                    "Shopline is having trouble; wait a moment and retry".to_string(),
                    "If the problem persists, contact Shopline support".to_string(),
                ],
            ),
            status => (
                ErrorCode::Http(status),
                vec![format!("Check the request parameters for {name}")],
            ),
        },
        _ => (ErrorCode::Unknown, Vec::new()),
    };

    let mut message = err.to_string();
    if message.is_empty() {
        message = format!("{name} request failed ({code})");
    }

    RichError {
        message,
        code,
        suggestions,
        resource: resource.to_string(),
        resource_id: resource_id.to_string(),
        retry_after,
        cause: Some(err),
    }
}

/// Enriches an optional error; `None` stays `None`.
#[must_use]
pub fn enrich_optional(
    err: Option<HttpError>,
    resource: &str,
    resource_id: &str,
) -> Option<RichError> {
    err.map(|e| enrich_error(e, resource, resource_id))
}

/// Adds [`enrich`](EnrichResultExt::enrich) to transport results.
pub trait EnrichResultExt<T> {
    /// Passes `Ok` through and enriches `Err`.
    ///
    /// # Errors
    ///
    /// Returns the enriched [`RichError`] if `self` is `Err`.
    fn enrich(self, resource: &str, resource_id: &str) -> Result<T, RichError>;
}

impl<T> EnrichResultExt<T> for Result<T, HttpError> {
    fn enrich(self, resource: &str, resource_id: &str) -> Result<T, RichError> {
        self.map_err(|e| enrich_error(e, resource, resource_id))
    }
}

/// Renders an error for display.
///
/// If `err` or any error in its source chain is a [`RichError`], renders its
/// message followed by a `Suggestions:` block with one `  • ` bullet per
/// suggestion (just the message when there are none). Other errors render
/// as their `Display` output.
#[must_use]
pub fn format_rich_error(err: &(dyn StdError + 'static)) -> String {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(rich) = e.downcast_ref::<RichError>() {
            return rich.render();
        }
        current = e.source();
    }
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ApiError;

    fn api_error(status: u16, message: &str) -> HttpError {
        HttpError::Api(ApiError {
            code: "error".to_string(),
            message: message.to_string(),
            status,
        })
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::RateLimited.to_string(), "RATE_LIMITED");
        assert_eq!(ErrorCode::AuthError.to_string(), "AUTH_ERROR");
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(ErrorCode::Conflict.to_string(), "CONFLICT");
        assert_eq!(ErrorCode::ServerError.to_string(), "SERVER_ERROR");
        assert_eq!(ErrorCode::Http(418).to_string(), "HTTP_418");
        assert_eq!(ErrorCode::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_not_found_mentions_resource_id() {
        let rich = enrich_error(api_error(404, "order not found"), "orders", "12345");

        assert_eq!(rich.code(), ErrorCode::NotFound);
        assert_eq!(rich.message(), "order not found");
        assert_eq!(rich.resource(), "orders");
        assert_eq!(rich.resource_id(), "12345");
        assert!(rich.suggestions().iter().any(|s| s.contains("12345")));
        assert!(rich
            .suggestions()
            .iter()
            .any(|s| s.contains("Verify the orders ID")));
    }

    #[test]
    fn test_rate_limit_carries_retry_after() {
        let err = HttpError::RateLimit {
            retry_after: Duration::from_secs(30),
        };
        let rich = enrich_error(err, "orders", "");

        assert_eq!(rich.code(), ErrorCode::RateLimited);
        assert_eq!(rich.retry_after(), Some(Duration::from_secs(30)));
        assert!(rich.suggestions().iter().any(|s| s.contains("30 seconds")));
    }

    #[test]
    fn test_rate_limit_wait_rounds_up_partial_seconds() {
        let wait = |millis| {
            let err = HttpError::RateLimit {
                retry_after: Duration::from_millis(millis),
            };
            enrich_error(err, "orders", "").suggestions()[0].clone()
        };

        assert_eq!(wait(400), "Wait 1 second before retrying");
        assert_eq!(wait(0), "Wait 1 second before retrying");
        assert_eq!(wait(1500), "Wait 2 seconds before retrying");
    }

    #[test]
    fn test_auth_suggests_login() {
        let err = HttpError::Auth {
            reason: "token expired".to_string(),
        };
        let rich = enrich_error(err, "orders", "");

        assert_eq!(rich.code(), ErrorCode::AuthError);
        assert!(rich.message().contains("token expired"));
        assert!(rich.suggestions().iter().any(|s| s.contains("spl auth login")));
        assert_eq!(rich.retry_after(), None);
    }

    #[test]
    fn test_validation_names_field() {
        let err = HttpError::Validation {
            field: "email".to_string(),
            message: "is invalid".to_string(),
        };
        let rich = enrich_error(err, "customers", "cus_1");

        assert_eq!(rich.code(), ErrorCode::ValidationError);
        assert!(rich.suggestions().iter().any(|s| s.contains("'email'")));
    }

    #[test]
    fn test_api_statuses_map_to_codes() {
        assert_eq!(
            enrich_error(api_error(409, "conflict"), "orders", "1").code(),
            ErrorCode::Conflict
        );
        for status in [500, 502, 503] {
            assert_eq!(
                enrich_error(api_error(status, "boom"), "orders", "1").code(),
                ErrorCode::ServerError
            );
        }
        let rich = enrich_error(api_error(504, "timeout"), "orders", "1");
        assert_eq!(rich.code(), ErrorCode::Http(504));
        assert_eq!(rich.code().to_string(), "HTTP_504");
    }

    #[test]
    fn test_other_errors_are_unknown_without_suggestions() {
        let rich = enrich_error(HttpError::CircuitOpen, "orders", "");
        assert_eq!(rich.code(), ErrorCode::Unknown);
        assert!(rich.suggestions().is_empty());
        assert_eq!(format_rich_error(&rich), rich.message());
    }

    #[test]
    fn test_empty_api_message_gets_fallback() {
        let rich = enrich_error(api_error(404, ""), "orders", "1");
        assert_eq!(rich.message(), "orders request failed (NOT_FOUND)");
    }

    #[test]
    fn test_cause_is_preserved() {
        let rich = enrich_error(api_error(404, "order not found"), "orders", "1");

        let source = rich.source().unwrap();
        assert_eq!(source.to_string(), "order not found");
        assert!(matches!(rich.cause(), Some(HttpError::Api(e)) if e.status == 404));
        assert!(matches!(rich.into_cause(), Some(HttpError::Api(_))));
    }

    #[test]
    fn test_enrich_passes_ok_through() {
        let ok: Result<u32, HttpError> = Ok(7);
        assert_eq!(ok.enrich("orders", "").unwrap(), 7);

        let err: Result<u32, HttpError> = Err(api_error(404, "missing"));
        assert_eq!(
            err.enrich("orders", "1").unwrap_err().code(),
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_enrich_optional() {
        assert!(enrich_optional(None, "orders", "").is_none());
        let rich = enrich_optional(Some(HttpError::CircuitOpen), "orders", "").unwrap();
        assert_eq!(rich.code(), ErrorCode::Unknown);
    }

    #[test]
    fn test_format_rich_error_exact_output() {
        let error = RichError::new(ErrorCode::NotFound, "Order not found")
            .with_suggestions(["Check the order ID", "Run 'spl orders list'"]);

        assert_eq!(
            format_rich_error(&error),
            "Order not found\n\nSuggestions:\n  • Check the order ID\n  • Run 'spl orders list'"
        );
    }

    #[test]
    fn test_format_rich_error_without_suggestions() {
        let error = RichError::new(ErrorCode::Unknown, "something broke");
        assert_eq!(format_rich_error(&error), "something broke");
    }

    #[test]
    fn test_format_rich_error_plain_error() {
        assert_eq!(format_rich_error(&HttpError::CircuitOpen), HttpError::CircuitOpen.to_string());
    }

    #[test]
    fn test_format_rich_error_finds_wrapped_rich_error() {
        #[derive(Debug, Error)]
        #[error("command failed")]
        struct Wrapper(#[source] RichError);

        let inner = RichError::new(ErrorCode::NotFound, "Order not found")
            .with_suggestions(["Check the order ID"]);
        let wrapped = Wrapper(inner);

        assert_eq!(
            format_rich_error(&wrapped),
            "Order not found\n\nSuggestions:\n  • Check the order ID"
        );
    }

    #[test]
    fn test_with_resource() {
        let error = RichError::new(ErrorCode::Conflict, "conflict").with_resource("orders", "o1");
        assert_eq!(error.resource(), "orders");
        assert_eq!(error.resource_id(), "o1");
        assert!(error.cause().is_none());
    }
}
