//! HTTP request types for the Shopline API client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Shopline API.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Shopline REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partial updates and state transitions.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that have no side effects.
    ///
    /// Only safe methods are retried after a 429 or a 5xx response, since
    /// the server may already have applied a non-safe request.
    #[must_use]
    pub const fn is_safe(self) -> bool {
        matches!(self, Self::Get)
    }

    /// Returns `true` for methods that can be repeated without changing the
    /// outcome. These are retried after network errors.
    #[must_use]
    pub const fn is_idempotent(self) -> bool {
        matches!(self, Self::Get | Self::Put | Self::Delete)
    }

    const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        method.as_reqwest()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// An HTTP request to be sent to the Shopline API.
///
/// The path is relative to the configured base URL and may carry a query
/// string produced by [`QueryBuilder::build`](crate::rest::QueryBuilder::build).
///
/// # Example
///
/// ```rust
/// use shopline_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "/orders?page=2")
///     .build()
///     .unwrap();
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "/customers")
///     .body(json!({"email": "jane@example.com"}))
///     .build()
///     .unwrap();
///
/// assert!(HttpRequest::builder(HttpMethod::Get, "orders").build().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the base URL), including any query string.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidPath`] if the path is empty
    /// or does not start with `/`.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.path.starts_with('/') {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }
        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            extra_headers: None,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_sets_body_and_headers() {
        let request = HttpRequest::builder(HttpMethod::Patch, "/orders/ord_1/cancel")
            .body(json!({"reason": "customer"}))
            .header("X-Request-Source", "test")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Patch);
        assert_eq!(request.path, "/orders/ord_1/cancel");
        assert_eq!(request.body, Some(json!({"reason": "customer"})));
        assert_eq!(
            request
                .extra_headers
                .as_ref()
                .and_then(|h| h.get("X-Request-Source")),
            Some(&"test".to_string())
        );
    }

    #[test]
    fn test_builder_rejects_relative_and_empty_paths() {
        for path in ["", "orders", "https://open.shopline.io/v1/orders"] {
            let result = HttpRequest::builder(HttpMethod::Get, path).build();
            assert!(
                matches!(result, Err(InvalidHttpRequestError::InvalidPath { .. })),
                "path {path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_method_classification() {
        assert!(HttpMethod::Get.is_safe());
        assert!(!HttpMethod::Put.is_safe());
        assert!(HttpMethod::Put.is_idempotent());
        assert!(HttpMethod::Delete.is_idempotent());
        assert!(!HttpMethod::Post.is_idempotent());
        assert!(!HttpMethod::Patch.is_idempotent());
    }

    #[test]
    fn test_method_display_and_conversion() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(reqwest::Method::from(HttpMethod::Delete), reqwest::Method::DELETE);
    }
}
