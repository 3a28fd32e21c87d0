//! HTTP response types for the Shopline API client.
//!
//! This module provides the [`HttpResponse`] type along with the helpers
//! that turn a non-2xx status and body into a typed [`HttpError`].

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::clients::errors::{ApiError, HttpError};

/// Wait used when a 429 carries no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Maximum number of characters of a raw error body quoted in a message.
const SNIPPET_CHARS: usize = 200;

/// A successful HTTP response from the Shopline API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed JSON body, `null` for empty and 204 responses.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }
}

/// Parses a `Retry-After` header value.
///
/// Accepts delta-seconds (`"30"`) or an HTTP date
/// (`"Wed, 21 Oct 2015 07:28:00 GMT"`), measured against `now`. A date in the
/// past yields zero. Missing or unparseable values yield one second.
#[must_use]
pub fn parse_retry_after(value: Option<&str>, now: DateTime<Utc>) -> Duration {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return DEFAULT_RETRY_AFTER;
    };

    if let Ok(seconds) = value.parse::<i64>() {
        return Duration::from_secs(u64::try_from(seconds).unwrap_or(0));
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        let until = date.with_timezone(&Utc) - now;
        return until.to_std().unwrap_or(Duration::ZERO);
    }

    DEFAULT_RETRY_AFTER
}

/// Builds the error for a 5xx response.
pub(crate) fn server_error(status: u16, raw_body: &str) -> HttpError {
    HttpError::Api(fallback_api_error(status, raw_body))
}

/// Classifies a 4xx response (other than 429) into a typed error.
pub(crate) fn client_error(status: u16, raw_body: &str) -> HttpError {
    #[derive(Deserialize)]
    struct FieldError {
        field: String,
        #[serde(default)]
        message: String,
    }

    if status == 422 {
        if let Ok(FieldError { field, message }) = serde_json::from_str(raw_body) {
            return HttpError::Validation { field, message };
        }
    }

    let api_error = match serde_json::from_str::<ApiError>(raw_body) {
        Ok(mut decoded) => {
            decoded.status = status;
            decoded
        }
        Err(_) => fallback_api_error(status, raw_body),
    };

    if status == 401 {
        return HttpError::Auth {
            reason: api_error.message,
        };
    }

    HttpError::Api(api_error)
}

/// Status text followed by a short, non-HTML excerpt of the body.
fn fallback_api_error(status: u16, raw_body: &str) -> ApiError {
    let mut message = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
        .to_string();

    let is_html = raw_body.contains("<html") || raw_body.contains("<HTML");
    if !raw_body.is_empty() && !is_html {
        let mut snippet: String = raw_body.chars().take(SNIPPET_CHARS).collect();
        if raw_body.chars().nth(SNIPPET_CHARS).is_some() {
            snippet.push_str("...");
        }
        message.push_str(": ");
        message.push_str(&snippet);
    }

    ApiError {
        code: format!("HTTP_{status}"),
        message,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 10, 21, 7, 27, 30).unwrap()
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx_only() {
        for code in 200..=299 {
            assert!(HttpResponse::new(code, HashMap::new(), json!(null)).is_ok());
        }
        for code in [301, 400, 404, 429, 500] {
            assert!(!HttpResponse::new(code, HashMap::new(), json!(null)).is_ok());
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-123".to_string()]);
        let response = HttpResponse::new(200, headers, json!({}));

        assert_eq!(response.request_id(), Some("req-123"));
        assert_eq!(response.header("X-Request-Id"), Some("req-123"));
        assert_eq!(response.header("retry-after"), None);
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        assert_eq!(parse_retry_after(Some("30"), now()), Duration::from_secs(30));
        assert_eq!(parse_retry_after(Some(" 0 "), now()), Duration::ZERO);
        assert_eq!(parse_retry_after(Some("-5"), now()), Duration::ZERO);
    }

    #[test]
    fn test_parse_retry_after_http_date() {
        let value = Some("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(value, now()), Duration::from_secs(30));

        let past = Some("Wed, 21 Oct 2015 07:00:00 GMT");
        assert_eq!(parse_retry_after(past, now()), Duration::ZERO);
    }

    #[test]
    fn test_parse_retry_after_defaults_to_one_second() {
        assert_eq!(parse_retry_after(None, now()), DEFAULT_RETRY_AFTER);
        assert_eq!(parse_retry_after(Some(""), now()), DEFAULT_RETRY_AFTER);
        assert_eq!(parse_retry_after(Some("soon"), now()), DEFAULT_RETRY_AFTER);
    }

    #[test]
    fn test_client_error_decodes_api_error_body() {
        let error = client_error(404, r#"{"code":"not_found","message":"order not found"}"#);
        match error {
            HttpError::Api(e) => {
                assert_eq!(e.code, "not_found");
                assert_eq!(e.message, "order not found");
                assert_eq!(e.status, 404);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_client_error_falls_back_to_status_text_and_snippet() {
        match client_error(400, "bad things happened") {
            HttpError::Api(e) => {
                assert_eq!(e.code, "HTTP_400");
                assert_eq!(e.message, "Bad Request: bad things happened");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        match client_error(404, "") {
            HttpError::Api(e) => assert_eq!(e.message, "Not Found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_client_error_maps_401_to_auth() {
        let error = client_error(401, r#"{"code":"unauthorized","message":"token expired"}"#);
        assert!(matches!(error, HttpError::Auth { reason } if reason == "token expired"));

        let error = client_error(401, "<html>denied</html>");
        assert!(matches!(error, HttpError::Auth { reason } if reason == "Unauthorized"));
    }

    #[test]
    fn test_client_error_maps_422_with_field_to_validation() {
        let error = client_error(422, r#"{"field":"email","message":"is invalid"}"#);
        assert!(matches!(
            error,
            HttpError::Validation { field, message } if field == "email" && message == "is invalid"
        ));

        let error = client_error(422, r#"{"code":"invalid","message":"bad state"}"#);
        assert!(matches!(error, HttpError::Api(e) if e.status == 422));
    }

    #[test]
    fn test_server_error_truncates_snippet_and_hides_html() {
        let long_body = "x".repeat(250);
        match server_error(503, &long_body) {
            HttpError::Api(e) => {
                assert_eq!(e.code, "HTTP_503");
                assert_eq!(
                    e.message,
                    format!("Service Unavailable: {}...", "x".repeat(200))
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }

        match server_error(502, "<HTML><body>gateway</body></HTML>") {
            HttpError::Api(e) => assert_eq!(e.message, "Bad Gateway"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
