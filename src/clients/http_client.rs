//! HTTP client for Shopline API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Shopline API with retries and a circuit breaker.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use rand::Rng;

use crate::clients::circuit::CircuitBreaker;
use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::{client_error, parse_retry_after, server_error, HttpResponse};
use crate::config::{RetryConfig, ShoplineConfig};

/// Maximum number of attempts per request, the first one included.
pub const MAX_ATTEMPTS: u32 = 3;

/// Fixed wait before retrying a GET that hit a 5xx response.
pub const SERVER_ERROR_RETRY_DELAY: Duration = Duration::from_secs(1);

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Shopline API.
///
/// The client handles:
/// - Base URL resolution from the configured API mode
/// - Default headers including User-Agent and both access token headers
/// - Retries for network errors, 429 and 5xx responses
/// - A circuit breaker that stops traffic after repeated server failures
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. The circuit breaker state is shared by all
/// requests made through the same client.
///
/// # Example
///
/// ```rust,ignore
/// use shopline_api::{AccessToken, ShoplineConfig};
/// use shopline_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ShoplineConfig::builder()
///     .access_token(AccessToken::new("token")?)
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/orders").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://open.shopline.io/v1`), without trailing slash.
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Backoff settings for network errors.
    retry: RetryConfig,
    /// Shared consecutive-failure tracker.
    circuit: CircuitBreaker,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ShoplineConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Shopline API Library v{SDK_VERSION} | Rust {rust_version}");

        let token = config.access_token().as_ref();
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        default_headers.insert("X-Shopline-Access-Token".to_string(), token.to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            default_headers,
            retry: config.retry().clone(),
            circuit: CircuitBreaker::default(),
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns `true` while the circuit breaker rejects requests.
    #[must_use]
    pub fn is_circuit_open(&self) -> bool {
        self.circuit.is_open()
    }

    /// Sends an HTTP request to the Shopline API.
    ///
    /// Up to [`MAX_ATTEMPTS`] attempts are made:
    /// - network errors on idempotent methods back off per [`RetryConfig`],
    ///   as long as the retry budget allows
    /// - 429 on GET waits for `Retry-After` plus up to one second of jitter
    /// - 5xx on GET waits one second and counts towards the circuit breaker
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The circuit breaker is open (`CircuitOpen`)
    /// - A network error is not retried (`Network`)
    /// - The API answers 429 (`RateLimit`), 401 (`Auth`), 422 with a field
    ///   (`Validation`) or any other non-2xx status (`Api`)
    /// - A non-empty 2xx body is not JSON (`Decode`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        if self.circuit.is_open() {
            return Err(HttpError::CircuitOpen);
        }

        let method = request.http_method;
        let url = format!("{}{}", self.base_url, request.path);

        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let start = Instant::now();
        let mut attempt: u32 = 0;
        loop {
            let attempt_start = Instant::now();
            let is_last_attempt = attempt + 1 >= MAX_ATTEMPTS;
            tracing::debug!(%method, %url, attempt = attempt + 1, "api request");

            let mut req_builder = self.client.request(method.into(), &url);
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }
            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            let res = match req_builder.send().await {
                Ok(res) => res,
                Err(err) => {
                    tracing::debug!(
                        %method,
                        %url,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed_ms(attempt_start),
                        error = %err,
                        "api error"
                    );
                    if is_last_attempt || !method.is_idempotent() {
                        return Err(err.into());
                    }
                    let delay = self.retry.delay_for_attempt(attempt, random_unit());
                    if !self.retry.within_budget(start.elapsed(), delay) {
                        tracing::debug!(%method, %url, "api retry budget exceeded");
                        return Err(err.into());
                    }
                    tracing::warn!(%method, %url, ?delay, "retrying after network error");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
            };

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;
            tracing::debug!(
                %method,
                %url,
                status = code,
                elapsed_ms = elapsed_ms(attempt_start),
                "api response"
            );

            if code == 429 {
                let retry_after = parse_retry_after(
                    res_headers
                        .get("retry-after")
                        .and_then(|values| values.first())
                        .map(String::as_str),
                    Utc::now(),
                );
                if method.is_safe() && !is_last_attempt {
                    let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..1000));
                    tracing::warn!(
                        %url,
                        ?retry_after,
                        "api rate limited, retrying"
                    );
                    tokio::time::sleep(retry_after + jitter).await;
                    attempt += 1;
                    continue;
                }
                return Err(HttpError::RateLimit { retry_after });
            }

            if code >= 500 {
                self.circuit.record_failure();
                if method.is_safe() && !is_last_attempt {
                    tracing::warn!(%url, status = code, attempt = attempt + 1, "api server error, retrying");
                    tokio::time::sleep(SERVER_ERROR_RETRY_DELAY).await;
                    attempt += 1;
                    continue;
                }
                return Err(server_error(code, &body_text));
            }

            self.circuit.record_success();

            if code >= 400 {
                return Err(client_error(code, &body_text));
            }

            let body = if code == 204 || body_text.trim().is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_str(&body_text).map_err(HttpError::Decode)?
            };

            return Ok(HttpResponse::new(code, res_headers, body));
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// A uniform sample in `[-1, 1]` for backoff jitter.
fn random_unit() -> f64 {
    rand::thread_rng().gen_range(-1.0..=1.0)
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
