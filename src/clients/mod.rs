//! HTTP client types for Shopline API communication.
//!
//! This module provides the transport layer for making authenticated
//! requests to the Shopline API. It handles request validation, retries,
//! rate limiting, the circuit breaker and error classification.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`HttpError`]: Every failure the transport can produce
//! - [`rest::RestClient`]: Typed REST client built on the HTTP client
//!
//! # Retry Behavior
//!
//! Each request is attempted at most [`MAX_ATTEMPTS`] times:
//!
//! - **Network errors**: idempotent methods (GET, PUT, DELETE) retry with
//!   exponential backoff, within the configured retry budget
//! - **429 (Rate Limited)**: GET retries after `Retry-After` (1 second if
//!   absent) plus up to one second of jitter; other methods fail with
//!   [`HttpError::RateLimit`]
//! - **5xx (Server Error)**: GET retries after 1 second; every 5xx counts
//!   towards the circuit breaker
//! - **Other 4xx**: returned immediately
//!
//! After [`CIRCUIT_THRESHOLD`] consecutive server failures the circuit opens
//! and requests fail with [`HttpError::CircuitOpen`] for [`CIRCUIT_COOLDOWN`].

mod circuit;
mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use circuit::{CircuitBreaker, CIRCUIT_COOLDOWN, CIRCUIT_THRESHOLD};
pub use errors::{ApiError, HttpError, InvalidHttpRequestError};
pub(crate) use errors::wait_seconds;
pub use http_client::{HttpClient, MAX_ATTEMPTS, SDK_VERSION, SERVER_ERROR_RETRY_DELAY};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{parse_retry_after, HttpResponse, DEFAULT_RETRY_AFTER};

pub use rest::RestClient;
