//! # Shopline API Rust Client
//!
//! A typed Rust client for the Shopline e-commerce REST API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ShoplineConfig`] and [`ShoplineConfigBuilder`]
//! - Validated newtypes for access tokens, store handles and URLs
//! - An async HTTP client with retries, rate limit handling and a circuit breaker
//! - A typed [`RestClient`] and resource wrappers for orders, customers,
//!   products, collections, promotions, disputes and themes
//! - A [`QueryBuilder`](rest::QueryBuilder) for optional list filters
//! - Error enrichment: classified [`RichError`](rest::RichError)s with
//!   remediation suggestions
//!
//! ## Quick Start
//!
//! ```rust
//! use shopline_api::{AccessToken, ShoplineConfig};
//!
//! let config = ShoplineConfig::builder()
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://open.shopline.io/v1");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use shopline_api::{AccessToken, RestClient, ShoplineConfig};
//! use shopline_api::rest::{format_rich_error, EnrichResultExt, RestResource};
//! use shopline_api::rest::resources::{Order, OrderListOptions};
//!
//! let config = ShoplineConfig::builder()
//!     .access_token(AccessToken::new("your-access-token")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let options = OrderListOptions {
//!     status: "open".to_string(),
//!     page_size: 50,
//!     ..Default::default()
//! };
//!
//! match Order::all(&client, &options).await.enrich(Order::PLURAL, "") {
//!     Ok(page) => {
//!         for order in page.iter() {
//!             println!("{} {}", order.order_number, order.total_price);
//!         }
//!     }
//!     Err(e) => eprintln!("{}", format_rich_error(&e)),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events (request and
//! response at `debug`, retries, rate limiting and circuit breaker trips at
//! `warn`). It never installs a subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiMode, ApiVersion, BaseUrl, RetryConfig, ShoplineConfig,
    ShoplineConfigBuilder, StoreHandle,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, RestClient,
};
