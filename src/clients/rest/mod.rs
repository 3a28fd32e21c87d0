//! Typed REST client for the Shopline API.
//!
//! [`RestClient`] sits on top of the [`HttpClient`](crate::clients::HttpClient)
//! and turns the transport's raw JSON into caller types. Resource wrappers in
//! [`crate::rest::resources`] are thin functions over its verbs.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopline_api::{AccessToken, RestClient, ShoplineConfig};
//! use shopline_api::rest::QueryBuilder;
//!
//! let config = ShoplineConfig::builder()
//!     .access_token(AccessToken::new("token")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let query = QueryBuilder::new().int("page", 2).string("status", "open");
//! let page: serde_json::Value = client.get(&format!("/orders{}", query.build())).await?;
//! ```
//!
//! # Errors
//!
//! Every verb returns [`HttpError`](crate::clients::HttpError). Wrap results
//! with [`EnrichResultExt::enrich`](crate::rest::EnrichResultExt::enrich) to
//! get remediation suggestions.

mod client;

pub use client::RestClient;
