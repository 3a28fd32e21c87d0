//! REST resource layer for the Shopline API.
//!
//! This module provides:
//!
//! - **[`QueryBuilder`]**: Builds query strings from optional filters, skipping unset values
//! - **[`RestResource`] / [`Deletable`]**: Shared `all`, `find` and `delete` operations
//! - **[`ListResponse<T>`]**: The paginated envelope returned by list and search endpoints
//! - **[`RichError`]**: Classified errors with remediation suggestions
//! - **[`resources`]**: Orders, customers, products, collections, promotions, disputes and themes
//!
//! # Example
//!
//! ```rust,ignore
//! use shopline_api::rest::{format_rich_error, EnrichResultExt, RestResource};
//! use shopline_api::rest::resources::Order;
//!
//! match Order::find(&client, "ord_123").await.enrich(Order::PLURAL, "ord_123") {
//!     Ok(order) => println!("{} {}", order.order_number, order.status),
//!     Err(e) => eprintln!("{}", format_rich_error(&e)),
//! }
//! ```

mod errors;
mod query;
mod resource;
mod response;

pub mod resources;

pub use errors::{
    enrich_error, enrich_optional, format_rich_error, EnrichResultExt, ErrorCode, RichError,
};
pub use query::QueryBuilder;
pub use resource::{require_id, Deletable, ListParams, RestResource};
pub use response::ListResponse;
