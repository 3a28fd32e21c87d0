//! Order resource implementation.
//!
//! This module provides the [`Order`] resource. Orders are completed
//! checkouts; they cannot be deleted, only cancelled or archived.
//!
//! # Resource-Specific Operations
//!
//! In addition to [`RestResource::all`] and [`RestResource::find`]:
//! - [`Order::search`] - Full-text search
//! - [`Order::archived`] - List archived orders
//! - [`Order::create`] / [`Order::update`] - Create or edit an order
//! - [`Order::cancel`] - Cancel an order
//! - [`Order::update_status`] - Move an order to another status
//! - [`Order::tags`] / [`Order::update_tags`] - Read or replace tags
//!
//! # Example
//!
//! ```rust,ignore
//! use shopline_api::rest::RestResource;
//! use shopline_api::rest::resources::{Order, OrderListOptions};
//!
//! let options = OrderListOptions {
//!     status: "open".to_string(),
//!     page_size: 50,
//!     ..Default::default()
//! };
//! let page = Order::all(&client, &options).await?;
//!
//! Order::cancel(&client, &page[0].id).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::clients::{HttpError, RestClient};
use crate::rest::{ListParams, ListResponse, QueryBuilder, RestResource};

use super::common::Address;

/// A Shopline order.
///
/// List and search endpoints return a summary; `line_items`, addresses and
/// notes are filled in by [`RestResource::find`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Order {
    /// The unique identifier of the order.
    pub id: String,
    /// Human-facing order number.
    pub order_number: String,
    /// Order status, e.g. `open`, `completed`, `cancelled`.
    pub status: String,
    /// Payment status, e.g. `pending`, `completed`, `refunded`.
    pub payment_status: String,
    /// Fulfillment status, e.g. `unfulfilled`, `fulfilled`.
    pub fulfill_status: String,
    /// Order total as a decimal string.
    pub total_price: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// The customer's email address.
    pub customer_email: String,
    /// The customer's display name.
    pub customer_name: String,
    /// The customer ID, if the order is linked to a customer.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_id: String,
    /// Purchased items.
    pub line_items: Vec<OrderLineItem>,
    /// Merchant note.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    /// Tags attached to the order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Where the order ships to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    /// Billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    /// When the order was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the order was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A purchased item on an order.
///
/// Price fields come back as numbers, strings or money objects depending on
/// the endpoint, so they are kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OrderLineItem {
    /// Line item ID.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Product ID.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product_id: String,
    /// Variant ID.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub variant_id: String,
    /// Stock keeping unit.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sku: String,
    /// Product title at time of purchase.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Quantity purchased.
    pub quantity: u32,
    /// Unit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<serde_json::Value>,
    /// Line total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<serde_json::Value>,
    /// Currency of `price` and `total`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub currency: String,
}

/// Filters for [`RestResource::all`] on orders.
#[derive(Debug, Clone, Default)]
pub struct OrderListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
    /// Only orders with this status.
    pub status: String,
    /// Created at or after.
    pub since: Option<DateTime<Utc>>,
    /// Created at or before.
    pub until: Option<DateTime<Utc>>,
    /// Sort field, e.g. `created_at`.
    pub sort_by: String,
    /// `asc` or `desc`.
    pub sort_order: String,
}

impl ListParams for OrderListOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .int("page", self.page)
            .int("page_size", self.page_size)
            .string("status", &self.status)
            .time("created_at_min", self.since)
            .time("created_at_max", self.until)
            .string("sort_by", &self.sort_by)
            .string("sort_order", &self.sort_order)
    }
}

/// Filters for [`Order::search`].
#[derive(Debug, Clone, Default)]
pub struct OrderSearchOptions {
    /// Free-text query (order number, email, name).
    pub query: String,
    /// Only orders with this status.
    pub status: String,
    /// Created at or after.
    pub since: Option<DateTime<Utc>>,
    /// Created at or before.
    pub until: Option<DateTime<Utc>>,
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
}

impl ListParams for OrderSearchOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .string("query", &self.query)
            .string("status", &self.status)
            .time("created_at_min", self.since)
            .time("created_at_max", self.until)
            .int("page", self.page)
            .int("page_size", self.page_size)
    }
}

/// Filters for [`Order::archived`].
#[derive(Debug, Clone, Default)]
pub struct ArchivedOrderListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
    /// Created at or after.
    pub since: Option<DateTime<Utc>>,
    /// Created at or before.
    pub until: Option<DateTime<Utc>>,
}

impl ListParams for ArchivedOrderListOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .int("page", self.page)
            .int("page_size", self.page_size)
            .time("created_at_min", self.since)
            .time("created_at_max", self.until)
    }
}

/// An item on a new order.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct OrderItem {
    /// Product to order.
    pub product_id: String,
    /// Specific variation of the product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<String>,
    /// Quantity to order.
    pub quantity: u32,
    /// Unit price override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Body of [`Order::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct OrderCreateRequest {
    /// Existing customer to attach the order to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Email for guest orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Items to order.
    pub line_items: Vec<OrderItem>,
    /// Where to ship.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    /// Billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    /// Merchant note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Tags to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body of [`Order::update`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct OrderUpdateRequest {
    /// Replacement note; `Some("")` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Replacement tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Replacement shipping address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    /// Replacement billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: &'a str,
}

#[derive(Serialize, Deserialize)]
struct Tags {
    #[serde(default)]
    tags: Vec<String>,
}

impl RestResource for Order {
    const NAME: &'static str = "order";
    const PLURAL: &'static str = "orders";
    type ListOptions = OrderListOptions;
}

impl Order {
    /// Searches orders.
    ///
    /// Sends `GET /orders/search`.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    pub async fn search(
        client: &RestClient,
        options: &OrderSearchOptions,
    ) -> Result<ListResponse<Self>, HttpError> {
        let path = format!("/orders/search{}", options.to_query().build());
        client.get(&path).await
    }

    /// Lists archived orders.
    ///
    /// Sends `GET /orders/archived`.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    pub async fn archived(
        client: &RestClient,
        options: &ArchivedOrderListOptions,
    ) -> Result<ListResponse<Self>, HttpError> {
        let path = format!("/orders/archived{}", options.to_query().build());
        client.get(&path).await
    }

    /// Creates an order.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = OrderCreateRequest {
    ///     customer_email: Some("jane@example.com".to_string()),
    ///     line_items: vec![OrderItem {
    ///         product_id: "prod_1".to_string(),
    ///         quantity: 2,
    ///         ..Default::default()
    ///     }],
    ///     ..Default::default()
    /// };
    /// let order = Order::create(&client, &request).await?;
    /// ```
    pub async fn create(
        client: &RestClient,
        request: &OrderCreateRequest,
    ) -> Result<Self, HttpError> {
        client.post(&Self::collection_path(), request).await
    }

    /// Edits an order.
    ///
    /// Sends `PATCH /orders/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn update(
        client: &RestClient,
        id: &str,
        request: &OrderUpdateRequest,
    ) -> Result<Self, HttpError> {
        client.patch(&Self::member_path(id)?, request).await
    }

    /// Cancels an order.
    ///
    /// Sends `PATCH /orders/{id}/cancel` without a body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn cancel(client: &RestClient, id: &str) -> Result<(), HttpError> {
        let path = format!("{}/cancel", Self::member_path(id)?);
        let _: IgnoredAny = client.patch(&path, &()).await?;
        Ok(())
    }

    /// Moves an order to `status`.
    ///
    /// Sends `PATCH /orders/{id}/status`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn update_status(
        client: &RestClient,
        id: &str,
        status: &str,
    ) -> Result<Self, HttpError> {
        let path = format!("{}/status", Self::member_path(id)?);
        client.patch(&path, &StatusUpdate { status }).await
    }

    /// Returns the tags on an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn tags(client: &RestClient, id: &str) -> Result<Vec<String>, HttpError> {
        let path = format!("{}/tags", Self::member_path(id)?);
        let response: Tags = client.get(&path).await?;
        Ok(response.tags)
    }

    /// Replaces the tags on an order.
    ///
    /// Sends `PUT /orders/{id}/tags`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn update_tags(
        client: &RestClient,
        id: &str,
        tags: &[String],
    ) -> Result<Self, HttpError> {
        let path = format!("{}/tags", Self::member_path(id)?);
        let body = Tags {
            tags: tags.to_vec(),
        };
        client.put(&path, &body).await
    }
}
