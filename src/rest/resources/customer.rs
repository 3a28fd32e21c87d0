//! Customer resource implementation.
//!
//! # Resource-Specific Operations
//!
//! - [`Customer::search`] - Search by free text, email or phone
//! - [`Customer::create`] / [`Customer::update`] - Create or edit a customer
//! - [`Customer::set_tags`] - Replace all tags
//! - [`Customer::modify_tags`] - Add and remove individual tags
//!
//! Customers can be deleted through [`Deletable::delete`](crate::rest::Deletable::delete).
//!
//! # Example
//!
//! ```rust,ignore
//! use shopline_api::rest::RestResource;
//! use shopline_api::rest::resources::{Customer, CustomerListOptions};
//!
//! let options = CustomerListOptions {
//!     accepts_marketing: Some(false),
//!     ..Default::default()
//! };
//! let page = Customer::all(&client, &options).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpError, RestClient};
use crate::rest::{Deletable, ListParams, ListResponse, QueryBuilder, RestResource};

/// A Shopline customer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Customer {
    /// The unique identifier of the customer.
    pub id: String,
    /// Email address.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub phone: String,
    /// Whether the customer opted into marketing.
    pub accepts_marketing: bool,
    /// Store credit balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_balance: Option<f64>,
    /// Number of orders placed.
    pub orders_count: u32,
    /// Lifetime spend as a decimal string.
    pub total_spent: String,
    /// Currency of `total_spent`.
    pub currency: String,
    /// Tags attached to the customer.
    pub tags: Vec<String>,
    /// Merchant note.
    pub note: String,
    /// Account state, e.g. `enabled`, `disabled`, `invited`.
    pub state: String,
    /// When the customer was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the customer was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for [`RestResource::all`] on customers.
#[derive(Debug, Clone, Default)]
pub struct CustomerListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
    /// Exact email match.
    pub email: String,
    /// Account state.
    pub state: String,
    /// Comma-separated tags.
    pub tags: String,
    /// Marketing consent; `Some(false)` filters for customers who opted out.
    pub accepts_marketing: Option<bool>,
    /// Sort field.
    pub sort_by: String,
    /// `asc` or `desc`.
    pub sort_order: String,
}

impl ListParams for CustomerListOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .int("page", self.page)
            .int("page_size", self.page_size)
            .string("email", &self.email)
            .string("state", &self.state)
            .string("tags", &self.tags)
            .bool_opt("accepts_marketing", self.accepts_marketing)
            .string("sort_by", &self.sort_by)
            .string("sort_order", &self.sort_order)
    }
}

/// Filters for [`Customer::search`].
#[derive(Debug, Clone, Default)]
pub struct CustomerSearchOptions {
    /// Free-text query.
    pub query: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
}

impl ListParams for CustomerSearchOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .string("query", &self.query)
            .string("email", &self.email)
            .string("phone", &self.phone)
            .int("page", self.page)
            .int("page_size", self.page_size)
    }
}

/// Body of [`Customer::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CustomerCreateRequest {
    /// Email address (required by the API).
    pub email: String,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Marketing consent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts_marketing: Option<bool>,
    /// Initial tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Merchant note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of [`Customer::update`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CustomerUpdateRequest {
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Marketing consent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts_marketing: Option<bool>,
    /// Replacement tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Merchant note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of [`Customer::modify_tags`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CustomerTagsUpdate {
    /// Tags to add.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<String>,
    /// Tags to remove.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}

#[derive(Serialize)]
struct Tags<'a> {
    tags: &'a [String],
}

impl RestResource for Customer {
    const NAME: &'static str = "customer";
    const PLURAL: &'static str = "customers";
    type ListOptions = CustomerListOptions;
}

impl Deletable for Customer {}

impl Customer {
    /// Searches customers.
    ///
    /// Sends `GET /customers/search`.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    pub async fn search(
        client: &RestClient,
        options: &CustomerSearchOptions,
    ) -> Result<ListResponse<Self>, HttpError> {
        let path = format!("/customers/search{}", options.to_query().build());
        client.get(&path).await
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport; a rejected field comes
    /// back as [`HttpError::Validation`].
    pub async fn create(
        client: &RestClient,
        request: &CustomerCreateRequest,
    ) -> Result<Self, HttpError> {
        client.post(&Self::collection_path(), request).await
    }

    /// Edits a customer.
    ///
    /// Sends `PUT /customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn update(
        client: &RestClient,
        id: &str,
        request: &CustomerUpdateRequest,
    ) -> Result<Self, HttpError> {
        client.put(&Self::member_path(id)?, request).await
    }

    /// Replaces all tags on a customer.
    ///
    /// Sends `PUT /customers/{id}/tags`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn set_tags(
        client: &RestClient,
        id: &str,
        tags: &[String],
    ) -> Result<Self, HttpError> {
        let path = format!("{}/tags", Self::member_path(id)?);
        client.put(&path, &Tags { tags }).await
    }

    /// Adds and removes individual tags.
    ///
    /// Sends `PATCH /customers/{id}/tags`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn modify_tags(
        client: &RestClient,
        id: &str,
        update: &CustomerTagsUpdate,
    ) -> Result<Self, HttpError> {
        let path = format!("{}/tags", Self::member_path(id)?);
        client.patch(&path, update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_deserialization() {
        let customer: Customer = serde_json::from_value(json!({
            "id": "cus_1",
            "email": "jane@example.com",
            "first_name": "Jane",
            "accepts_marketing": true,
            "orders_count": 3,
            "total_spent": "300.00",
            "tags": ["vip"],
            "state": "enabled",
            "updated_at": "2024-02-01T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(customer.id, "cus_1");
        assert!(customer.accepts_marketing);
        assert_eq!(customer.orders_count, 3);
        assert_eq!(customer.tags, vec!["vip"]);
        assert!(customer.created_at.is_none());
        assert!(customer.updated_at.is_some());
    }

    #[test]
    fn test_list_options_keep_explicit_false() {
        let options = CustomerListOptions {
            accepts_marketing: Some(false),
            state: "enabled".to_string(),
            ..Default::default()
        };
        assert_eq!(
            options.to_query().build(),
            "?accepts_marketing=false&state=enabled"
        );
    }

    #[test]
    fn test_search_options_escape_values() {
        let options = CustomerSearchOptions {
            email: "jane+1@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(options.to_query().encode(), "email=jane%2B1%40example.com");
    }

    #[test]
    fn test_create_request_serialization() {
        let request = CustomerCreateRequest {
            email: "jane@example.com".to_string(),
            accepts_marketing: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"email": "jane@example.com", "accepts_marketing": false})
        );
    }

    #[test]
    fn test_tags_update_skips_empty_lists() {
        let update = CustomerTagsUpdate {
            add: vec!["vip".to_string()],
            remove: Vec::new(),
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"add": ["vip"]}));
    }

    #[test]
    fn test_customer_member_path_rejects_blank_id() {
        assert_eq!(
            Customer::member_path("").unwrap_err().to_string(),
            "customer id is required"
        );
    }
}
