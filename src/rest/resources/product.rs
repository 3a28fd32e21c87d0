//! Product resource implementation.
//!
//! Products are listed, searched, created, edited and deleted. Titles and
//! descriptions may come back only as per-locale translations; use
//! [`Product::display_title`] and [`Product::display_description`] to get a
//! single string either way.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopline_api::rest::{Deletable, RestResource};
//! use shopline_api::rest::resources::{Product, ProductCreateRequest};
//!
//! let product = Product::create(&client, &ProductCreateRequest {
//!     title: "Canvas Tote".to_string(),
//!     status: Some("draft".to_string()),
//!     ..Default::default()
//! }).await?;
//!
//! Product::delete(&client, &product.id).await?;
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpError, RestClient};
use crate::rest::{Deletable, ListParams, ListResponse, QueryBuilder, RestResource};

use super::common::Price;

/// Locales tried, in order, when only translations are available.
const PREFERRED_LOCALES: [&str; 5] = ["en", "en-US", "zh-hant", "zh-tw", "zh-cn"];

/// A Shopline product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Product {
    /// The unique identifier of the product.
    pub id: String,
    /// Product title; may be empty when only `title_translations` is set.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Description (HTML).
    pub description: String,
    /// `active`, `draft` or `archived`.
    pub status: String,
    /// Vendor name.
    pub vendor: String,
    /// Product type.
    pub product_type: String,
    /// Tags attached to the product.
    pub tags: Vec<String>,
    /// Base price.
    pub price: Option<Price>,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Title keyed by locale.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub title_translations: BTreeMap<String, String>,
    /// Description keyed by locale.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub description_translations: BTreeMap<String, String>,
    /// When the product was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the product was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns `title`, falling back to the best available translation.
    #[must_use]
    pub fn display_title(&self) -> &str {
        pick_text(&self.title, &self.title_translations)
    }

    /// Returns `description`, falling back to the best available translation.
    #[must_use]
    pub fn display_description(&self) -> &str {
        pick_text(&self.description, &self.description_translations)
    }
}

fn pick_text<'a>(primary: &'a str, translations: &'a BTreeMap<String, String>) -> &'a str {
    if !primary.is_empty() {
        return primary;
    }
    PREFERRED_LOCALES
        .iter()
        .filter_map(|locale| translations.get(*locale))
        .chain(translations.values())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Filters for [`RestResource::all`] on products.
#[derive(Debug, Clone, Default)]
pub struct ProductListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
    /// `active`, `draft` or `archived`.
    pub status: String,
    /// Vendor name.
    pub vendor: String,
    /// Product type.
    pub product_type: String,
    /// Sort field.
    pub sort_by: String,
    /// `asc` or `desc`.
    pub sort_order: String,
}

impl ListParams for ProductListOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .int("page", self.page)
            .int("page_size", self.page_size)
            .string("status", &self.status)
            .string("vendor", &self.vendor)
            .string("product_type", &self.product_type)
            .string("sort_by", &self.sort_by)
            .string("sort_order", &self.sort_order)
    }
}

/// Filters for [`Product::search`].
#[derive(Debug, Clone, Default)]
pub struct ProductSearchOptions {
    /// Free-text query.
    pub query: String,
    /// Product status.
    pub status: String,
    /// Vendor name.
    pub vendor: String,
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
}

impl ListParams for ProductSearchOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .string("query", &self.query)
            .string("status", &self.status)
            .string("vendor", &self.vendor)
            .int("page", self.page)
            .int("page_size", self.page_size)
    }
}

/// Body of [`Product::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ProductCreateRequest {
    /// Product title.
    pub title: String,
    /// Description (HTML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Vendor name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Product type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Initial tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Initial status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of [`Product::update`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ProductUpdateRequest {
    /// Product title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description (HTML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Vendor name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Product type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Replacement tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RestResource for Product {
    const NAME: &'static str = "product";
    const PLURAL: &'static str = "products";
    type ListOptions = ProductListOptions;
}

impl Deletable for Product {}

impl Product {
    /// Searches products.
    ///
    /// Sends `GET /products/search`.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    pub async fn search(
        client: &RestClient,
        options: &ProductSearchOptions,
    ) -> Result<ListResponse<Self>, HttpError> {
        let path = format!("/products/search{}", options.to_query().build());
        client.get(&path).await
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    pub async fn create(
        client: &RestClient,
        request: &ProductCreateRequest,
    ) -> Result<Self, HttpError> {
        client.post(&Self::collection_path(), request).await
    }

    /// Edits a product.
    ///
    /// Sends `PUT /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn update(
        client: &RestClient,
        id: &str,
        request: &ProductUpdateRequest,
    ) -> Result<Self, HttpError> {
        client.put(&Self::member_path(id)?, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_deserialization_with_price() {
        let product: Product = serde_json::from_value(json!({
            "id": "prod_1",
            "title": "Canvas Tote",
            "status": "active",
            "tags": ["bags"],
            "price": {"cents": 12000, "currency_iso": "HKD", "label": "HK$120.00", "dollars": 120.0}
        }))
        .unwrap();

        assert_eq!(product.id, "prod_1");
        assert_eq!(product.price.as_ref().unwrap().cents, 12000);
        assert_eq!(product.display_title(), "Canvas Tote");
    }

    #[test]
    fn test_display_title_prefers_english_translation() {
        let product: Product = serde_json::from_value(json!({
            "id": "prod_1",
            "title_translations": {"zh-hant": "帆布袋", "en": "Canvas Tote"}
        }))
        .unwrap();
        assert_eq!(product.display_title(), "Canvas Tote");
    }

    #[test]
    fn test_display_title_falls_back_to_any_translation() {
        let product: Product = serde_json::from_value(json!({
            "id": "prod_1",
            "title_translations": {"ja": " トート "},
            "description_translations": {"fr": ""}
        }))
        .unwrap();
        assert_eq!(product.display_title(), "トート");
        assert_eq!(product.display_description(), "");
    }

    #[test]
    fn test_list_options_query() {
        let options = ProductListOptions {
            status: "active".to_string(),
            vendor: "Acme Co".to_string(),
            page_size: 20,
            ..Default::default()
        };
        assert_eq!(
            options.to_query().build(),
            "?page_size=20&status=active&vendor=Acme%20Co"
        );
    }

    #[test]
    fn test_update_request_serializes_only_set_fields() {
        let request = ProductUpdateRequest {
            title: Some("New".to_string()),
            tags: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"title": "New", "tags": []})
        );
    }
}
