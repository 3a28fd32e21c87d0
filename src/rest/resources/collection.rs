//! Collection resource implementation.
//!
//! Collections group products for storefront navigation. Besides CRUD, products
//! can be added in bulk with [`Collection::add_products`] and removed one at a
//! time with [`Collection::remove_product`].

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::clients::{HttpError, InvalidHttpRequestError, RestClient};
use crate::rest::{require_id, Deletable, ListParams, QueryBuilder, RestResource};

/// A Shopline product collection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Collection {
    /// The unique identifier of the collection.
    pub id: String,
    /// Collection title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Description (HTML).
    pub description: String,
    /// How products are ordered inside the collection.
    pub sort_order: String,
    /// Number of products in the collection.
    pub products_count: u32,
    /// Where the collection is published, e.g. `web` or `global`.
    pub published_scope: String,
    /// When the collection was published.
    pub published_at: Option<DateTime<Utc>>,
    /// When the collection was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the collection was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for [`RestResource::all`] on collections.
#[derive(Debug, Clone, Default)]
pub struct CollectionListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
    /// Title filter.
    pub title: String,
    /// Handle filter.
    pub handle: String,
    /// Publication scope.
    pub published_scope: String,
    /// Sort field.
    pub sort_by: String,
    /// `asc` or `desc`.
    pub sort_order: String,
}

impl ListParams for CollectionListOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .int("page", self.page)
            .int("page_size", self.page_size)
            .string("title", &self.title)
            .string("handle", &self.handle)
            .string("published_scope", &self.published_scope)
            .string("sort_by", &self.sort_by)
            .string("sort_order", &self.sort_order)
    }
}

/// Body of [`Collection::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CollectionCreateRequest {
    /// Collection title.
    pub title: String,
    /// URL handle; generated from the title when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Description (HTML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Product ordering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    /// Publication scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_scope: Option<String>,
    /// Products to include from the start.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub product_ids: Vec<String>,
}

/// Body of [`Collection::update`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CollectionUpdateRequest {
    /// Collection title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Description (HTML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Product ordering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    /// Publication scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_scope: Option<String>,
}

#[derive(Serialize)]
struct ProductIds<'a> {
    product_ids: &'a [String],
}

impl RestResource for Collection {
    const NAME: &'static str = "collection";
    const PLURAL: &'static str = "collections";
    type ListOptions = CollectionListOptions;
}

impl Deletable for Collection {}

impl Collection {
    /// Creates a collection.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    pub async fn create(
        client: &RestClient,
        request: &CollectionCreateRequest,
    ) -> Result<Self, HttpError> {
        client.post(&Self::collection_path(), request).await
    }

    /// Edits a collection.
    ///
    /// Sends `PUT /collections/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn update(
        client: &RestClient,
        id: &str,
        request: &CollectionUpdateRequest,
    ) -> Result<Self, HttpError> {
        client.put(&Self::member_path(id)?, request).await
    }

    /// Adds products to a collection.
    ///
    /// Sends `POST /collections/{id}/products` with `{"product_ids": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn add_products(
        client: &RestClient,
        id: &str,
        product_ids: &[String],
    ) -> Result<(), HttpError> {
        let path = format!("{}/products", Self::member_path(id)?);
        let _: IgnoredAny = client.post(&path, &ProductIds { product_ids }).await?;
        Ok(())
    }

    /// Removes one product from a collection.
    ///
    /// Sends `DELETE /collections/{id}/products/{product_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if either ID is blank, or any
    /// [`HttpError`] from the transport.
    pub async fn remove_product(
        client: &RestClient,
        id: &str,
        product_id: &str,
    ) -> Result<(), HttpError> {
        let path = Self::product_path(id, product_id)?;
        client.delete(&path).await
    }

    fn product_path(id: &str, product_id: &str) -> Result<String, InvalidHttpRequestError> {
        let collection = Self::member_path(id)?;
        let product_id = product_id.trim();
        require_id("product", product_id)?;
        Ok(format!(
            "{collection}/products/{}",
            urlencoding::encode(product_id)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_deserialization() {
        let collection: Collection = serde_json::from_value(json!({
            "id": "col_1",
            "title": "Summer",
            "handle": "summer",
            "products_count": 12,
            "published_scope": "web",
            "published_at": "2024-06-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(collection.products_count, 12);
        assert!(collection.published_at.is_some());
    }

    #[test]
    fn test_list_options_query() {
        let options = CollectionListOptions {
            handle: "summer".to_string(),
            published_scope: "web".to_string(),
            ..Default::default()
        };
        assert_eq!(
            options.to_query().build(),
            "?handle=summer&published_scope=web"
        );
    }

    #[test]
    fn test_create_request_omits_empty_product_ids() {
        let request = CollectionCreateRequest {
            title: "Summer".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"title": "Summer"}));
    }

    #[test]
    fn test_product_ids_body() {
        let ids = vec!["prod_1".to_string(), "prod_2".to_string()];
        assert_eq!(
            serde_json::to_value(ProductIds { product_ids: &ids }).unwrap(),
            json!({"product_ids": ["prod_1", "prod_2"]})
        );
    }

    #[test]
    fn test_product_path_validates_both_ids() {
        assert_eq!(
            Collection::product_path("col_1", "prod_1").unwrap(),
            "/collections/col_1/products/prod_1"
        );
        assert_eq!(
            Collection::product_path("", "prod_1").unwrap_err().to_string(),
            "collection id is required"
        );
        assert_eq!(
            Collection::product_path("col_1", " ").unwrap_err().to_string(),
            "product id is required"
        );
    }

    #[test]
    fn test_product_path_trims_padded_ids() {
        assert_eq!(
            Collection::product_path(" col_1", "prod_1 ").unwrap(),
            "/collections/col_1/products/prod_1"
        );
    }
}
