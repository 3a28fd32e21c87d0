//! Promotion resource implementation.
//!
//! Promotions are discounts with a lifecycle: they are created inactive or
//! scheduled, then switched on and off with [`Promotion::activate`] and
//! [`Promotion::deactivate`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpError, RestClient};
use crate::rest::{Deletable, ListParams, ListResponse, QueryBuilder, RestResource};

/// A Shopline promotion.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Promotion {
    /// The unique identifier of the promotion.
    pub id: String,
    /// Promotion title.
    pub title: String,
    /// Description shown to shoppers.
    pub description: String,
    /// Promotion type, e.g. `coupon` or `automatic`.
    #[serde(rename = "type")]
    pub promotion_type: String,
    /// `active`, `inactive`, `scheduled` or `expired`.
    pub status: String,
    /// `percentage` or `fixed_amount`.
    pub discount_type: String,
    /// Discount percentage or amount.
    pub discount_value: f64,
    /// Minimum order amount to qualify.
    pub min_purchase: f64,
    /// Maximum number of redemptions; `0` means unlimited.
    pub usage_limit: u32,
    /// Number of redemptions so far.
    pub usage_count: u32,
    /// When the promotion starts.
    pub starts_at: Option<DateTime<Utc>>,
    /// When the promotion ends.
    pub ends_at: Option<DateTime<Utc>>,
    /// When the promotion was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the promotion was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for [`RestResource::all`] on promotions.
#[derive(Debug, Clone, Default)]
pub struct PromotionListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
    /// Promotion status.
    pub status: String,
    /// Promotion type.
    pub promotion_type: String,
}

impl ListParams for PromotionListOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .int("page", self.page)
            .int("page_size", self.page_size)
            .string("status", &self.status)
            .string("type", &self.promotion_type)
    }
}

/// Filters for [`Promotion::search`].
#[derive(Debug, Clone, Default)]
pub struct PromotionSearchOptions {
    /// Free-text query.
    pub query: String,
    /// Promotion status.
    pub status: String,
    /// Promotion type.
    pub promotion_type: String,
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
}

impl ListParams for PromotionSearchOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .string("query", &self.query)
            .string("status", &self.status)
            .string("type", &self.promotion_type)
            .int("page", self.page)
            .int("page_size", self.page_size)
    }
}

/// Body of [`Promotion::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct PromotionCreateRequest {
    /// Promotion title.
    pub title: String,
    /// Description shown to shoppers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Promotion type.
    #[serde(rename = "type")]
    pub promotion_type: String,
    /// `percentage` or `fixed_amount`.
    pub discount_type: String,
    /// Discount percentage or amount.
    pub discount_value: f64,
    /// Minimum order amount to qualify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_purchase: Option<f64>,
    /// Maximum number of redemptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    /// When the promotion starts.
    pub starts_at: DateTime<Utc>,
    /// When the promotion ends; open-ended when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

/// Body of [`Promotion::update`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct PromotionUpdateRequest {
    /// Promotion title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description shown to shoppers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Promotion type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub promotion_type: Option<String>,
    /// `percentage` or `fixed_amount`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<String>,
    /// Discount percentage or amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<f64>,
    /// Minimum order amount to qualify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_purchase: Option<f64>,
    /// Maximum number of redemptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    /// When the promotion starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    /// When the promotion ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

impl RestResource for Promotion {
    const NAME: &'static str = "promotion";
    const PLURAL: &'static str = "promotions";
    type ListOptions = PromotionListOptions;
}

impl Deletable for Promotion {}

impl Promotion {
    /// Searches promotions.
    ///
    /// Sends `GET /promotions/search`.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    pub async fn search(
        client: &RestClient,
        options: &PromotionSearchOptions,
    ) -> Result<ListResponse<Self>, HttpError> {
        let path = format!("/promotions/search{}", options.to_query().build());
        client.get(&path).await
    }

    /// Creates a promotion.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    pub async fn create(
        client: &RestClient,
        request: &PromotionCreateRequest,
    ) -> Result<Self, HttpError> {
        client.post(&Self::collection_path(), request).await
    }

    /// Edits a promotion.
    ///
    /// Sends `PUT /promotions/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn update(
        client: &RestClient,
        id: &str,
        request: &PromotionUpdateRequest,
    ) -> Result<Self, HttpError> {
        client.put(&Self::member_path(id)?, request).await
    }

    /// Activates a promotion.
    ///
    /// Sends `POST /promotions/{id}/activate` without a body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn activate(client: &RestClient, id: &str) -> Result<Self, HttpError> {
        Self::transition(client, id, "activate").await
    }

    /// Deactivates a promotion.
    ///
    /// Sends `POST /promotions/{id}/deactivate` without a body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn deactivate(client: &RestClient, id: &str) -> Result<Self, HttpError> {
        Self::transition(client, id, "deactivate").await
    }

    async fn transition(client: &RestClient, id: &str, action: &str) -> Result<Self, HttpError> {
        let path = format!("{}/{action}", Self::member_path(id)?);
        client.post(&path, &()).await
    }
}
