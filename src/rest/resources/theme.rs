//! Theme resource implementation.
//!
//! Storefront themes. A store has one `main` theme and any number of
//! `unpublished` ones.

use serde::{Deserialize, Serialize};

use crate::clients::{HttpError, RestClient};
use crate::rest::{Deletable, ListParams, QueryBuilder, RestResource};

/// A storefront theme.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Theme {
    /// The unique identifier of the theme.
    pub id: String,
    /// Theme name.
    pub name: String,
    /// `main` or `unpublished`.
    pub role: String,
}

/// Filters for [`RestResource::all`] on themes.
#[derive(Debug, Clone, Default)]
pub struct ThemeListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub page_size: u32,
    /// Only themes with this role.
    pub role: String,
}

impl ListParams for ThemeListOptions {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
            .int("page", self.page)
            .int("page_size", self.page_size)
            .string("role", &self.role)
    }
}

/// Body of [`Theme::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ThemeCreateRequest {
    /// Theme name.
    pub name: String,
    /// Initial role; the API defaults to `unpublished`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Body of [`Theme::update`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ThemeUpdateRequest {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New role; setting `main` publishes the theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl RestResource for Theme {
    const NAME: &'static str = "theme";
    const PLURAL: &'static str = "themes";
    type ListOptions = ThemeListOptions;
}

impl Deletable for Theme {}

impl Theme {
    /// Creates a theme.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    pub async fn create(
        client: &RestClient,
        request: &ThemeCreateRequest,
    ) -> Result<Self, HttpError> {
        client.post(&Self::collection_path(), request).await
    }

    /// Renames or publishes a theme.
    ///
    /// Sends `PUT /themes/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    pub async fn update(
        client: &RestClient,
        id: &str,
        request: &ThemeUpdateRequest,
    ) -> Result<Self, HttpError> {
        client.put(&Self::member_path(id)?, request).await
    }
}
