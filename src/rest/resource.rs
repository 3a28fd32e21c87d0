//! REST resource traits shared by every resource wrapper.
//!
//! A resource implements [`RestResource`] to gain `all()` and `find()`, and
//! [`Deletable`] when the API allows deleting it. Everything else (create,
//! update, state transitions, search) is an inherent function on the
//! resource type, built from [`RestResource::collection_path`],
//! [`RestResource::member_path`] and the [`RestClient`] verbs.
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use serde::{Deserialize, Serialize};
//! use shopline_api::rest::{ListParams, QueryBuilder, RestResource};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Theme {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! pub struct ThemeListOptions {
//!     pub page: u32,
//! }
//!
//! impl ListParams for ThemeListOptions {
//!     fn to_query(&self) -> QueryBuilder {
//!         QueryBuilder::new().int("page", self.page)
//!     }
//! }
//!
//! impl RestResource for Theme {
//!     const NAME: &'static str = "theme";
//!     const PLURAL: &'static str = "themes";
//!     type ListOptions = ThemeListOptions;
//! }
//!
//! let theme = Theme::find(&client, "thm_123").await?;
//! ```

use serde::de::DeserializeOwned;

use crate::clients::{HttpError, InvalidHttpRequestError, RestClient};
use crate::rest::{ListResponse, QueryBuilder};

/// Filters and pagination for a list endpoint.
pub trait ListParams {
    /// Renders the set fields as query parameters.
    fn to_query(&self) -> QueryBuilder;
}

impl ListParams for () {
    fn to_query(&self) -> QueryBuilder {
        QueryBuilder::new()
    }
}

/// Rejects blank IDs before they turn into a request for the collection path.
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::EmptyId`] if `id` is empty or only
/// whitespace.
pub fn require_id(resource: &'static str, id: &str) -> Result<(), InvalidHttpRequestError> {
    if id.trim().is_empty() {
        return Err(InvalidHttpRequestError::EmptyId { resource });
    }
    Ok(())
}

/// A Shopline REST resource addressed as `/{PLURAL}` and `/{PLURAL}/{id}`.
///
/// Errors from the default methods are plain [`HttpError`]s; pass
/// [`Self::PLURAL`] to [`EnrichResultExt::enrich`](crate::rest::EnrichResultExt::enrich)
/// to attach suggestions.
#[allow(async_fn_in_trait)]
pub trait RestResource: DeserializeOwned + Send + Sync + Sized {
    /// Singular name used in validation messages (e.g., "order").
    const NAME: &'static str;

    /// Plural name used as the path segment (e.g., "orders").
    const PLURAL: &'static str;

    /// Filters accepted by [`all`](Self::all).
    type ListOptions: ListParams + Sync;

    /// Returns the collection path, e.g. `/orders`.
    #[must_use]
    fn collection_path() -> String {
        format!("/{}", Self::PLURAL)
    }

    /// Returns the path of one resource, e.g. `/orders/ord_123`.
    ///
    /// Surrounding whitespace is stripped from `id` before it is encoded.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyId`] for a blank `id`.
    fn member_path(id: &str) -> Result<String, InvalidHttpRequestError> {
        let id = id.trim();
        require_id(Self::NAME, id)?;
        Ok(format!("/{}/{}", Self::PLURAL, urlencoding::encode(id)))
    }

    /// Lists one page of resources.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the transport.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let options = OrderListOptions { status: "open".into(), ..Default::default() };
    /// let page = Order::all(&client, &options).await?;
    /// println!("{} of {}", page.len(), page.total_count);
    /// ```
    async fn all(
        client: &RestClient,
        options: &Self::ListOptions,
    ) -> Result<ListResponse<Self>, HttpError> {
        let path = format!("{}{}", Self::collection_path(), options.to_query().build());
        client.get(&path).await
    }

    /// Fetches a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    async fn find(client: &RestClient, id: &str) -> Result<Self, HttpError> {
        let path = Self::member_path(id)?;
        client.get(&path).await
    }
}

/// A resource the API allows deleting.
#[allow(async_fn_in_trait)]
pub trait Deletable: RestResource {
    /// Deletes the resource with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] for a blank `id`, or any
    /// [`HttpError`] from the transport.
    async fn delete(client: &RestClient, id: &str) -> Result<(), HttpError> {
        let path = Self::member_path(id)?;
        client.delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Widget {
        #[allow(dead_code)]
        id: String,
    }

    #[derive(Default)]
    struct WidgetListOptions {
        page: u32,
        color: String,
    }

    impl ListParams for WidgetListOptions {
        fn to_query(&self) -> QueryBuilder {
            QueryBuilder::new()
                .int("page", self.page)
                .string("color", &self.color)
        }
    }

    impl RestResource for Widget {
        const NAME: &'static str = "widget";
        const PLURAL: &'static str = "widgets";
        type ListOptions = WidgetListOptions;
    }

    #[test]
    fn test_collection_and_member_paths() {
        assert_eq!(Widget::collection_path(), "/widgets");
        assert_eq!(Widget::member_path("w_1").unwrap(), "/widgets/w_1");
    }

    #[test]
    fn test_member_path_escapes_id() {
        assert_eq!(Widget::member_path("a/b").unwrap(), "/widgets/a%2Fb");
    }

    #[test]
    fn test_blank_ids_are_rejected() {
        for id in ["", "   ", "\t"] {
            let error = Widget::member_path(id).unwrap_err();
            assert_eq!(error, InvalidHttpRequestError::EmptyId { resource: "widget" });
            assert_eq!(error.to_string(), "widget id is required");
        }
    }

    #[test]
    fn test_find_rejects_blank_id_without_sending() {
        let config = crate::ShoplineConfig::builder()
            .access_token(crate::AccessToken::new("token").unwrap())
            .build()
            .unwrap();
        let client = RestClient::new(&config).unwrap();

        let error = tokio_test::block_on(Widget::find(&client, " ")).unwrap_err();
        assert!(matches!(
            error,
            HttpError::InvalidRequest(InvalidHttpRequestError::EmptyId { resource: "widget" })
        ));
    }

    #[test]
    fn test_member_path_trims_padded_ids() {
        assert!(require_id("order", " ord_1 ").is_ok());
        assert_eq!(Widget::member_path(" w_1 ").unwrap(), "/widgets/w_1");
        assert_eq!(Widget::member_path("\tw_1\n").unwrap(), "/widgets/w_1");
    }

    #[test]
    fn test_list_params_render_query() {
        let options = WidgetListOptions {
            page: 2,
            ..Default::default()
        };
        assert_eq!(options.to_query().build(), "?page=2");
        assert_eq!(().to_query().build(), "");
    }
}
