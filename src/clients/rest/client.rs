//! REST client implementation for the Shopline API.
//!
//! This module provides the [`RestClient`] type, which wraps the transport
//! [`HttpClient`] with typed verbs: request bodies are serialized from any
//! `Serialize` value and responses are decoded into the caller's type.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::ShoplineConfig;

/// REST API client for the Shopline API.
///
/// Provides typed `get`, `post`, `put`, `patch`, `delete` and
/// `delete_with_body` methods. Paths are relative to the configured base URL
/// and must start with `/`; query strings built with
/// [`QueryBuilder`](crate::rest::QueryBuilder) are appended by the caller.
///
/// A body that serializes to `null` (such as `&()`) is not sent. Decode into
/// [`serde::de::IgnoredAny`] to discard a response body.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopline_api::{AccessToken, RestClient, ShoplineConfig};
/// use shopline_api::rest::resources::Order;
///
/// let config = ShoplineConfig::builder()
///     .access_token(AccessToken::new("token")?)
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let order: Order = client.get("/orders/ord_123").await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying HTTP client cannot be
    /// created.
    pub fn new(config: &ShoplineConfig) -> Result<Self, HttpError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
        })
    }

    /// Wraps an existing HTTP client.
    #[must_use]
    pub const fn from_http_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request and decodes the response body.
    ///
    /// # Errors
    ///
    /// Returns any transport [`HttpError`], or [`HttpError::Decode`] if the
    /// body does not match `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        self.send(HttpMethod::Get, path, None).await
    }

    /// Sends a POST request with a JSON body and decodes the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Encode`] if `body` cannot be serialized, any
    /// transport [`HttpError`], or [`HttpError::Decode`] if the response does
    /// not match `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let body = serde_json::json!({"product_ids": ["prod_1", "prod_2"]});
    /// let _: serde_json::Value = client.post("/collections/col_1/products", &body).await?;
    /// ```
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.send(HttpMethod::Post, path, Some(body)).await
    }

    /// Sends a PUT request with a JSON body and decodes the response body.
    ///
    /// # Errors
    ///
    /// Same as [`post`](Self::post).
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.send(HttpMethod::Put, path, Some(body)).await
    }

    /// Sends a PATCH request with a JSON body and decodes the response body.
    ///
    /// # Errors
    ///
    /// Same as [`post`](Self::post).
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.send(HttpMethod::Patch, path, Some(body)).await
    }

    /// Sends a DELETE request, discarding any response body.
    ///
    /// # Errors
    ///
    /// Returns any transport [`HttpError`].
    pub async fn delete(&self, path: &str) -> Result<(), HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path).build()?;
        self.http_client.request(request).await?;
        Ok(())
    }

    /// Sends a DELETE request with a JSON body and decodes the response body.
    ///
    /// # Errors
    ///
    /// Same as [`post`](Self::post).
    pub async fn delete_with_body<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.send(HttpMethod::Delete, path, Some(body)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, HttpError> {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(body) = body.filter(|b| !b.is_null()) {
            builder = builder.body(body);
        }
        let response = self.http_client.request(builder.build()?).await?;
        serde_json::from_value(response.body).map_err(HttpError::Decode)
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, HttpError> {
    serde_json::to_value(body).map_err(HttpError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessToken;
    use std::collections::BTreeMap;

    fn config() -> ShoplineConfig {
        ShoplineConfig::builder()
            .access_token(AccessToken::new("token").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_rest_client_wraps_http_client() {
        let client = RestClient::new(&config()).unwrap();
        assert_eq!(client.http_client().base_url(), "https://open.shopline.io/v1");
        assert!(!client.http_client().is_circuit_open());
    }

    #[test]
    fn test_encode_body_serializes_structs() {
        #[derive(Serialize)]
        struct Tags<'a> {
            tags: &'a [&'a str],
        }

        let body = encode_body(&Tags { tags: &["vip", "wholesale"] }).unwrap();
        assert_eq!(body, serde_json::json!({"tags": ["vip", "wholesale"]}));
    }

    #[test]
    fn test_encode_body_reports_unserializable_values() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "tuple keys are not valid JSON object keys");

        let error = encode_body(&map).unwrap_err();
        assert!(matches!(error, HttpError::Encode(_)));
        assert!(error.to_string().starts_with("failed to marshal request body"));
    }

    #[test]
    fn test_rest_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestClient>();
    }
}
