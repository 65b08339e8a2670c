//! HTTP remote repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use url::Url;

use catalog_core::product::Product;
use catalog_core::storage::{
    status_code_to_repository_error, ProductRepository, RepositoryError, Result, TransportError,
};

const ENTITY_TYPE: &str = "Product";

/// Remote product source backed by a JSON HTTP API.
///
/// | operation | request                      |
/// |-----------|------------------------------|
/// | get       | `GET {base}/products/{id}`   |
/// | list      | `GET {base}/products`        |
/// | create    | `POST {base}/products`       |
/// | update    | `PUT {base}/products/{id}`   |
/// | delete    | `DELETE {base}/products/{id}`|
#[derive(Debug, Clone)]
pub struct HttpProductRepository {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpProductRepository {
    /// Creates a remote repository with default client settings.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, None, None)
    }

    /// Creates a remote repository with a request timeout and an optional
    /// bearer token sent on every request.
    pub fn with_options(
        base_url: &str,
        timeout: Option<Duration>,
        api_token: Option<&str>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            TransportError::connection(format!("invalid base URL {base_url:?}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::connection(format!(
                "base URL cannot carry a path: {base_url}"
            ))
            .into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(token) = api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| TransportError::connection(format!("invalid API token: {e}")))?;
            value.set_sensitive(true);
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::connection(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/products` or `{base}/products/{id}`.
    ///
    /// The id is pushed as a single, percent-encoded path segment.
    fn url(&self, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                TransportError::connection(format!("base URL cannot carry a path: {}", self.base_url))
            })?;
            segments.pop_if_empty().push("products");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Turn a non-2xx response into a repository error.
    ///
    /// `id` is `None` for collection requests, where 404 means the endpoint
    /// itself is missing rather than a product.
    async fn error_from_response(response: reqwest::Response, id: Option<&str>) -> RepositoryError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        match id {
            Some(id) => status_code_to_repository_error(status, ENTITY_TYPE, id, &body),
            None => TransportError::status(status, body).into(),
        }
    }

    /// Decode a JSON body on success.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        id: Option<&str>,
    ) -> Result<T> {
        if response.status().is_success() {
            response.json().await.map_err(map_reqwest_error)
        } else {
            Err(Self::error_from_response(response, id).await)
        }
    }

    /// Accept any 2xx without looking at the body.
    async fn handle_empty_response(response: reqwest::Response, id: Option<&str>) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response, id).await)
        }
    }
}

/// Maps a reqwest failure to a transport error.
fn map_reqwest_error(err: reqwest::Error) -> RepositoryError {
    let transport = if err.is_timeout() {
        TransportError::timeout(err.to_string())
    } else if err.is_decode() {
        TransportError::decode(err.to_string())
    } else if let Some(status) = err.status() {
        TransportError::status(status.as_u16(), err.to_string())
    } else {
        TransportError::connection(err.to_string())
    };
    transport.into()
}

#[async_trait]
impl ProductRepository for HttpProductRepository {
    async fn get_product(&self, id: &str) -> Result<Product> {
        let response = self
            .client
            .get(self.url(Some(id))?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::handle_response(response, Some(id)).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let response = self
            .client
            .get(self.url(None)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::handle_response(response, None).await
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        let response = self
            .client
            .post(self.url(None)?)
            .json(product)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::handle_empty_response(response, Some(&product.id)).await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let response = self
            .client
            .put(self.url(Some(&product.id))?)
            .json(product)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::handle_empty_response(response, Some(&product.id)).await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(Some(id))?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::handle_empty_response(response, Some(id)).await
    }
}
