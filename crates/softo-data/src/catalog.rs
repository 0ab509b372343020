//! Typed client for the storefront catalog API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use softo_commerce::catalog::{Category, Product, ProductFilter};

use crate::{CatalogSource, FetchClient, FetchError};

/// Category listing endpoint.
pub const CATEGORIES_PATH: &str = "/api/v1/categories/";
/// Product listing endpoint.
pub const PRODUCTS_PATH: &str = "/api/v1/products/";

/// Read-only client for categories and products.
///
/// Every call is a fresh round-trip: no retries, no caching, no pagination.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: FetchClient,
}

impl CatalogClient {
    /// Create a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let http = FetchClient::with_timeout(Duration::from_secs(timeout_secs), user_agent)?
            .with_base_url(base_url)
            .with_default_header("Accept", "application/json");
        Ok(Self { http })
    }

    /// Wrap a preconfigured HTTP client. Its base URL must point at the API.
    pub fn from_fetch_client(http: FetchClient) -> Self {
        Self { http }
    }

    /// API base URL.
    pub fn base_url(&self) -> &str {
        self.http.base_url().unwrap_or_default()
    }

    /// `GET /api/v1/categories/`, in API order.
    ///
    /// # Errors
    ///
    /// - [`FetchError::HttpError`] with the status and body text on non-2xx.
    /// - [`FetchError::ParseError`] if the body is not a category array.
    /// - Transport errors (`RequestError`, `Timeout`, `InvalidUrl`).
    pub async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.fetch_json(CATEGORIES_PATH, Vec::new()).await
    }

    /// `GET /api/v1/products/` with the filter's query parameters, in API
    /// order.
    ///
    /// # Errors
    ///
    /// Same contract as [`CatalogClient::list_categories`].
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, FetchError> {
        self.fetch_json(PRODUCTS_PATH, filter.query_pairs()).await
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<T, FetchError> {
        let result: Result<T, FetchError> = async {
            self.http
                .get(path)
                .query(query)
                .send()
                .await?
                .error_for_status()?
                .json()
        }
        .await;

        if let Err(e) = &result {
            tracing::warn!(path, error = %e, "catalog request failed");
        }
        result
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        self.list_categories().await
    }

    async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, FetchError> {
        self.list_products(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_kept() {
        let client = CatalogClient::new("http://127.0.0.1:8000", 5, "softo-test").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }
}
