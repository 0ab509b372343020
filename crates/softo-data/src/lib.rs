//! HTTP client and catalog API access for the SoftoDev storefront.
//!
//! Provides a small GET builder over `reqwest` with JSON decoding,
//! the typed [`CatalogClient`] for the storefront's catalog endpoints, and
//! [`CatalogBrowser`] which discards product listings superseded by a newer
//! category selection.
//!
//! # Example
//!
//! ```rust,ignore
//! use softo_data::CatalogClient;
//! use softo_commerce::catalog::ProductFilter;
//!
//! let client = CatalogClient::new("http://127.0.0.1:8000", 15, "softo/0.1")?;
//!
//! let categories = client.list_categories().await?;
//! let products = client
//!     .list_products(&ProductFilter::category(&categories[0].slug))
//!     .await?;
//! ```

mod catalog;
mod error;
mod request;
mod response;
mod selection;

use std::collections::HashMap;
use std::time::Duration;

pub use catalog::{CatalogClient, CATEGORIES_PATH, PRODUCTS_PATH};
pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;
pub use selection::{CatalogBrowser, CatalogSource, SelectionTicket, SelectionTracker};

/// HTTP client for making outbound requests.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client with `reqwest` defaults.
    pub fn new() -> Self {
        Self::from_reqwest(reqwest::Client::new())
    }

    /// Create a client with a request timeout and user agent.
    pub fn with_timeout(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self::from_reqwest(client))
    }

    /// Wrap an already configured `reqwest` client.
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Set a base URL that will be prepended to relative request paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request. Relative paths are joined to the base URL.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self.client.clone(),
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    client: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Append query parameters.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.builder = self.builder.query(pairs);
        self
    }

    /// Send the request and read the whole response.
    ///
    /// Non-2xx statuses are returned as a [`Response`]; use
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            url,
            headers,
            query,
        } = self.builder;

        let mut request = self.client.get(url.as_str());
        if !query.is_empty() {
            request = request.query(&query);
        }
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }

        tracing::debug!(url = %url, "sending request");
        let response = Response::read(request.send().await?).await?;
        tracing::debug!(status = response.status, url = %url, "received response");
        Ok(response)
    }
}
