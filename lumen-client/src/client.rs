//! Catalog service client
//!
//! `CatalogApi` is the boundary contract the session works against;
//! `CatalogClient` is the HTTP implementation. Tests substitute an
//! in-memory implementation, so nothing above this module knows about
//! transport.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use shared::export::{DatasheetRequest, SaveConfigurationRequest};
use shared::models::{Category, Product, ProductDetails};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Boundary contract to the external catalog/persistence/datasheet service
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// All browse categories
    async fn categories(&self) -> ClientResult<Vec<Category>>;

    /// Products of one category
    async fn products_by_category(&self, category_slug: &str) -> ClientResult<Vec<Product>>;

    /// Full configurable surface of one product
    async fn product_details(&self, product_id: i64) -> ClientResult<ProductDetails>;

    /// Persist a configuration; no response body is consumed
    async fn save_configuration(&self, request: &SaveConfigurationRequest) -> ClientResult<()>;

    /// Request a rendered datasheet; returns the binary document
    async fn generate_datasheet(&self, request: &DatasheetRequest) -> ClientResult<Vec<u8>>;
}

/// HTTP implementation of [`CatalogApi`]
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url));
        }
        Err(ClientError::ServiceStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = Self::check(self.client.get(&url).send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST");
        Self::check(self.client.post(&url).json(body).send().await?).await
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.get("/products/categories").await
    }

    async fn products_by_category(&self, category_slug: &str) -> ClientResult<Vec<Product>> {
        self.get(&format!("/products/categories/{}/products", category_slug))
            .await
    }

    async fn product_details(&self, product_id: i64) -> ClientResult<ProductDetails> {
        self.get(&format!("/products/product-details/{}", product_id))
            .await
    }

    async fn save_configuration(&self, request: &SaveConfigurationRequest) -> ClientResult<()> {
        self.post("/products/configure/save", request).await?;
        Ok(())
    }

    async fn generate_datasheet(&self, request: &DatasheetRequest) -> ClientResult<Vec<u8>> {
        let response = self.post("/products/generate-datasheet", request).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
