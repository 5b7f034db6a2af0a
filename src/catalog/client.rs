/// HTTP client for the remote catalog API
///
/// Every request goes through `decode_response`, which turns transport
/// failures, non-success statuses and bad bodies into `ApiError`.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::ApiError;
use crate::state::data::{Category, Product, ProductPayload};

/// Cheap to clone; the underlying connection pool is shared
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &Config) -> Self {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to build configured HTTP client, using defaults");
            Client::new()
        });

        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET /products`
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.http.get(self.url("products")).send().await?;
        decode_response(response).await
    }

    /// `GET /categories`
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.http.get(self.url("categories")).send().await?;
        decode_response(response).await
    }

    /// `POST /products`
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ApiError> {
        let response = self.http.post(self.url("products")).json(payload).send().await?;
        decode_response(response).await
    }

    /// `PUT /products/{id}`
    pub async fn update_product(&self, id: i64, payload: &ProductPayload) -> Result<Product, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("products/{}", id)))
            .json(payload)
            .send()
            .await?;
        decode_response(response).await
    }

    /// Raw bytes of an arbitrary URL (used for product images)
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16() });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status { status: status.as_u16() });
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
