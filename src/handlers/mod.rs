//! Typed calls to the shop REST API, one module per resource.

pub mod cart;
pub mod categories;
pub mod orders;
pub mod products;

use reqwest::{Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::ApiError;

/// Shared HTTP client for the backend at `base_url`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(%path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        let response = check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        debug!(%method, %path, "sending JSON body");
        let response = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        check(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!(%path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        check(response).await.map(|_| ())
    }
}

/// Pass 2xx responses through; turn anything else into an [`ApiError`]
/// carrying the body's error detail.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &error_text))
}
