//! reqwest-backed [`TransferApi`]

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::TransferApi;
use super::error::ApiError;
use crate::config::ApiConfig;
use crate::models::{Currency, User};
use crate::transfer::draft::{TransferRequest, TransferResponse};

/// HTTP client for the transfer backend
///
/// Base URL and endpoint paths come from [`ApiConfig`]; nothing is read
/// from the environment.
pub struct HttpTransferApi {
    config: ApiConfig,
    client: reqwest::Client,
}

impl HttpTransferApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let url = self.config.url(path);
        debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_server_message(&body);
            warn!(status = status.as_u16(), message = ?message, "Backend returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<R>().await?)
    }
}

/// Pull a human-readable message out of an error body.
///
/// JSON bodies contribute their `message` field; plain-text bodies are used
/// as-is; empty bodies yield nothing.
pub(crate) fn extract_server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        Ok(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

#[async_trait]
impl TransferApi for HttpTransferApi {
    async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json(&self.config.endpoints.users).await
    }

    async fn fetch_currencies(&self) -> Result<Vec<Currency>, ApiError> {
        self.get_json(&self.config.endpoints.currencies).await
    }

    async fn make_transfer(&self, req: &TransferRequest) -> Result<TransferResponse, ApiError> {
        let url = self.config.url(&self.config.endpoints.make_transfer);
        debug!(url = %url, amount = %req.amount, "POST");

        let response = self.client.post(&url).json(req).send().await?;
        Self::decode(response).await
    }
}
