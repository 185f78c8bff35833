// src/api/client.rs
//! Pure HTTP client wrapper for the upstream catalog API.
//!
//! This module provides a thin wrapper around reqwest for making GET
//! requests against the configured base URL. It does no shape handling:
//! bodies go to `parser` and then to `normalizer`.

use super::types::UpstreamRequest;
use super::CatalogSource;
use crate::config::BridgeConfig;
use crate::error::AppError;
use crate::types::BaseUrl;
use reqwest::{header, Client, Response};
use serde_json::Value;

const USER_AGENT: &str = concat!("swapi-bridge/", env!("CARGO_PKG_VERSION"));

/// A thin wrapper around reqwest Client for upstream requests.
#[derive(Clone)]
pub struct SwapiHttpClient {
    client: Client,
    base_url: BaseUrl,
}

impl SwapiHttpClient {
    /// Creates a new HTTP client from the resolved configuration.
    pub fn new(config: &BridgeConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Makes a GET request for the given upstream request.
    ///
    /// # Arguments
    ///
    /// * `request` - Path (relative to the base URL) and query parameters
    ///
    /// # Returns
    ///
    /// The raw `Response`, whatever its status, or an `AppError` if the
    /// request could not be sent.
    pub async fn get(&self, request: &UpstreamRequest) -> Result<Response, AppError> {
        let mut url = self.base_url.join(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        log::debug!("{} -> {}", request, response.status());

        Ok(response)
    }
}

#[async_trait::async_trait]
impl CatalogSource for SwapiHttpClient {
    async fn get_json(&self, request: &UpstreamRequest) -> Result<Value, AppError> {
        let response = self.get(request).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_json_response(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
