//! REST client for the Gemini generative language API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::InsightGenerator;
use crate::common::errors::{PricingError, Result};
use crate::config::types::InsightConfig;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// Base URL of the API (scheme + host)
    base_url: Url,
    /// API key for authentication
    api_key: String,
    /// Model identifier
    model: String,
}

impl GeminiClient {
    /// Create a new client with the default timeout
    pub fn new(base_url: &str, api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, model, Duration::from_secs(30))
    }

    /// Create a new client with a custom timeout
    pub fn with_timeout(
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PricingError::Internal(e.to_string()))?;

        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Create a client from configuration; the API key is required
    pub fn from_config(config: &InsightConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PricingError::MissingApiKey("GEMINI_API_KEY".to_string()))?;

        Self::with_timeout(
            &config.base_url,
            api_key,
            config.model.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    fn endpoint(&self) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))?)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[async_trait]
impl InsightGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint()?;
        debug!("Requesting insight from {}", url);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PricingError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }
}
