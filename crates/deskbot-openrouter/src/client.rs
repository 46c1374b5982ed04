// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenRouter chat-completions API.
//!
//! Implements [`GenerateCapability`]: one request per call, failures mapped
//! to the typed provider failure kinds the engine inspects. No retry here;
//! the engine falls back instead.

use std::time::Duration;

use async_trait::async_trait;
use deskbot_config::model::OpenRouterConfig;
use deskbot_core::{DeskbotError, GenerateCapability, ProviderFailure};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// HTTP client for OpenRouter API communication.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    base_url: String,
    max_tokens: u32,
    temperature: f64,
}

impl OpenRouterClient {
    /// Creates a client from configuration.
    ///
    /// Fails when no API key is configured or the key is not a valid header
    /// value; the caller is expected to run fallback-only in that case.
    pub fn new(config: &OpenRouterConfig) -> Result<Self, DeskbotError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| DeskbotError::Config("openrouter.api_key is not set".to_string()))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| DeskbotError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DeskbotError::Provider {
                failure: ProviderFailure::TransportError,
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

#[async_trait]
impl GenerateCapability for OpenRouterClient {
    async fn generate(&self, prompt: &str, model_id: &str) -> Result<String, DeskbotError> {
        let request = ChatRequest {
            model: model_id.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: 1.0,
            stream: false,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let failure = if e.is_timeout() {
                    ProviderFailure::Timeout
                } else {
                    ProviderFailure::TransportError
                };
                DeskbotError::Provider {
                    failure,
                    message: format!("HTTP request failed: {e}"),
                }
            })?;

        let status = response.status();
        debug!(status = %status, model = %model_id, "completion response received");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            warn!(model = %model_id, "rate limited by OpenRouter");
            return Err(DeskbotError::Provider {
                failure: ProviderFailure::RateLimited,
                message: format!("API returned 429: {body}"),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeskbotError::Provider {
                failure: ProviderFailure::TransportError,
                message: format!("API returned {status}: {body}"),
            });
        }

        let payload: ChatResponse = response.json().await.map_err(|e| DeskbotError::Provider {
            failure: ProviderFailure::MalformedResponse,
            message: format!("failed to decode response body: {e}"),
        })?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| DeskbotError::Provider {
                failure: ProviderFailure::MalformedResponse,
                message: "response contained no generated text".to_string(),
            })
    }
}
