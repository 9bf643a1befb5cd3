//! Ollama generation client.
//!
//! Talks to the native `/api/generate` endpoint with streaming disabled, so
//! every call is a single JSON request and response.

use std::time::Duration;

use async_trait::async_trait;
use parley_config::OllamaConfig;
use parley_core::error::ProviderError;
use parley_core::provider::Generator;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::transport_error;

/// Sampling options forwarded verbatim in the `options` object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationOptions {
    pub num_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub num_ctx: u32,
}

impl GenerationOptions {
    pub fn from_config(config: &OllamaConfig) -> Self {
        Self {
            num_predict: config.num_predict,
            temperature: config.temperature,
            top_p: config.top_p,
            num_ctx: config.num_ctx,
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::from_config(&OllamaConfig::default())
    }
}

/// A local Ollama server.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    options: GenerationOptions,
    client: reqwest::Client,
}

impl OllamaGenerator {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        options: GenerationOptions,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            options,
            client,
        })
    }

    /// Models the server has pulled.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Ok(Vec::new());
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Ollama tags: {e}")))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: &self.options,
        };

        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Sending Ollama request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Ollama returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Ollama body: {e}")))?;

        debug!(
            model = %parsed.model.as_deref().unwrap_or(&self.model),
            eval_count = parsed.eval_count.unwrap_or_default(),
            "Ollama reply received"
        );

        Ok(parsed.response.trim().to_string())
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        Ok(response.status().is_success())
    }
}

// --- Ollama API types (internal) ---

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerationOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    model: Option<String>,
    response: String,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}
