//! DeepL translation client.
//!
//! Uses the v2 `translate` endpoint with header authentication
//! (`Authorization: DeepL-Auth-Key <key>`). Text is sent as a one-element
//! array with HTML tag handling enabled.

use std::time::Duration;

use async_trait::async_trait;
use parley_core::error::ProviderError;
use parley_core::language::Language;
use parley_core::provider::Translator;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::transport_error;

/// A DeepL API client.
pub struct DeepLTranslator {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl DeepLTranslator {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            client,
        })
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    fn name(&self) -> &str {
        "deepl"
    }

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, ProviderError> {
        let body = TranslateRequest {
            text: [text],
            source_lang: source.code(),
            target_lang: target.code(),
            tag_handling: "html",
        };

        debug!(source = %source, target = %target, chars = text.chars().count(), "Sending DeepL request");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "DeepL rejected the API key".into(),
            ));
        }

        // 456: character quota exhausted
        if status == 429 || status == 456 {
            return Err(ProviderError::RateLimited {
                status_code: status,
            });
        }

        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "DeepL returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("DeepL body: {e}")))?;

        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| ProviderError::InvalidResponse("No translations in response".into()))
    }
}

// --- DeepL API types (internal) ---

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    source_lang: &'static str,
    target_lang: &'static str,
    tag_handling: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}
