//! Outbound service clients for Parley.
//!
//! [`DeepLTranslator`] implements `parley_core::Translator` and
//! [`OllamaGenerator`] implements `parley_core::Generator`. Both are thin
//! JSON-over-HTTP clients with a fixed per-request timeout.

pub mod deepl;
pub mod ollama;

pub use deepl::DeepLTranslator;
pub use ollama::{GenerationOptions, OllamaGenerator};

use std::sync::Arc;
use std::time::Duration;

use parley_config::AppConfig;
use parley_core::error::ProviderError;
use parley_core::provider::{Generator, Translator};

/// Map a transport failure onto the domain error.
pub(crate) fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}

/// Build the translator and generator described by the configuration.
///
/// Fails if no DeepL key is configured.
pub fn build_from_config(
    config: &AppConfig,
) -> Result<(Arc<dyn Translator>, Arc<dyn Generator>), ProviderError> {
    let api_key = config
        .deepl
        .api_key
        .clone()
        .ok_or_else(|| ProviderError::NotConfigured("DEEPL_API_KEY is not set".into()))?;

    let translator = DeepLTranslator::new(
        &config.deepl.api_url,
        api_key,
        Duration::from_secs(config.deepl.timeout_secs),
    )?;

    let generator = OllamaGenerator::new(
        &config.ollama.base_url,
        &config.ollama.model,
        GenerationOptions::from_config(&config.ollama),
        Duration::from_secs(config.ollama.timeout_secs),
    )?;

    Ok((Arc::new(translator), Arc::new(generator)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_deepl_key() {
        let config = AppConfig::default();
        let err = build_from_config(&config).err().unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn build_from_default_config_with_key() {
        let mut config = AppConfig::default();
        config.deepl.api_key = Some("test-key:fx".into());
        let (translator, generator) = build_from_config(&config).unwrap();
        assert_eq!(translator.name(), "deepl");
        assert_eq!(generator.name(), "ollama");
        assert_eq!(generator.model(), "qwen3:1.7b");
    }
}
