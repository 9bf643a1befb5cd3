//! Provider traits — the abstraction over the two outbound services.
//!
//! A [`Translator`] turns text from one language into another; a
//! [`Generator`] completes a prompt with a language model.
//!
//! Implementations: DeepL and Ollama in `parley-providers`, scripted mocks
//! in tests.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::language::Language;

/// A machine translation backend.
#[async_trait]
pub trait Translator: Send + Sync {
    /// A human-readable name (e.g., "deepl").
    fn name(&self) -> &str;

    /// Translate `text` from `source` into `target`.
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, ProviderError>;
}

/// A text generation backend.
#[async_trait]
pub trait Generator: Send + Sync {
    /// A human-readable name (e.g., "ollama").
    fn name(&self) -> &str;

    /// The model that answers prompts.
    fn model(&self) -> &str;

    /// Complete the prompt, returning the raw reply text.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Can we reach the backend?
    async fn health_check(&self) -> Result<bool, ProviderError> {
        Ok(true)
    }
}
