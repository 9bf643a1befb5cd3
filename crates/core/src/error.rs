//! Error types for the Parley domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of an outbound call to DeepL or Ollama.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited or quota exceeded by provider (status: {status_code})")]
    RateLimited { status_code: u16 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failure to load the approved word list.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read word list at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse word list at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}
