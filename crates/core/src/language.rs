//! Languages known to the relay, keyed by their DeepL codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A DeepL language code.
///
/// English is the pivot language the model converses in; the others are
/// practice languages a client may ask for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "EN")]
    English,
    #[default]
    #[serde(rename = "ES")]
    Spanish,
    #[serde(rename = "HE")]
    Hebrew,
    #[serde(rename = "RU")]
    Russian,
}

impl Language {
    /// The DeepL code (`"EN"`, `"ES"`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::Spanish => "ES",
            Language::Hebrew => "HE",
            Language::Russian => "RU",
        }
    }

    /// Greeting substituted when a translation into this language fails.
    pub fn fallback_greeting(self) -> &'static str {
        match self {
            Language::English => "Hello! How are you?",
            Language::Spanish => "¡Hola! ¿Cómo estás?",
            Language::Hebrew => "שלום! מה שלומך?",
            Language::Russian => "Привет! Как дела?",
        }
    }

    /// Parse a client-supplied practice language, rejecting the pivot.
    pub fn parse_practice(code: &str) -> Result<Self, UnknownLanguage> {
        match code.parse::<Language>()? {
            Language::English => Err(UnknownLanguage(code.to_string())),
            lang => Ok(lang),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A language code the relay does not support.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language '{0}'. Use ES, HE, or RU.")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN" => Ok(Language::English),
            "ES" => Ok(Language::Spanish),
            "HE" => Ok(Language::Hebrew),
            "RU" => Ok(Language::Russian),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}
