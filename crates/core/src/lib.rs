//! # Parley Core
//!
//! Domain types, traits, and the practice pipeline for the Parley
//! language-practice relay. This crate has no HTTP dependencies: the
//! outbound services are reached through the [`Translator`] and
//! [`Generator`] traits, implemented in `parley-providers`.
//!
//! ## Flow
//!
//! A transcript in the practice language goes through [`Tutor::respond`]:
//! translate to English, generate a reply with recent history as context,
//! polish the reply, translate it back.

pub mod error;
pub mod history;
pub mod language;
pub mod prompt;
pub mod provider;
pub mod text;
pub mod tutor;
pub mod vocabulary;

// Re-export key types at crate root for ergonomics
pub use error::{ProviderError, VocabularyError};
pub use history::{ConversationEntry, ConversationHistory, Role};
pub use language::{Language, UnknownLanguage};
pub use provider::{Generator, Translator};
pub use tutor::{PracticeReply, Tutor, WordCheck};
pub use vocabulary::ApprovedWords;
