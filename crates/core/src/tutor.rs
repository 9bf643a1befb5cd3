//! The practice pipeline: translate in, generate, polish, translate out.
//!
//! Outbound failures never fail a request. A failed translation is replaced
//! by the target language's fallback greeting; a failed generation becomes
//! the literal `"Error"`, which the polish step turns into the fallback
//! reply.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::history::{ConversationEntry, ConversationHistory, DEFAULT_WINDOW};
use crate::language::Language;
use crate::prompt::build_prompt;
use crate::provider::{Generator, Translator};
use crate::text::{GENERATION_FAILED, filter_to_approved_words, remove_emojis, words_used};
use crate::vocabulary::ApprovedWords;

/// Everything produced for one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeReply {
    /// The transcript as received
    pub user_text: String,
    /// The transcript in English
    pub english_input: String,
    /// Model output after emoji removal (or `"Error"`)
    pub ai_text_raw: String,
    /// Polished English reply
    pub ai_text: String,
    /// Polished reply in the practice language
    #[serde(rename = "aiTextX")]
    pub ai_text_x: String,
    pub target_lang: Language,
    pub word_check: WordCheck,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCheck {
    pub approved_words_count: usize,
    pub words_used: Vec<String>,
}

/// Runs transcripts through translation and generation, remembering
/// recent exchanges across requests.
pub struct Tutor {
    translator: Arc<dyn Translator>,
    generator: Arc<dyn Generator>,
    vocabulary: Arc<ApprovedWords>,
    history: Mutex<ConversationHistory>,
    history_window: usize,
}

impl Tutor {
    pub fn new(
        translator: Arc<dyn Translator>,
        generator: Arc<dyn Generator>,
        vocabulary: Arc<ApprovedWords>,
    ) -> Self {
        Self {
            translator,
            generator,
            vocabulary,
            history: Mutex::new(ConversationHistory::default()),
            history_window: DEFAULT_WINDOW,
        }
    }

    /// Replace the history buffer with one of the given capacity.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = Mutex::new(ConversationHistory::new(capacity));
        self
    }

    /// Number of trailing history entries quoted in the prompt.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn vocabulary(&self) -> &ApprovedWords {
        &self.vocabulary
    }

    pub fn generator(&self) -> &Arc<dyn Generator> {
        &self.generator
    }

    /// A copy of the current history, oldest first.
    pub async fn history(&self) -> Vec<ConversationEntry> {
        let history = self.history.lock().await;
        history.recent(history.len())
    }

    /// Run one transcript through the full pipeline.
    pub async fn respond(&self, text: &str, language: Language) -> PracticeReply {
        info!(lang = %language, chars = text.chars().count(), "Practice input received");

        let english_input = self.translate(text, language, Language::English).await;
        debug!(english = %english_input, "Translated input to English");

        let ai_text_raw = self.generate_reply(&english_input, language).await;

        let ai_text = filter_to_approved_words(&ai_text_raw);
        debug!(reply = %ai_text, "Polished reply");

        let ai_text_x = self.translate(&ai_text, Language::English, language).await;
        debug!(lang = %language, reply = %ai_text_x, "Translated reply");

        let word_check = WordCheck {
            approved_words_count: self.vocabulary.len(),
            words_used: words_used(&ai_text),
        };

        PracticeReply {
            user_text: text.to_string(),
            english_input,
            ai_text_raw,
            ai_text,
            ai_text_x,
            target_lang: language,
            word_check,
        }
    }

    async fn translate(&self, text: &str, source: Language, target: Language) -> String {
        match self.translator.translate(text, source, target).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(
                    translator = %self.translator.name(),
                    source = %source,
                    target = %target,
                    error = %e,
                    "Translation failed, using fallback greeting"
                );
                target.fallback_greeting().to_string()
            }
        }
    }

    /// Generate a reply and record the exchange on success.
    async fn generate_reply(&self, english_input: &str, language: Language) -> String {
        // Lock only to snapshot; never held across the model call.
        let context = {
            let history = self.history.lock().await;
            ConversationHistory::render(&history.recent(self.history_window))
        };

        let prompt = build_prompt(self.vocabulary.prompt_list(), &context, english_input);
        debug!(prompt_chars = prompt.chars().count(), "Built generation prompt");

        match self.generator.generate(&prompt).await {
            Ok(reply) => {
                let reply = remove_emojis(&reply).trim().to_string();

                let mut history = self.history.lock().await;
                history.record_exchange(english_input, language, reply.clone());
                debug!(entries = history.len(), "Conversation memory updated");

                reply
            }
            Err(e) => {
                warn!(
                    generator = %self.generator.name(),
                    model = %self.generator.model(),
                    error = %e,
                    "Generation failed"
                );
                GENERATION_FAILED.to_string()
            }
        }
    }
}
