//! Bounded rolling conversation history.
//!
//! One buffer lives for the whole process and is shared by every request.
//! It is advisory context for the prompt only: nothing is persisted and the
//! buffer is reset on restart.

use crate::language::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of entries kept (six user/assistant exchanges).
pub const DEFAULT_CAPACITY: usize = 12;

/// Default number of trailing entries quoted in the prompt.
pub const DEFAULT_WINDOW: usize = 6;

/// Who produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single remembered turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,

    /// English text of the turn
    pub text: String,

    /// Practice language the user spoke in (user entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    pub timestamp: DateTime<Utc>,
}

impl ConversationEntry {
    pub fn user(text: impl Into<String>, language: Language) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            language: Some(language),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            language: None,
            timestamp: Utc::now(),
        }
    }
}

/// FIFO buffer holding at most `capacity` entries.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    entries: VecDeque<ConversationEntry>,
    capacity: usize,
}

impl ConversationHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 2),
            capacity,
        }
    }

    /// Append a user turn and the assistant's reply, evicting the oldest
    /// entries beyond capacity.
    pub fn record_exchange(
        &mut self,
        user_text: impl Into<String>,
        language: Language,
        assistant_text: impl Into<String>,
    ) {
        self.entries
            .push_back(ConversationEntry::user(user_text, language));
        self.entries
            .push_back(ConversationEntry::assistant(assistant_text));

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<ConversationEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// `role: text` lines joined by newlines.
    pub fn render(entries: &[ConversationEntry]) -> String {
        entries
            .iter()
            .map(|e| format!("{}: {}", e.role.as_str(), e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity() {
        let mut history = ConversationHistory::default();
        for i in 0..20 {
            history.record_exchange(format!("q{i}"), Language::Hebrew, format!("a{i}"));
            assert!(history.len() <= DEFAULT_CAPACITY);
        }
        assert_eq!(history.len(), DEFAULT_CAPACITY);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut history = ConversationHistory::new(4);
        history.record_exchange("q0", Language::Spanish, "a0");
        history.record_exchange("q1", Language::Spanish, "a1");
        history.record_exchange("q2", Language::Spanish, "a2");

        let texts: Vec<String> = history.recent(10).into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["q1", "a1", "q2", "a2"]);
    }

    #[test]
    fn odd_capacity_may_drop_a_user_turn() {
        let mut history = ConversationHistory::new(3);
        history.record_exchange("q0", Language::Spanish, "a0");
        history.record_exchange("q1", Language::Spanish, "a1");
        let recent = history.recent(3);
        assert_eq!(recent[0].role, Role::Assistant);
        assert_eq!(recent[0].text, "a0");
    }

    #[test]
    fn only_user_entries_carry_language() {
        let mut history = ConversationHistory::default();
        history.record_exchange("hello", Language::Russian, "hi");
        let entries = history.recent(2);
        assert_eq!(entries[0].language, Some(Language::Russian));
        assert_eq!(entries[1].language, None);
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let mut history = ConversationHistory::default();
        for i in 0..5 {
            history.record_exchange(format!("q{i}"), Language::Hebrew, format!("a{i}"));
        }
        let tail = history.recent(3);
        let texts: Vec<&str> = tail.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["a3", "q4", "a4"]);
        assert_eq!(history.recent(0).len(), 0);
    }

    #[test]
    fn render_formats_roles() {
        let entries = vec![
            ConversationEntry::user("How are you?", Language::Spanish),
            ConversationEntry::assistant("I am fine."),
        ];
        assert_eq!(
            ConversationHistory::render(&entries),
            "user: How are you?\nassistant: I am fine."
        );
        assert_eq!(ConversationHistory::render(&[]), "");
    }
}
