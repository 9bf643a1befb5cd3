//! The approved word list the model is asked to stay within.

use crate::error::VocabularyError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Number of words quoted in the prompt.
pub const PROMPT_WORD_LIMIT: usize = 50;

/// On-disk shape: `{"words": ["...", ...]}`.
#[derive(Debug, Deserialize)]
struct WordListFile {
    words: Vec<String>,
}

/// A fixed word list, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct ApprovedWords {
    words: Vec<String>,
    lookup: HashSet<String>,
    prompt_list: String,
}

impl ApprovedWords {
    pub fn from_words(words: Vec<String>) -> Self {
        let lookup = words.iter().map(|w| w.to_lowercase()).collect();
        let prompt_list = words
            .iter()
            .take(PROMPT_WORD_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            words,
            lookup,
            prompt_list,
        }
    }

    /// Load the word list from a JSON file.
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let content = std::fs::read_to_string(path).map_err(|e| VocabularyError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let file: WordListFile =
            serde_json::from_str(&content).map_err(|e| VocabularyError::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::info!(count = file.words.len(), path = %path.display(), "Loaded approved words");
        Ok(Self::from_words(file.words))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The first [`PROMPT_WORD_LIMIT`] words, comma separated.
    pub fn prompt_list(&self) -> &str {
        &self.prompt_list
    }

    /// Case-insensitive membership.
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(&word.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn prompt_list_is_truncated() {
        let words: Vec<String> = (0..80).map(|i| format!("w{i}")).collect();
        let vocab = ApprovedWords::from_words(words);
        assert_eq!(vocab.len(), 80);
        assert_eq!(vocab.prompt_list().split(", ").count(), PROMPT_WORD_LIMIT);
        assert!(vocab.prompt_list().starts_with("w0, w1, w2"));
        assert!(vocab.prompt_list().ends_with("w49"));
    }

    #[test]
    fn contains_ignores_case() {
        let vocab = ApprovedWords::from_words(vec!["Hello".into(), "park".into()]);
        assert!(vocab.contains("hello"));
        assert!(vocab.contains("PARK"));
        assert!(!vocab.contains("castle"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"words": ["cat", "dog", "sun"]}}"#).unwrap();
        let vocab = ApprovedWords::load(file.path()).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.prompt_list(), "cat, dog, sun");
    }

    #[test]
    fn load_missing_file_fails() {
        let err = ApprovedWords::load(Path::new("/nonexistent/words.json")).unwrap_err();
        assert!(matches!(err, VocabularyError::ReadError { .. }));
    }

    #[test]
    fn load_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["cat", "dog"]"#).unwrap();
        let err = ApprovedWords::load(file.path()).unwrap_err();
        assert!(matches!(err, VocabularyError::ParseError { .. }));
    }
}
