//! Reply text transforms applied between generation and translation.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Replacement used when the model produced nothing usable.
pub const FALLBACK_REPLY: &str = "It seems there was a problem.";

/// Literal reply recorded when the generator call fails.
pub const GENERATION_FAILED: &str = "Error";

/// Replies shorter than this (in chars) are replaced by [`FALLBACK_REPLY`].
const MIN_REPLY_CHARS: usize = 10;

/// Emoticons, pictographs, transport symbols, regional indicators,
/// miscellaneous symbols, and dingbats.
static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]",
    )
    .expect("emoji pattern is valid")
});

/// Strip emoji so the reply can be translated and spoken cleanly.
pub fn remove_emojis(text: &str) -> String {
    EMOJI.replace_all(text, "").into_owned()
}

/// Cosmetic reply polish: capitalize and terminate with a period.
///
/// Despite the name, words outside the approved list are not rejected;
/// the vocabulary is only enforced through the prompt. Empty, short, or
/// failed replies become [`FALLBACK_REPLY`]. The result always ends in `.`.
pub fn filter_to_approved_words(reply: &str) -> String {
    if reply.is_empty() || reply == GENERATION_FAILED || reply.chars().count() < MIN_REPLY_CHARS {
        return FALLBACK_REPLY.to_string();
    }

    let mut chars = reply.chars();
    let mut polished = String::with_capacity(reply.len() + 1);
    if let Some(first) = chars.next() {
        polished.extend(first.to_uppercase());
    }
    polished.push_str(chars.as_str());
    polished.push('.');
    polished
}

/// Lower-cased whitespace-separated words longer than one UTF-16 unit.
///
/// A lone astral symbol (two units) counts as a word, as it does for the
/// browser client.
pub fn words_used(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| w.encode_utf16().count() > 1)
        .map(String::from)
        .collect()
}
