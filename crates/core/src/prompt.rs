//! Prompt template for the conversation partner.

/// Build the generation prompt.
///
/// `history` is the rendered recent conversation; an empty string omits the
/// "Recent conversation" block entirely.
pub fn build_prompt(approved_list: &str, history: &str, input: &str) -> String {
    let history_block = if history.is_empty() {
        String::new()
    } else {
        format!("Recent conversation:\n{history}\n\n")
    };

    format!(
        "You are a friendly conversation partner for English language practice. \n\
         \n\
         STRICT RULES:\n\
         1. Use ONLY these approved words: {approved_list}\n\
         2. Use only present tense or past tense verbs.\n\
         \n\
         {history_block}\n\
         \n\
         User says: \"{input}\"\n\
         \n\
         Reply following the rules above:"
    )
}
