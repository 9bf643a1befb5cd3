//! `parley ask` — One practice turn from the terminal.

use std::path::Path;

use parley_core::Language;
use tracing::info;

use super::load_config;

pub async fn run(
    config_path: Option<&Path>,
    lang: &str,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let language = Language::parse_practice(lang)?;

    if text.trim().is_empty() {
        return Err("Nothing to send: text is empty".into());
    }

    let config = load_config(config_path)?;
    let tutor = parley_gateway::build_tutor(&config)?;

    info!(lang = %language, model = %tutor.generator().model(), "Running one practice turn");
    let reply = tutor.respond(text, language).await;
    println!("{}", serde_json::to_string_pretty(&reply)?);

    Ok(())
}
