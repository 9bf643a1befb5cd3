//! `parley status` — Show the effective configuration.

use std::path::Path;

use super::{config_file, load_config};

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let file = config_file(config_path);

    println!("Parley Status");
    println!("=============");
    println!("  Config file:  {}", file.display());
    println!("  Relay:        {}:{}", config.gateway.host, config.gateway.port);
    println!("  CORS:         {}", if config.gateway.cors_permissive { "permissive" } else { "same-origin" });
    println!("  DeepL URL:    {}", config.deepl.api_url);
    println!("  DeepL key:    {}", if config.has_deepl_key() { "set" } else { "missing" });
    println!("  Ollama:       {}", config.ollama.base_url);
    println!("  Model:        {}", config.ollama.model);
    println!("  Temperature:  {}", config.ollama.temperature);
    println!("  Max tokens:   {}", config.ollama.num_predict);
    println!("  Vocabulary:   {}", config.tutor.vocabulary_path.display());
    println!(
        "  History:      {} entries, {} in prompt",
        config.tutor.history_capacity, config.tutor.history_window
    );

    if file.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file, using defaults and environment");
    }

    Ok(())
}
