//! `parley serve` — Start the relay HTTP server.

use std::path::Path;

use tracing::{error, info};

use super::{config_file, load_config};

pub async fn run(
    config_path: Option<&Path>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    if !config.has_deepl_key() {
        error!("DEEPL_API_KEY missing, refusing to start");
        eprintln!();
        eprintln!("  ERROR: DEEPL_API_KEY is not set!");
        eprintln!();
        eprintln!("  Export it, put it in a .env file, or add it to:");
        eprintln!("    {}", config_file(config_path).display());
        eprintln!();
        return Err("Missing DeepL API key".into());
    }

    println!("Parley relay (DeepL + Ollama)");
    println!("   Listening:  http://{}:{}", config.gateway.host, config.gateway.port);
    println!("   Practice:   http://{}:{}/practice", config.gateway.host, config.gateway.port);
    println!("   Model:      {}", config.ollama.model);

    info!(
        host = %config.gateway.host,
        port = config.gateway.port,
        model = %config.ollama.model,
        "Starting relay"
    );
    parley_gateway::start(config).await?;

    Ok(())
}
