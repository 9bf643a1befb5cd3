//! `parley doctor` — Diagnose configuration and service reachability.

use std::path::Path;
use std::time::Duration;

use parley_config::AppConfig;
use parley_core::{ApprovedWords, Generator};
use parley_providers::{GenerationOptions, OllamaGenerator};
use tracing::debug;

use super::{config_file, load_config};

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Parley Doctor — System Diagnostics");
    println!("====================================\n");

    let mut issues = 0;

    let file = config_file(config_path);
    if !file.exists() {
        println!("  ℹ️  No config file at {}, using defaults", file.display());
        println!("     To customize, save this there:\n");
        for line in AppConfig::default_toml().lines() {
            println!("       {line}");
        }
        println!();
    }

    let config = match load_config(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("\n  ⚠️  Fix the config before running other checks.");
            return Ok(());
        }
    };

    if config.has_deepl_key() {
        println!("  ✅ DeepL API key configured");
    } else {
        println!("  ❌ DEEPL_API_KEY is not set — the relay will refuse to start");
        issues += 1;
    }

    match ApprovedWords::load(&config.tutor.vocabulary_path) {
        Ok(words) if words.is_empty() => {
            println!(
                "  ⚠️  Vocabulary {} is empty",
                config.tutor.vocabulary_path.display()
            );
            issues += 1;
        }
        Ok(words) => println!("  ✅ Vocabulary loaded ({} words)", words.len()),
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    let ollama = OllamaGenerator::new(
        &config.ollama.base_url,
        &config.ollama.model,
        GenerationOptions::from_config(&config.ollama),
        Duration::from_secs(5),
    )?;

    match ollama.health_check().await {
        Ok(true) => {
            println!("  ✅ Ollama reachable at {}", config.ollama.base_url);
            let models = ollama.list_models().await.unwrap_or_default();
            if models.iter().any(|m| m == &config.ollama.model) {
                println!("  ✅ Model {} is pulled", config.ollama.model);
            } else {
                println!(
                    "  ⚠️  Model {} not found — run `ollama pull {}`",
                    config.ollama.model, config.ollama.model
                );
                issues += 1;
            }
        }
        Ok(false) => {
            println!("  ❌ Ollama at {} answered with an error", config.ollama.base_url);
            issues += 1;
        }
        Err(e) => {
            println!("  ❌ Ollama unreachable at {}: {e}", config.ollama.base_url);
            issues += 1;
        }
    }

    debug!(issues, "Diagnostics finished");

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
