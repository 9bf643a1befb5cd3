//! Parley CLI, the main entry point.
//!
//! Commands:
//! - `serve`   — Start the relay HTTP server
//! - `ask`     — Run one practice turn in the terminal
//! - `status`  — Show the effective configuration
//! - `doctor`  — Diagnose configuration and service reachability

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "parley",
    about = "Parley: speak a language, get a reply you can understand",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.parley/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay HTTP server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send one transcript through the pipeline and print the reply
    Ask {
        /// Practice language (HE, ES, RU)
        #[arg(short, long, default_value = "ES")]
        lang: String,

        /// Text in the practice language
        text: String,
    },

    /// Show the effective configuration
    Status,

    /// Diagnose configuration, vocabulary, and Ollama reachability
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env values must be visible before config resolution reads the environment
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(config_path, port).await?,
        Commands::Ask { lang, text } => commands::ask::run(config_path, &lang, &text).await?,
        Commands::Status => commands::status::run(config_path).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
    }

    Ok(())
}
