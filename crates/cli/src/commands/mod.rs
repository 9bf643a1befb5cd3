pub mod ask;
pub mod doctor;
pub mod serve;
pub mod status;

use std::path::{Path, PathBuf};

use parley_config::AppConfig;

/// Where the config is read from: `--config` or the default location.
pub fn config_file(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

/// Load config with environment overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let file = config_file(path);
    AppConfig::load_with_overrides(&file)
        .map_err(|e| format!("Failed to load config: {e}").into())
}
