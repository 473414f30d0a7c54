//! Configuration I/O operations

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Get the config file path (~/.config/colorize/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Get the config directory path (~/.config/colorize)
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("colorize"))
}

/// Load configuration from the default location, or return defaults if not found
pub fn load() -> Result<Config> {
    let Ok(config_path) = config_path() else {
        return Ok(Config::default());
    };

    if config_path.exists() {
        load_from(&config_path)
    } else {
        Ok(Config::default())
    }
}

/// Load configuration from an explicitly named file, which must exist
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.is_file() {
        bail!("{}: config file not found", path.display());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}
