//! City configuration file. Loaded from `city.ron` at startup.

use anyhow::{Context, Result};
use citygen::CityConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "city.ron";

/// Load config from `path`. If the file is missing or invalid, returns default config.
pub fn load(path: &Path) -> CityConfig {
    match std::fs::read_to_string(path) {
        Ok(data) => match parse(&data) {
            Ok(c) => return c,
            Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
        },
        Err(_) => log::info!("No config at {:?}, using defaults", path),
    }
    CityConfig::default()
}

pub fn parse(data: &str) -> Result<CityConfig, ron::error::SpannedError> {
    ron::from_str(data)
}

/// Write `config` to `path` as pretty RON.
pub fn save(config: &CityConfig, path: &Path) -> Result<()> {
    let s = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
        .context("serializing config")?;
    std::fs::write(path, s).with_context(|| format!("writing config to {:?}", path))?;
    Ok(())
}

pub fn default_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}
