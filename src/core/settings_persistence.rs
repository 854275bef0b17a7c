//! Config persistence
//!
//! Saves and loads [`BoardConfig`] to/from a JSON file so a host can keep a
//! user's board preferences across sessions.
//!
//! # File Location
//!
//! `board.json` in the per-user configuration directory, e.g.
//! `~/.config/xfboard/board.json` on Linux. Falls back to `board.json` in the
//! working directory when no config directory can be resolved.
//!
//! # Error Handling
//!
//! [`load_or_default`] never fails: missing or unreadable files fall back to
//! defaults with a warning. [`load_config`] and [`save_config`] report errors
//! to the caller.

use crate::core::config::BoardConfig;
use crate::core::error::ConfigResult;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Config filename
const CONFIG_FILENAME: &str = "board.json";

/// Resolve the default config file path
pub fn default_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "xfboard") {
        proj_dirs.config_dir().join(CONFIG_FILENAME)
    } else {
        PathBuf::from(CONFIG_FILENAME)
    }
}

/// Read and parse a config file
pub fn load_config(path: &Path) -> ConfigResult<BoardConfig> {
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    info!("[CONFIG] Loaded board config from {:?}", path);
    Ok(config)
}

/// Load a config file, falling back to defaults on any failure
pub fn load_or_default(path: &Path) -> BoardConfig {
    if !path.exists() {
        info!("[CONFIG] No config file at {:?}. Using defaults.", path);
        return BoardConfig::default();
    }

    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "[CONFIG] Failed to load config at {:?}: {}. Using defaults.",
                path, e
            );
            BoardConfig::default()
        }
    }
}

/// Write a config file, creating its directory if needed
pub fn save_config(path: &Path, config: &BoardConfig) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    info!("[CONFIG] Saved board config to {:?}", path);
    Ok(())
}
