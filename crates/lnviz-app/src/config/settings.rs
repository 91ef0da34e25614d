//! Settings loader for `config.toml`

use std::path::{Path, PathBuf};

use lnviz_core::prelude::*;

use super::types::Settings;

pub const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "lnviz";

/// `<config dir>/lnviz/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Parse settings from TOML text
pub fn parse_settings(content: &str) -> Result<Settings> {
    toml::from_str(content).map_err(|e| Error::config(e.to_string()))
}

/// Load settings from `path`, or from the default location when `None`.
///
/// Missing or malformed files fall back to defaults with a logged warning;
/// configuration problems are never fatal.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let explicit = path.is_some();
    let Some(config_path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        debug!("No config directory on this platform, using defaults");
        return Settings::default();
    };

    if !config_path.exists() {
        if explicit {
            let err = Error::ConfigNotFound {
                path: config_path.clone(),
            };
            warn!("{}, using defaults", err);
        } else {
            debug!("No config file at {:?}, using defaults", config_path);
        }
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}
