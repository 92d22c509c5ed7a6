// App settings storage

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::api::ApiConfig;
use crate::error::Result;

/// Overrides the settings file's `baseUrl` when set and non-empty
pub const BASE_URL_ENV_VAR: &str = "DOCEDIT_API_BASE_URL";

const CONFIG_DIR_NAME: &str = ".docedit_bridge";
const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppSettings {
    /// Apply environment overrides on top of the file contents
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                debug!(target: "settings", "base URL overridden by {}", BASE_URL_ENV_VAR);
                self.api.base_url = Some(url);
            }
        }
        self
    }
}

/// Directory holding the bridge's configuration files
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME))
}

/// Get the path to the settings file
pub fn get_settings_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(SETTINGS_FILE_NAME))
}

/// Load settings from `path`; a missing or unreadable file yields defaults
pub fn load_settings_from(path: &Path) -> AppSettings {
    if !path.exists() {
        return AppSettings::default();
    }

    let parsed = fs::read_to_string(path)
        .map_err(crate::error::BridgeError::from)
        .and_then(|json| serde_json::from_str::<AppSettings>(&json).map_err(Into::into));

    match parsed {
        Ok(settings) => settings,
        Err(e) => {
            warn!(target: "settings", "ignoring settings file {}: {}", path.display(), e);
            AppSettings::default()
        }
    }
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!(target: "settings", "settings saved to {}", path.display());
    Ok(())
}

/// Settings from the default location, with environment overrides applied
pub fn load_settings() -> AppSettings {
    let settings = match get_settings_path() {
        Some(path) => load_settings_from(&path),
        None => {
            warn!(target: "settings", "no home directory, using default settings");
            AppSettings::default()
        }
    };
    settings.with_env_overrides()
}
