use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tosqla_translate::{DEFAULT_BACKUP_KEY, DEFAULT_BACKUP_POSTFIX};

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "tosqla.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

/// Defaults for generation runs; command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub with_tablename: bool,
    pub abstract_models: bool,
    pub backup_postfix: String,
    pub backup_key: String,
    /// Module providing `Base`; when unset the output declares its own.
    pub base_module: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            with_tablename: false,
            abstract_models: false,
            backup_postfix: DEFAULT_BACKUP_POSTFIX.to_string(),
            backup_key: DEFAULT_BACKUP_KEY.to_string(),
            base_module: None,
        }
    }
}

/// Load settings from `path`, falling back to defaults when it does not exist.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
