//! Program settings, read from `settings.toml` in the yapos config folder.
use crate::get_yapos_config_dir;
use crate::input::{input_err_msg, read_toml};
use crate::log::{DEFAULT_LOG_LEVEL, parse_log_level};
use anyhow::{Context, Result};
use documented::DocumentedFields;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::iter;
use std::path::PathBuf;

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// The path of the settings file
pub fn get_settings_file_path() -> PathBuf {
    get_yapos_config_dir().join(SETTINGS_FILE_NAME)
}

/// Program settings.
///
/// Options missing from the file take their default values.
#[derive(Debug, DocumentedFields, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Log level used when YAPOS_LOG_LEVEL is not set (off, error, warn, info, debug or trace)
    pub log_level: String,
    /// Replace existing output folders without needing --overwrite
    pub overwrite: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.into(),
            overwrite: false,
        }
    }
}

impl Settings {
    /// Load the settings file, if there is one
    pub fn load() -> Result<Self> {
        let file_path = get_settings_file_path();
        if !file_path.is_file() {
            return Ok(Self::default());
        }

        let settings: Self = read_toml(&file_path)?;
        settings
            .validate()
            .with_context(|| input_err_msg(&file_path))?;

        Ok(settings)
    }

    /// Check that the settings are usable
    fn validate(&self) -> Result<()> {
        parse_log_level(&self.log_level)?;
        Ok(())
    }

    /// A settings file with every option commented out at its default value
    pub fn default_file_contents() -> Result<String> {
        let defaults = toml::Value::try_from(Self::default())?;
        let options = Self::FIELD_NAMES
            .iter()
            .zip(Self::FIELD_DOCS)
            .map(|(name, docs)| {
                let docs = docs
                    .lines()
                    .map(|line| format!("# # {}", line.trim()))
                    .join("\n");
                format!("{docs}\n# {name} = {}", defaults[*name])
            });

        let header = "# yapos settings. Uncomment an option to change it.".to_string();
        Ok(iter::once(header).chain(options).join("\n\n") + "\n")
    }
}
