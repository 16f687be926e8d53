use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// External program that performs the actual translation.
///
/// `{from}` and `{to}` in `args` are replaced by the language codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorSettings {
    pub command: Option<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub from_lang: String,
    pub to_lang: String,
    /// Worker count; 1 runs everything on the main thread.
    pub processes: usize,
    pub ignore_cache: bool,
    pub new_file: bool,
    pub overwrite: bool,
    pub save_temp_on_complete: bool,
    pub translator: TranslatorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            from_lang: String::new(),
            to_lang: String::new(),
            processes: 1,
            ignore_cache: false,
            new_file: false,
            overwrite: false,
            save_temp_on_complete: false,
            translator: TranslatorSettings::default(),
        }
    }
}

impl Settings {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the translator command
        if let Some(command) = settings.translator.command.take() {
            settings.translator.command = Some(Self::expand(&command).unwrap_or(command));
        }

        Ok(Some(settings))
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/md-translate");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Rejects settings no run can succeed with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.from_lang.trim().is_empty() {
            return Err(ConfigError::Invalid("source language is not set".into()));
        }
        if self.to_lang.trim().is_empty() {
            return Err(ConfigError::Invalid("target language is not set".into()));
        }
        if self.processes == 0 {
            return Err(ConfigError::Invalid("processes must be at least 1".into()));
        }
        Ok(())
    }

    fn expand(value: &str) -> Option<String> {
        match shellexpand::full(value) {
            Ok(expanded) => Some(expanded.into_owned()),
            Err(_) => None,
        }
    }
}
