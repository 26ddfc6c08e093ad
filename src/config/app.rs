// src/config/app.rs
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::warn;

use super::defaults::*;
use crate::consts::DEFAULT_CONFIG_FILE;
use crate::enums::SymbolSet;
use crate::error::ConfigError;
use crate::passgen::GeneratorOptions;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_kdf")]
    pub kdf: KdfSettings,
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
    #[serde(default = "default_generator")]
    pub generator: GeneratorSettings,
}

/// Policy for envelopes sealed from now on; opening always uses the stored count
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KdfSettings {
    pub iterations: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    pub vault_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub length: usize,
    pub symbols: SymbolSet,
    pub allow_ambiguous: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kdf: default_kdf(),
            storage: default_storage(),
            generator: default_generator(),
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        default_generator()
    }
}

impl GeneratorSettings {
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            length: self.length,
            symbols: self.symbols,
            allow_ambiguous: self.allow_ambiguous,
            ..GeneratorOptions::default()
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Config file named by `PASSVAULT_CONFIG`, else built-in defaults;
    /// `PASSVAULT_VAULT` then overrides the vault path
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut conf = if Path::new(&config_path).exists() {
            Self::from_file(&config_path).unwrap_or_else(|err| {
                warn!(path = %config_path, error = %err, "invalid config, using built-in defaults");
                Self::default()
            })
        } else {
            Self::default()
        };

        if let Ok(vault_path) = std::env::var(VAULT_PATH_ENV) {
            conf.storage.vault_path = PathBuf::from(vault_path);
        }

        conf
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once per process
pub fn load() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}
