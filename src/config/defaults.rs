// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{GeneratorSettings, KdfSettings, StorageSettings};
use crate::consts::{DEFAULT_KDF_ITERATIONS, DEFAULT_PASSWORD_LENGTH};
use crate::enums::SymbolSet;

pub const CONFIG_ENV: &str = "PASSVAULT_CONFIG";
pub const VAULT_PATH_ENV: &str = "PASSVAULT_VAULT";

/// `~/.pass_manager/vault.sec`, or relative to the working directory without a home
pub fn default_vault_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pass_manager")
        .join("vault.sec")
}

pub fn default_kdf() -> KdfSettings {
    KdfSettings {
        iterations: DEFAULT_KDF_ITERATIONS,
    }
}

pub fn default_storage() -> StorageSettings {
    StorageSettings {
        vault_path: default_vault_path(),
    }
}

pub fn default_generator() -> GeneratorSettings {
    GeneratorSettings {
        length: DEFAULT_PASSWORD_LENGTH,
        symbols: SymbolSet::Soft,
        allow_ambiguous: false,
    }
}
