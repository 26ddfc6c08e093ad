// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Algorithm identifiers carried inside the envelope. Their serde names are
//! the wire names and must never change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{CIPHER_NAME, KDF_NAME};

/// Supported key derivation functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum KdfAlgorithm {
    #[default]
    #[serde(rename = "PBKDF2-HMAC-SHA512")]
    Pbkdf2HmacSha512,
}

/// Supported envelope ciphers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum CipherAlgorithm {
    #[default]
    #[serde(rename = "AES-256-GCM")]
    Aes256Gcm,
}

impl KdfAlgorithm {
    pub fn wire_name(self) -> &'static str {
        match self {
            KdfAlgorithm::Pbkdf2HmacSha512 => KDF_NAME,
        }
    }
}

impl CipherAlgorithm {
    pub fn wire_name(self) -> &'static str {
        match self {
            CipherAlgorithm::Aes256Gcm => CIPHER_NAME,
        }
    }
}

impl fmt::Display for KdfAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Symbol density for generated passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SymbolSet {
    None,
    #[default]
    Soft,
    Hard,
}

impl SymbolSet {
    pub fn characters(self) -> &'static str {
        match self {
            SymbolSet::None => "",
            SymbolSet::Soft => "!@#$%^&*?",
            SymbolSet::Hard => "!@#$%^&*?-_=+[]{}()<>:;,./|~",
        }
    }
}
