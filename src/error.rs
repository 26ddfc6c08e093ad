// src/error.rs
//! Public error types for the entire crate
//!
//! Two layers: [`EnvelopeError`] classifies every failure precisely (logs,
//! tests), [`UnlockError`] is what callers of `unlock` get to see. The
//! narrowing between them is the `From` impl at the bottom of this file.

use thiserror::Error;

/// Precise failure classes of the seal/open pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Structurally invalid input: missing field, bad base64, unknown version
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// Stored checksum does not match the ciphertext
    #[error("vault is corrupted or was tampered with")]
    Integrity,

    /// AEAD tag did not verify
    #[error("wrong passphrase or vault is corrupted")]
    Authentication,

    /// Decrypted bytes are not a valid vault
    #[error("decrypted payload is not a valid vault: {0}")]
    Serialization(String),

    #[error("encryption failed")]
    Encryption,

    #[error("invalid key derivation input: {0}")]
    KeyDerivation(&'static str),
}

impl EnvelopeError {
    /// Short label used when logging the failure class
    pub fn class(&self) -> &'static str {
        match self {
            EnvelopeError::Malformed(_) => "malformed",
            EnvelopeError::Integrity => "integrity",
            EnvelopeError::Authentication => "authentication",
            EnvelopeError::Serialization(_) => "serialization",
            EnvelopeError::Encryption => "encryption",
            EnvelopeError::KeyDerivation(_) => "key-derivation",
        }
    }
}

/// What `unlock` reports to its caller
#[derive(Error, Debug)]
pub enum UnlockError {
    #[error("malformed vault envelope: {0}")]
    Malformed(String),

    /// Checksum, AEAD and payload failures all collapse into this one
    #[error("wrong passphrase or corrupted data")]
    CannotOpen,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("unlock was interrupted before it completed")]
    Interrupted,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no vault has been created yet")]
    NotInitialized,

    #[error("a vault already exists")]
    AlreadyExists,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("an entry with id {0} already exists")]
    DuplicateEntry(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("password length must be at least {min}, got {requested}")]
    TooShort { requested: usize, min: usize },

    #[error("character pool is too small, relax the generator options")]
    PoolTooSmall,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Crate-level umbrella error
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Unlock(#[from] UnlockError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("vault session is locked")]
    Locked,
}

impl From<EnvelopeError> for UnlockError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Malformed(reason) => UnlockError::Malformed(reason),
            EnvelopeError::KeyDerivation(reason) => UnlockError::Malformed(reason.to_owned()),
            EnvelopeError::Integrity
            | EnvelopeError::Authentication
            | EnvelopeError::Serialization(_)
            | EnvelopeError::Encryption => UnlockError::CannotOpen,
        }
    }
}
