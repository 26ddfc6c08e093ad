// src/lib.rs
//! passvault: client-side encrypted credential vault
//!
//! Features:
//! - Versioned JSON envelope (PBKDF2-HMAC-SHA512 + AES-256-GCM + SHA-256 checksum)
//! - Fresh salt and nonce on every seal
//! - Precise internal error classes, narrowed errors at the API surface
//! - Passphrases, keys and plaintext held in zeroize-on-drop `secrecy` containers

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod enums;
pub mod envelope;
pub mod error;
pub mod passgen;
pub mod sealing;
pub mod session;
pub mod storage;
pub mod store;
pub mod vault;

// Re-export everything users need at the crate root
pub use aliases::{DerivedKey32, Passphrase, PlainText};
pub use config::load as load_config;
pub use envelope::Envelope;
pub use error::{CoreError, EnvelopeError, UnlockError};
pub use passgen::{generate_password, GeneratorOptions};
pub use session::{Session, SessionState};
pub use storage::{EnvelopeStorage, FileStorage, MemoryStorage};
pub use store::VaultStore;
pub use vault::{EntryId, Vault, VaultEntry};

pub type Result<T> = std::result::Result<T, CoreError>;
