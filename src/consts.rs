// src/consts.rs
//! Shared constants: envelope format parameters and defaults

/// Envelope format tag written by `seal` and the only one `decode` accepts
pub const ENVELOPE_VERSION: u64 = 1;

/// Wire name of the key derivation function
pub const KDF_NAME: &str = "PBKDF2-HMAC-SHA512";

/// Wire name of the envelope cipher
pub const CIPHER_NAME: &str = "AES-256-GCM";

/// Recommended PBKDF2 iterations for new envelopes
// Older envelopes may carry a lower count; `unlock` always honours the stored value
pub const DEFAULT_KDF_ITERATIONS: u32 = 310_000;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const KEY_LEN: usize = 32;

/// GCM authentication tag appended to every ciphertext
pub const TAG_LEN: usize = 16;

/// Random bytes in an entry id (24 hex characters)
pub const ENTRY_ID_BYTES: usize = 12;

/// Default length for generated entry passwords
pub const DEFAULT_PASSWORD_LENGTH: usize = 24;

/// Shortest password the generator will produce
pub const MIN_GENERATED_PASSWORD_LENGTH: usize = 8;

/// Meta keys maintained by the vault itself
pub const META_CREATED_AT: &str = "created_at";
pub const META_UPDATED_AT: &str = "updated_at";
pub const META_DEFAULT_PASSWORD_LENGTH: &str = "default_password_length";

/// Config file consulted when `PASSVAULT_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "passvault.toml";
