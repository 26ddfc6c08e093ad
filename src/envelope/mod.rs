// src/envelope/mod.rs
//! The envelope, the only object that leaves the client
//!
//! Holds everything needed to re-derive the key and decrypt: format
//! version, KDF parameters, cipher parameters, ciphertext and a checksum.
//! Binary fields are kept as raw bytes here; [`codec`] handles the
//! base64/JSON transport form.

pub mod codec;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::consts::{ENVELOPE_VERSION, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::error::EnvelopeError;
use crate::enums::{CipherAlgorithm, KdfAlgorithm};

pub use codec::{decode, encode};

/// Unknown JSON members carried through decode → encode untouched
pub type ExtraFields = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct KdfParams {
    pub algorithm: KdfAlgorithm,
    pub iterations: u32,
    pub salt: [u8; SALT_LEN],
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CipherParams {
    pub algorithm: CipherAlgorithm,
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the GCM tag appended
    pub payload: Vec<u8>,
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub version: u64,
    pub kdf: KdfParams,
    pub cipher: CipherParams,
    /// Lowercase hex SHA-256 of `cipher.payload`
    pub checksum: String,
    pub extra: ExtraFields,
}

impl Envelope {
    /// Assemble a current-version envelope from freshly produced parts
    pub fn new(
        iterations: u32,
        salt: [u8; SALT_LEN],
        nonce: [u8; NONCE_LEN],
        payload: Vec<u8>,
        checksum: String,
    ) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            kdf: KdfParams {
                algorithm: KdfAlgorithm::Pbkdf2HmacSha512,
                iterations,
                salt,
                extra: ExtraFields::new(),
            },
            cipher: CipherParams {
                algorithm: CipherAlgorithm::Aes256Gcm,
                nonce,
                payload,
                extra: ExtraFields::new(),
            },
            checksum,
            extra: ExtraFields::new(),
        }
    }
    /// Structural checks that do not need the passphrase
    ///
    /// `decode` runs these on everything it reads; `open` runs them again so
    /// envelopes assembled in memory obey the same rules.
    pub fn validate(&self) -> Result<(), EnvelopeError> {
        if self.version != ENVELOPE_VERSION {
            return Err(EnvelopeError::Malformed(format!(
                "unsupported envelope version {}",
                self.version
            )));
        }
        if self.kdf.iterations == 0 {
            return Err(EnvelopeError::Malformed(
                "kdf.iterations must be positive".to_owned(),
            ));
        }
        if self.cipher.payload.len() < TAG_LEN {
            return Err(EnvelopeError::Malformed(format!(
                "cipher.payload is {} bytes, shorter than the authentication tag",
                self.cipher.payload.len()
            )));
        }
        if !is_sha256_hex(&self.checksum) {
            return Err(EnvelopeError::Malformed(
                "checksum must be 64 lowercase hex characters".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Lowercase only, matching what `compute_checksum` writes
fn is_sha256_hex(text: &str) -> bool {
    text.len() == 64 && text.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
