// src/crypto/aead.rs
//! AES-256-GCM with the tag appended to the ciphertext

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};

use crate::aliases::{DerivedKey32, PlainText};
use crate::consts::NONCE_LEN;
use crate::error::EnvelopeError;

/// Encrypt `plaintext` → `ciphertext || tag`
pub fn encrypt(
    key: &DerivedKey32,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.expose_secret()));
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| EnvelopeError::Encryption)
}

/// Decrypt `ciphertext || tag` → plaintext
///
/// A tag mismatch is reported as [`EnvelopeError::Authentication`] and
/// nothing else, whatever the underlying cause.
pub fn decrypt(
    key: &DerivedKey32,
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<PlainText, EnvelopeError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.expose_secret()));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| EnvelopeError::Authentication)?;
    Ok(PlainText::new(plaintext))
}
