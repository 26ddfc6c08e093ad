// src/vault/codec.rs
//! Vault ⇄ bytes, applied right before encryption and right after decryption
//!
//! The format is compact JSON: `{"entries": [...], "meta": {...}}`.

use std::io;

use zeroize::Zeroizing;

use crate::aliases::PlainText;
use crate::error::EnvelopeError;

use super::Vault;

/// Serialize into a buffer sized up front
///
/// The buffer never reallocates, so no freed copy of the plaintext is left
/// behind unwiped.
pub fn serialize(vault: &Vault) -> Result<PlainText, EnvelopeError> {
    let mut counter = ByteCounter(0);
    serde_json::to_writer(&mut counter, vault).map_err(serialization)?;

    let mut buf = Zeroizing::new(Vec::with_capacity(counter.0));
    serde_json::to_writer(&mut *buf, vault).map_err(serialization)?;
    Ok(PlainText::new(std::mem::take(&mut *buf)))
}

/// Parse decrypted bytes; an empty payload is a brand-new vault, not an error
pub fn parse(bytes: &[u8]) -> Result<Vault, EnvelopeError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vault::new());
    }
    serde_json::from_slice(bytes).map_err(serialization)
}

fn serialization(err: serde_json::Error) -> EnvelopeError {
    EnvelopeError::Serialization(err.to_string())
}

/// `io::Write` sink that only counts bytes
struct ByteCounter(usize);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
