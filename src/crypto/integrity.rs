// src/crypto/integrity.rs
//! Unkeyed SHA-256 checksum over the raw ciphertext
//!
//! Only a fast corruption check run before the (slow) key derivation. It
//! does not cover the KDF or cipher parameters; tampering with those shows
//! up later as an authentication failure.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Lowercase hex SHA-256 of `ciphertext`
pub fn compute_checksum(ciphertext: &[u8]) -> String {
    hex::encode(Sha256::digest(ciphertext))
}

/// Constant-time comparison against a stored hex checksum
///
/// Anything that is not 64 hex characters simply fails to verify.
pub fn verify_checksum(ciphertext: &[u8], checksum: &str) -> bool {
    let Ok(expected) = hex::decode(checksum) else {
        return false;
    };
    let actual = Sha256::digest(ciphertext);
    expected.len() == actual.len() && bool::from(actual.as_slice().ct_eq(&expected))
}
