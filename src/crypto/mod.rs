// src/crypto/mod.rs
//! Pure cryptographic operations: no I/O, no storage
//!
//! All functions work exclusively on in-memory buffers and hold no state
//! between calls. Nothing here caches key material.
mod aead;
mod integrity;
mod kdf;
mod random;

pub use aead::{decrypt, encrypt};
pub use integrity::{compute_checksum, verify_checksum};
pub use kdf::derive_key;
pub use random::{fresh_nonce, fresh_salt, random_hex};
