// src/vault/mod.rs
//! The decrypted domain object and its byte encoding
//!
//! A [`Vault`] only ever exists in memory; it reaches storage exclusively
//! through `seal`.

pub mod codec;
pub mod model;

pub use codec::{parse, serialize};
pub use model::{EntryId, EntryPassword, Vault, VaultEntry};
