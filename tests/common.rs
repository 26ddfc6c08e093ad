// tests/common.rs
//! Shared test utilities: logging setup and small fixtures

#![allow(dead_code)]

use passvault::{MemoryStorage, Passphrase, Vault, VaultEntry, VaultStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Low iteration count so tests stay fast; production default is 310_000
pub const TEST_ITERATIONS: u32 = 1_000;

/// Initialize test-friendly logging (respects RUST_LOG=), safe to call repeatedly
pub fn setup() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

pub fn pass(text: &str) -> Passphrase {
    Passphrase::new(text.to_owned())
}

pub fn memory_store() -> VaultStore<MemoryStorage> {
    VaultStore::new(MemoryStorage::new()).with_iterations(TEST_ITERATIONS)
}

/// Vault with a couple of realistic entries
pub fn sample_vault() -> Vault {
    let mut vault = Vault::new();
    vault
        .add_entry(
            VaultEntry::new("GitHub", "octocat", "gh-s3cret-token")
                .with_tags(["work", "code"])
                .with_notes("2FA via app"),
        )
        .unwrap();
    vault
        .add_entry(VaultEntry::new("mail.example.com", "alice", "correct horse battery"))
        .unwrap();
    vault
}

pub const LEGACY_ENVELOPE: &str = include_str!("data/legacy_envelope.json");
pub const LEGACY_PASSPHRASE: &str = "StrongMaster!123";
