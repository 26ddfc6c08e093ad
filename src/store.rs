// src/store.rs
//! VaultStore: the orchestrator callers talk to
//!
//! Wraps the pure [`sealing`](crate::sealing) pipelines with storage access
//! and narrows failures to [`UnlockError`]: a caller can tell "malformed
//! input" from "cannot open", but never checksum failure from a wrong
//! passphrase. The precise class is only logged.

use tracing::{debug, info};

use crate::aliases::Passphrase;
use crate::config::Config;
use crate::consts::DEFAULT_KDF_ITERATIONS;
use crate::envelope::{self, Envelope};
use crate::error::{CoreError, EnvelopeError, StorageError, UnlockError};
use crate::sealing;
use crate::storage::EnvelopeStorage;
use crate::vault::Vault;

pub struct VaultStore<S> {
    storage: S,
    iterations: u32,
}

impl<S: EnvelopeStorage> VaultStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            iterations: DEFAULT_KDF_ITERATIONS,
        }
    }

    /// Take the iteration policy for new envelopes from `config`
    pub fn with_config(storage: S, config: &Config) -> Self {
        Self::new(storage).with_iterations(config.kdf.iterations)
    }

    /// Iteration count written into envelopes sealed from now on
    ///
    /// A zero count is ignored and the current policy kept.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        if iterations > 0 {
            self.iterations = iterations;
        }
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Encrypt `vault` into a fresh envelope (nothing is stored)
    pub fn seal(&self, vault: &Vault, passphrase: &Passphrase) -> Result<Envelope, EnvelopeError> {
        sealing::seal(vault, passphrase, self.iterations)
    }

    /// Open an envelope; `None` stands for "nothing stored yet" and yields an empty vault
    pub fn unlock(
        &self,
        envelope: Option<&Envelope>,
        passphrase: &Passphrase,
    ) -> Result<Vault, UnlockError> {
        match envelope {
            None => Ok(Vault::new()),
            Some(envelope) => Ok(sealing::open(envelope, passphrase)?),
        }
    }

    /// Decode and open raw envelope text; blank text is an empty vault
    pub fn unlock_text(&self, text: &str, passphrase: &Passphrase) -> Result<Vault, UnlockError> {
        let envelope = decode_stored(Some(text))?;
        self.unlock(envelope.as_ref(), passphrase)
    }

    /// Fetch the stored envelope, decoded; `None` when nothing was stored
    pub fn fetch(&self) -> Result<Option<Envelope>, UnlockError> {
        let stored = self.storage.get()?;
        decode_stored(stored.as_deref())
    }

    /// Read from storage and unlock
    pub fn load(&self, passphrase: &Passphrase) -> Result<Vault, UnlockError> {
        let envelope = self.fetch()?;
        if envelope.is_none() {
            debug!("no stored envelope, starting with an empty vault");
        }
        self.unlock(envelope.as_ref(), passphrase)
    }

    /// Seal and store, replacing whatever was stored before
    pub fn save(&self, vault: &Vault, passphrase: &Passphrase) -> Result<Envelope, CoreError> {
        let envelope = self.seal(vault, passphrase)?;
        self.storage.put(&envelope::encode(&envelope)?)?;
        info!(entries = vault.len(), "vault saved");
        Ok(envelope)
    }

    /// Create and store a new, empty vault; refuses to overwrite an existing one
    pub fn init(&self, passphrase: &Passphrase) -> Result<Vault, CoreError> {
        if self.storage.exists()? {
            return Err(StorageError::AlreadyExists.into());
        }
        let vault = Vault::new();
        self.save(&vault, passphrase)?;
        Ok(vault)
    }
}

fn decode_stored(text: Option<&str>) -> Result<Option<Envelope>, UnlockError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(Some(envelope::decode(text)?)),
        _ => Ok(None),
    }
}
