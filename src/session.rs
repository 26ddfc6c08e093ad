// src/session.rs
//! Explicit session object replacing ambient "current vault" globals
//!
//! ```text
//! Locked ──begin_unlock──▶ Unlocking ──finish_unlock──▶ Unlocked
//!   ▲                          │                           │
//!   └────── cancel_unlock ─────┘◀────────── lock ──────────┘
//! ```
//!
//! Key derivation runs on a worker thread while `Unlocking`. Cancelling
//! detaches the worker; whatever it produces is dropped (and wiped) as soon
//! as it finishes. No derived key is ever kept between calls.

use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::aliases::Passphrase;
use crate::envelope::{self, Envelope};
use crate::error::{CoreError, UnlockError};
use crate::sealing;
use crate::storage::EnvelopeStorage;
use crate::store::VaultStore;
use crate::vault::Vault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Locked,
    Unlocking,
    Unlocked,
}

type UnlockOutcome = Result<(Vault, Passphrase), UnlockError>;

/// An unlock running on a background thread
pub struct PendingUnlock {
    handle: JoinHandle<UnlockOutcome>,
}

impl PendingUnlock {
    /// Start opening `envelope` off the calling thread
    pub fn spawn(envelope: Envelope, passphrase: Passphrase) -> Self {
        let handle = thread::spawn(move || -> UnlockOutcome {
            let vault = sealing::open(&envelope, &passphrase)?;
            Ok((vault, passphrase))
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the worker is done
    pub fn wait(self) -> UnlockOutcome {
        self.handle.join().map_err(|_| UnlockError::Interrupted)?
    }
}

enum State {
    Locked,
    Unlocking(PendingUnlock),
    Unlocked { vault: Vault, passphrase: Passphrase },
}

pub struct Session<S> {
    store: VaultStore<S>,
    state: State,
}

impl<S: EnvelopeStorage> Session<S> {
    pub fn new(store: VaultStore<S>) -> Self {
        Self {
            store,
            state: State::Locked,
        }
    }

    pub fn store(&self) -> &VaultStore<S> {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        match self.state {
            State::Locked => SessionState::Locked,
            State::Unlocking(_) => SessionState::Unlocking,
            State::Unlocked { .. } => SessionState::Unlocked,
        }
    }

    /// Unlock and wait for the result
    pub fn unlock(&mut self, passphrase: Passphrase) -> Result<(), UnlockError> {
        self.begin_unlock(passphrase)?;
        self.finish_unlock()
    }

    /// Read the stored envelope and start decrypting it in the background
    ///
    /// Any previous state is discarded first. With nothing stored, the
    /// session goes straight to `Unlocked` with an empty vault.
    pub fn begin_unlock(&mut self, passphrase: Passphrase) -> Result<(), UnlockError> {
        self.lock();
        match self.store.fetch()? {
            None => {
                debug!("nothing stored, opening an empty vault");
                self.state = State::Unlocked {
                    vault: Vault::new(),
                    passphrase,
                };
            }
            Some(envelope) => {
                self.state = State::Unlocking(PendingUnlock::spawn(envelope, passphrase));
            }
        }
        Ok(())
    }

    /// Wait for a pending unlock; on failure the session is `Locked` again
    pub fn finish_unlock(&mut self) -> Result<(), UnlockError> {
        match std::mem::replace(&mut self.state, State::Locked) {
            State::Unlocking(pending) => {
                let (vault, passphrase) = pending.wait()?;
                info!(entries = vault.len(), "vault unlocked");
                self.state = State::Unlocked { vault, passphrase };
                Ok(())
            }
            unlocked @ State::Unlocked { .. } => {
                self.state = unlocked;
                Ok(())
            }
            State::Locked => Err(UnlockError::Interrupted),
        }
    }

    /// Finish the pending unlock only if the worker is already done
    pub fn poll_unlock(&mut self) -> Result<SessionState, UnlockError> {
        if let State::Unlocking(pending) = &self.state {
            if pending.is_finished() {
                self.finish_unlock()?;
            }
        }
        Ok(self.state())
    }

    /// Abandon a pending unlock; its result is discarded when it lands
    pub fn cancel_unlock(&mut self) {
        if let State::Unlocking(_) = self.state {
            debug!("unlock cancelled");
            self.state = State::Locked;
        }
    }

    pub fn vault(&self) -> Result<&Vault, CoreError> {
        match &self.state {
            State::Unlocked { vault, .. } => Ok(vault),
            _ => Err(CoreError::Locked),
        }
    }

    pub fn vault_mut(&mut self) -> Result<&mut Vault, CoreError> {
        match &mut self.state {
            State::Unlocked { vault, .. } => Ok(vault),
            _ => Err(CoreError::Locked),
        }
    }

    /// Re-seal the resident vault under the session passphrase and store it
    pub fn save(&self) -> Result<Envelope, CoreError> {
        match &self.state {
            State::Unlocked { vault, passphrase } => self.store.save(vault, passphrase),
            _ => Err(CoreError::Locked),
        }
    }

    /// Re-seal under `new_passphrase` (fresh salt and nonce) and keep using it
    pub fn change_passphrase(&mut self, new_passphrase: Passphrase) -> Result<Envelope, CoreError> {
        let State::Unlocked { vault, passphrase } = &mut self.state else {
            return Err(CoreError::Locked);
        };
        let sealed = self.store.seal(vault, &new_passphrase)?;
        self.store.storage().put(&envelope::encode(&sealed)?)?;
        *passphrase = new_passphrase;
        info!("master passphrase changed");
        Ok(sealed)
    }

    /// Drop the vault and passphrase; both are wiped on drop
    pub fn lock(&mut self) {
        if !matches!(self.state, State::Locked) {
            debug!("session locked");
        }
        self.state = State::Locked;
    }
}
