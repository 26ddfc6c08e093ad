// src/storage.rs
//! Where encoded envelopes live
//!
//! Storage never decrypts anything: it moves an opaque text blob in and out.
//! Concurrent writers are not merged; the last `put` wins.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StorageError;

/// Opaque envelope store for a single account/vault
pub trait EnvelopeStorage {
    /// The stored envelope text, or `None` when nothing was ever stored
    fn get(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored envelope text
    fn put(&self, envelope: &str) -> Result<(), StorageError>;

    /// True when a non-blank envelope is stored
    fn exists(&self) -> Result<bool, StorageError> {
        Ok(self.get()?.is_some_and(|text| !text.trim().is_empty()))
    }
}

/// Envelope kept in a single file, replaced atomically on every write
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EnvelopeStorage for FileStorage {
    fn get(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, envelope: &str) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        // Temp file in the same directory so the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(envelope.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), bytes = envelope.len(), "stored envelope");
        Ok(())
    }
}

/// In-process storage, mostly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_envelope(envelope: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(envelope.into())),
        }
    }
}

impl EnvelopeStorage for MemoryStorage {
    fn get(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .blob
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn put(&self, envelope: &str) -> Result<(), StorageError> {
        *self
            .blob
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(envelope.to_owned());
        Ok(())
    }
}

impl<S: EnvelopeStorage + ?Sized> EnvelopeStorage for &S {
    fn get(&self) -> Result<Option<String>, StorageError> {
        (**self).get()
    }

    fn put(&self, envelope: &str) -> Result<(), StorageError> {
        (**self).put(envelope)
    }
}
