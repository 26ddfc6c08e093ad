// src/sealing.rs
//! The seal/open pipelines with precise, internal error classes
//!
//! seal:  serialize → derive → encrypt → checksum → envelope
//! open:  validate → checksum → derive → decrypt → parse
//!
//! Every secret produced along the way (derived key, serialized plaintext)
//! lives in a zeroize-on-drop container and is wiped on every exit path.

use tracing::{debug, warn};

use crate::aliases::Passphrase;
use crate::crypto::{
    compute_checksum, decrypt, derive_key, encrypt, fresh_nonce, fresh_salt, verify_checksum,
};
use crate::envelope::Envelope;
use crate::error::EnvelopeError;
use crate::vault::{self, Vault};

/// Encrypt `vault` under `passphrase` into a brand-new envelope
///
/// Salt and nonce are drawn fresh on every call, so re-sealing unchanged
/// content never reuses a (key, nonce) pair.
pub fn seal(
    vault: &Vault,
    passphrase: &Passphrase,
    iterations: u32,
) -> Result<Envelope, EnvelopeError> {
    let plaintext = vault::serialize(vault)?;
    let salt = fresh_salt();
    let nonce = fresh_nonce();

    let key = derive_key(passphrase.expose_secret().as_bytes(), &salt, iterations)?;
    let payload = encrypt(&key, &nonce, plaintext.expose_secret())?;
    drop(key);

    let checksum = compute_checksum(&payload);
    debug!(
        iterations,
        entries = vault.len(),
        payload_len = payload.len(),
        "sealed vault"
    );
    Ok(Envelope::new(iterations, salt, nonce, payload, checksum))
}

/// Verify and decrypt `envelope`, returning a fully parsed vault or nothing
pub fn open(envelope: &Envelope, passphrase: &Passphrase) -> Result<Vault, EnvelopeError> {
    let result = open_inner(envelope, passphrase);
    if let Err(err) = &result {
        warn!(class = err.class(), "failed to open vault envelope");
    }
    result
}

fn open_inner(envelope: &Envelope, passphrase: &Passphrase) -> Result<Vault, EnvelopeError> {
    envelope.validate()?;
    if !verify_checksum(&envelope.cipher.payload, &envelope.checksum) {
        return Err(EnvelopeError::Integrity);
    }

    debug!(iterations = envelope.kdf.iterations, "deriving envelope key");
    let key = derive_key(
        passphrase.expose_secret().as_bytes(),
        &envelope.kdf.salt,
        envelope.kdf.iterations,
    )?;
    let plaintext = decrypt(&key, &envelope.cipher.nonce, &envelope.cipher.payload)?;
    drop(key);

    vault::parse(plaintext.expose_secret())
}
