// src/crypto/kdf.rs
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroize;

use crate::aliases::DerivedKey32;
use crate::consts::{KEY_LEN, SALT_LEN};
use crate::error::EnvelopeError;

/// Derive the 256-bit envelope key with PBKDF2-HMAC-SHA512
///
/// `iterations` comes from the envelope being opened (or the configured
/// policy when sealing) and is never replaced by a compile-time constant.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<DerivedKey32, EnvelopeError> {
    if salt.len() != SALT_LEN {
        return Err(EnvelopeError::KeyDerivation("salt must be exactly 16 bytes"));
    }
    if iterations == 0 {
        return Err(EnvelopeError::KeyDerivation("iteration count must be positive"));
    }

    let mut out = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(passphrase, salt, iterations, &mut out);
    let key = DerivedKey32::new(out);
    out.zeroize();
    Ok(key)
}
