// src/crypto/random.rs
use rand::RngCore;

use crate::consts::{NONCE_LEN, SALT_LEN};

/// New random salt: called once per `seal`
pub fn fresh_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// New random nonce: never derived from content, counters or time
pub fn fresh_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce);
    nonce
}

/// `len` random bytes as lowercase hex (`2 * len` characters)
pub fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
