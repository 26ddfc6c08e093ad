// src/envelope/codec.rs
//! JSON transport form of the envelope
//!
//! ```json
//! {
//!   "version": 1,
//!   "kdf": {"name": "PBKDF2-HMAC-SHA512", "iterations": 310000, "salt": "<base64>"},
//!   "cipher": {"name": "AES-256-GCM", "nonce": "<base64>", "payload": "<base64>"},
//!   "checksum": "<hex-sha256>"
//! }
//! ```
//!
//! Every field is mandatory. The checksum is lowercase hex. Base64 is the standard padded alphabet and is
//! decoded strictly.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CipherParams, Envelope, ExtraFields, KdfParams};
use crate::consts::{ENVELOPE_VERSION, NONCE_LEN, SALT_LEN};
use crate::enums::{CipherAlgorithm, KdfAlgorithm};
use crate::error::EnvelopeError;

#[derive(Serialize, Deserialize)]
struct WireKdf {
    name: KdfAlgorithm,
    iterations: u64,
    salt: String,
    #[serde(flatten)]
    extra: ExtraFields,
}

#[derive(Serialize, Deserialize)]
struct WireCipher {
    name: CipherAlgorithm,
    nonce: String,
    payload: String,
    #[serde(flatten)]
    extra: ExtraFields,
}

#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    version: u64,
    kdf: WireKdf,
    cipher: WireCipher,
    checksum: String,
    #[serde(flatten)]
    extra: ExtraFields,
}

fn malformed(reason: impl Into<String>) -> EnvelopeError {
    EnvelopeError::Malformed(reason.into())
}

/// Encode an envelope into its pretty-printed JSON transport form
pub fn encode(envelope: &Envelope) -> Result<String, EnvelopeError> {
    let wire = WireEnvelope {
        version: envelope.version,
        kdf: WireKdf {
            name: envelope.kdf.algorithm,
            iterations: u64::from(envelope.kdf.iterations),
            salt: STANDARD.encode(envelope.kdf.salt),
            extra: envelope.kdf.extra.clone(),
        },
        cipher: WireCipher {
            name: envelope.cipher.algorithm,
            nonce: STANDARD.encode(envelope.cipher.nonce),
            payload: STANDARD.encode(&envelope.cipher.payload),
            extra: envelope.cipher.extra.clone(),
        },
        checksum: envelope.checksum.clone(),
        extra: envelope.extra.clone(),
    };
    serde_json::to_string_pretty(&wire).map_err(|e| malformed(e.to_string()))
}

/// Decode the transport form, rejecting anything not exactly right
pub fn decode(text: &str) -> Result<Envelope, EnvelopeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| malformed(format!("not valid JSON: {e}")))?;

    // Version first: a future format may not look like this one at all
    let version = value
        .get("version")
        .ok_or_else(|| malformed("missing field `version`"))?
        .as_u64()
        .ok_or_else(|| malformed("`version` is not an unsigned integer"))?;
    if version != ENVELOPE_VERSION {
        return Err(malformed(format!("unsupported envelope version {version}")));
    }

    let wire: WireEnvelope =
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;

    let iterations = u32::try_from(wire.kdf.iterations)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| malformed(format!("invalid kdf.iterations {}", wire.kdf.iterations)))?;

    let salt: [u8; SALT_LEN] = decode_fixed(&wire.kdf.salt, "kdf.salt")?;
    let nonce: [u8; NONCE_LEN] = decode_fixed(&wire.cipher.nonce, "cipher.nonce")?;
    let payload = decode_b64(&wire.cipher.payload, "cipher.payload")?;

    let envelope = Envelope {
        version,
        kdf: KdfParams {
            algorithm: wire.kdf.name,
            iterations,
            salt,
            extra: wire.kdf.extra,
        },
        cipher: CipherParams {
            algorithm: wire.cipher.name,
            nonce,
            payload,
            extra: wire.cipher.extra,
        },
        checksum: wire.checksum,
        extra: wire.extra,
    };
    envelope.validate()?;
    Ok(envelope)
}

fn decode_b64(text: &str, field: &str) -> Result<Vec<u8>, EnvelopeError> {
    STANDARD
        .decode(text)
        .map_err(|e| malformed(format!("{field} is not valid base64: {e}")))
}

fn decode_fixed<const N: usize>(text: &str, field: &str) -> Result<[u8; N], EnvelopeError> {
    let bytes = decode_b64(text, field)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| malformed(format!("{field} must be {N} bytes, got {len}")))
}
