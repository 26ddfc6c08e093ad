// tests/envelope_tests.rs
//! Transport encoding: field presence, strict base64, version gating

mod common;

use passvault::consts::{CIPHER_NAME, KDF_NAME};
use passvault::envelope::{decode, encode, Envelope};
use passvault::error::EnvelopeError;
use serde_json::{json, Value};

fn sample_envelope() -> Envelope {
    Envelope::new(
        310_000,
        [0xAA; 16],
        [0xBB; 12],
        vec![0xCC; 40],
        "00".repeat(32),
    )
}

fn sample_json() -> Value {
    serde_json::from_str(&encode(&sample_envelope()).unwrap()).unwrap()
}

fn assert_malformed(value: &Value) {
    let result = decode(&value.to_string());
    assert!(
        matches!(result, Err(EnvelopeError::Malformed(_))),
        "expected Malformed for {value}, got {result:?}"
    );
}

#[test]
fn test_encode_produces_documented_shape() {
    let value = sample_json();

    assert_eq!(value["version"], 1);
    assert_eq!(value["kdf"]["name"], KDF_NAME);
    assert_eq!(value["kdf"]["iterations"], 310_000);
    assert_eq!(value["kdf"]["salt"], "qqqqqqqqqqqqqqqqqqqqqg==");
    assert_eq!(value["cipher"]["name"], CIPHER_NAME);
    assert_eq!(value["cipher"]["nonce"], "u7u7u7u7u7u7u7u7");
    assert_eq!(value["checksum"], "00".repeat(32));
    assert_eq!(value.as_object().unwrap().len(), 4);
}

#[test]
fn test_decode_restores_encoded_envelope() {
    let envelope = sample_envelope();
    let decoded = decode(&encode(&envelope).unwrap()).unwrap();
    assert_eq!(decoded, envelope);
}

#[test]
fn test_decode_reads_legacy_fixture() {
    let envelope = decode(common::LEGACY_ENVELOPE).unwrap();
    assert_eq!(envelope.version, 1);
    assert_eq!(envelope.kdf.iterations, 1_000);
    assert_eq!(envelope.kdf.salt, core::array::from_fn::<u8, 16, _>(|i| i as u8));
    assert_eq!(&envelope.cipher.nonce, b"defghijklmno");
}

#[test]
fn test_unknown_version_is_rejected() {
    for version in [json!(2), json!(0), json!("1"), json!(-1), json!(1.5)] {
        let mut value = sample_json();
        value["version"] = version;
        assert_malformed(&value);
    }

    let mut value = sample_json();
    value.as_object_mut().unwrap().remove("version");
    assert_malformed(&value);
}

#[test]
fn test_version_two_is_rejected_even_if_shape_differs() {
    assert_malformed(&json!({"version": 2, "blob": "whatever"}));
}

#[test]
fn test_every_mandatory_field_is_required() {
    let paths: &[&[&str]] = &[
        &["kdf"],
        &["cipher"],
        &["checksum"],
        &["kdf", "name"],
        &["kdf", "iterations"],
        &["kdf", "salt"],
        &["cipher", "name"],
        &["cipher", "nonce"],
        &["cipher", "payload"],
    ];
    for path in paths {
        let mut value = sample_json();
        let (last, parents) = path.split_last().unwrap();
        let mut target = &mut value;
        for key in parents {
            target = &mut target[*key];
        }
        target.as_object_mut().unwrap().remove(*last);
        assert_malformed(&value);
    }
}

#[test]
fn test_null_fields_are_not_defaulted() {
    let mut value = sample_json();
    value["checksum"] = Value::Null;
    assert_malformed(&value);

    let mut value = sample_json();
    value["kdf"]["salt"] = Value::Null;
    assert_malformed(&value);
}

#[test]
fn test_invalid_base64_is_rejected() {
    for (section, field) in [("kdf", "salt"), ("cipher", "nonce"), ("cipher", "payload")] {
        let mut value = sample_json();
        value[section][field] = json!("@@not base64@@");
        assert_malformed(&value);

        // URL-safe alphabet is not accepted either
        let mut value = sample_json();
        value[section][field] = json!("-_-_-_-_-_-_-_-_-_-_-_==");
        assert_malformed(&value);
    }

    // Missing padding
    let mut value = sample_json();
    value["kdf"]["salt"] = json!("qqqqqqqqqqqqqqqqqqqqqg");
    assert_malformed(&value);
}

#[test]
fn test_wrong_salt_or_nonce_length_is_rejected() {
    let mut value = sample_json();
    value["kdf"]["salt"] = json!("qqqqqqqqqqqqqqqqqqqq"); // 15 bytes
    assert_malformed(&value);

    let mut value = sample_json();
    value["cipher"]["nonce"] = json!("u7u7u7u7u7u7u7u7u7u7"); // 15 bytes
    assert_malformed(&value);
}

#[test]
fn test_payload_shorter_than_tag_is_rejected() {
    let mut value = sample_json();
    value["cipher"]["payload"] = json!("zMzMzMzMzMzMzMzMzMzM"); // 15 bytes
    assert_malformed(&value);
}

#[test]
fn test_unknown_algorithms_are_rejected() {
    let mut value = sample_json();
    value["kdf"]["name"] = json!("ARGON2ID");
    assert_malformed(&value);

    let mut value = sample_json();
    value["cipher"]["name"] = json!("CHACHA20-POLY1305");
    assert_malformed(&value);
}

#[test]
fn test_bad_iteration_counts_are_rejected() {
    for iterations in [json!(0), json!(-5), json!("310000"), json!(5_000_000_000u64)] {
        let mut value = sample_json();
        value["kdf"]["iterations"] = iterations;
        assert_malformed(&value);
    }
}

#[test]
fn test_garbage_input_is_malformed() {
    for text in ["", "null", "[]", "{", "not json"] {
        assert!(matches!(decode(text), Err(EnvelopeError::Malformed(_))));
    }
}

#[test]
fn test_unknown_fields_survive_decode_and_encode() {
    let mut value = sample_json();
    value["origin"] = json!({"device": "laptop"});
    value["kdf"]["pepper_id"] = json!(7);
    value["cipher"]["aad"] = json!("none");

    let envelope = decode(&value.to_string()).unwrap();
    assert_eq!(envelope.extra["origin"], json!({"device": "laptop"}));
    assert_eq!(envelope.kdf.extra["pepper_id"], json!(7));

    let reencoded: Value = serde_json::from_str(&encode(&envelope).unwrap()).unwrap();
    assert_eq!(reencoded, value);
}

#[test]
fn test_invalid_checksum_is_rejected() {
    let bad_checksums = [
        String::new(),
        "abcd".to_owned(),
        "not-hex!".to_owned(),
        "0".repeat(63),
        "0".repeat(66),
        "g".repeat(64),
        // Only the lowercase form that seal writes is accepted
        "AB".repeat(32),
    ];
    for bad in bad_checksums {
        let mut value = sample_json();
        value["checksum"] = json!(bad);
        assert_malformed(&value);
    }

    let mut value = sample_json();
    value["checksum"] = json!(32);
    assert_malformed(&value);
}

#[test]
fn test_validate_checks_in_memory_envelopes() {
    assert!(sample_envelope().validate().is_ok());

    let mut envelope = sample_envelope();
    envelope.version = 2;
    assert!(matches!(envelope.validate(), Err(EnvelopeError::Malformed(_))));

    let mut envelope = sample_envelope();
    envelope.checksum = "abcd".to_owned();
    assert!(matches!(envelope.validate(), Err(EnvelopeError::Malformed(_))));

    let mut envelope = sample_envelope();
    envelope.cipher.payload.truncate(15);
    assert!(matches!(envelope.validate(), Err(EnvelopeError::Malformed(_))));

    let mut envelope = sample_envelope();
    envelope.kdf.iterations = 0;
    assert!(matches!(envelope.validate(), Err(EnvelopeError::Malformed(_))));
}
