// tests/vault_tests.rs
//! Vault model operations and the plaintext codec

mod common;

use std::collections::BTreeMap;

use passvault::consts::{META_CREATED_AT, META_DEFAULT_PASSWORD_LENGTH, META_UPDATED_AT};
use passvault::error::{EnvelopeError, VaultError};
use passvault::vault::{parse, serialize, EntryPassword};
use passvault::{Vault, VaultEntry};

#[test]
fn test_new_vault_is_empty_with_fresh_meta() {
    let vault = Vault::new();
    assert!(vault.is_empty());
    assert!(vault.meta().contains_key(META_CREATED_AT));
    assert!(vault.meta().contains_key(META_UPDATED_AT));
    assert_eq!(vault.meta()[META_DEFAULT_PASSWORD_LENGTH], "24");
}

#[test]
fn test_entry_ids_are_24_hex_chars_and_distinct() {
    let a = VaultEntry::new("a", "u", "p");
    let b = VaultEntry::new("a", "u", "p");
    assert_eq!(a.entry_id.as_str().len(), 24);
    assert!(a.entry_id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a.entry_id, b.entry_id);
}

#[test]
fn test_add_get_delete_entry() {
    let mut vault = Vault::new();
    let id = vault
        .add_entry(VaultEntry::new("GitHub", "octocat", "pw"))
        .unwrap()
        .entry_id
        .clone();

    assert_eq!(vault.len(), 1);
    assert_eq!(vault.get_entry(id.as_str()).unwrap().username, "octocat");

    let removed = vault.delete_entry(id.as_str()).unwrap();
    assert_eq!(removed.service, "GitHub");
    assert!(vault.is_empty());
    assert_eq!(
        vault.get_entry(id.as_str()).unwrap_err(),
        VaultError::EntryNotFound(id.to_string())
    );
    assert!(matches!(
        vault.delete_entry(id.as_str()),
        Err(VaultError::EntryNotFound(_))
    ));
}

#[test]
fn test_duplicate_entry_ids_are_rejected() {
    let mut vault = Vault::new();
    let entry = VaultEntry::new("svc", "user", "pw");
    vault.add_entry(entry.clone()).unwrap();

    assert!(matches!(
        vault.add_entry(entry.clone()),
        Err(VaultError::DuplicateEntry(_))
    ));
    assert_eq!(vault.len(), 1);

    assert!(matches!(
        Vault::from_parts(vec![entry.clone(), entry], BTreeMap::new()),
        Err(VaultError::DuplicateEntry(_))
    ));
}

#[test]
fn test_update_entry_keeps_id_and_created_at() {
    let mut vault = common::sample_vault();
    let original = vault.entries()[0].clone();
    let id = original.entry_id.as_str().to_owned();

    let updated = vault
        .update_entry(&id, |entry| {
            entry.username = "monalisa".into();
            entry.entry_id = "attempted-change".into();
        })
        .unwrap()
        .clone();

    assert_eq!(updated.entry_id, original.entry_id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.username, "monalisa");
    assert!(updated.updated_at >= original.updated_at);

    vault.update_password(&id, "new-password").unwrap();
    assert_eq!(vault.get_entry(&id).unwrap().password.reveal(), "new-password");

    assert!(matches!(
        vault.update_password("missing", "x"),
        Err(VaultError::EntryNotFound(_))
    ));
}

#[test]
fn test_list_entries_filters_and_sorts() {
    let mut vault = Vault::new();
    vault.add_entry(VaultEntry::new("zeta", "bob", "1")).unwrap();
    vault
        .add_entry(VaultEntry::new("Alpha", "zed", "2").with_tags(["Finance"]))
        .unwrap();
    vault.add_entry(VaultEntry::new("alpha", "amy", "3")).unwrap();

    let all: Vec<(&str, &str)> = vault
        .list_entries(None)
        .iter()
        .map(|e| (e.service.as_str(), e.username.as_str()))
        .collect();
    assert_eq!(all, vec![("alpha", "amy"), ("Alpha", "zed"), ("zeta", "bob")]);

    // Insertion order is untouched
    assert_eq!(vault.entries()[0].service, "zeta");

    let finance = vault.list_entries(Some("finance"));
    assert_eq!(finance.len(), 1);
    assert_eq!(finance[0].username, "zed");

    assert_eq!(vault.list_entries(Some("BOB")).len(), 1);
    assert_eq!(vault.list_entries(Some("")).len(), 3);
    assert!(vault.list_entries(Some("nothing")).is_empty());
}

#[test]
fn test_find_by_service_is_case_insensitive_exact_match() {
    let vault = common::sample_vault();
    assert_eq!(vault.find_by_service("github").len(), 1);
    assert_eq!(vault.find_by_service("GITHUB").len(), 1);
    assert!(vault.find_by_service("git").is_empty());
}

#[test]
fn test_tags_behave_like_a_set() {
    let entry = VaultEntry::new("s", "u", "p").with_tags(["a", "b", "a", "", "c", "b"]);
    assert_eq!(entry.tags, vec!["a", "b", "c"]);
}

#[test]
fn test_password_is_masked_in_debug_output() {
    let entry = VaultEntry::new("bank", "alice", "super-secret-pin");
    let debug = format!("{entry:?}");
    assert!(!debug.contains("super-secret-pin"));
    assert!(debug.contains(EntryPassword::MASK));
    assert_eq!(entry.password.reveal(), "super-secret-pin");
}

#[test]
fn test_serialize_then_parse_preserves_structure() {
    let vault = common::sample_vault();
    let bytes = serialize(&vault).unwrap();
    let parsed = parse(bytes.expose_secret()).unwrap();
    assert_eq!(parsed, vault);
}

#[test]
fn test_parse_empty_payload_yields_empty_vault() {
    for payload in [&b""[..], &b"   "[..], &b"\n"[..]] {
        let vault = parse(payload).unwrap();
        assert!(vault.is_empty());
        assert!(vault.meta().contains_key(META_CREATED_AT));
    }
}

#[test]
fn test_parse_accepts_missing_sections_without_inventing_meta() {
    let vault = parse(br#"{"meta": {"created_at": "2024-01-01T00:00:00"}}"#).unwrap();
    assert!(vault.is_empty());
    assert_eq!(vault.meta().len(), 1);

    let vault = parse(b"{}").unwrap();
    assert!(vault.is_empty());
    assert!(vault.meta().is_empty());
}

#[test]
fn test_parse_stringifies_scalar_meta_values() {
    let vault = parse(
        br#"{"entries": [], "meta": {"default_password_length": 24, "pinned": true, "gone": null}}"#,
    )
    .unwrap();
    assert_eq!(vault.meta()["default_password_length"], "24");
    assert_eq!(vault.meta()["pinned"], "true");
    assert!(!vault.meta().contains_key("gone"));
}

#[test]
fn test_parse_accepts_entries_with_offset_timestamps_and_empty_notes() {
    let payload = br#"{"entries": [{
        "entry_id": "0123456789abcdef01234567",
        "service": "github", "username": "octocat", "password": "pw",
        "notes": "", "tags": ["work"],
        "created_at": "2024-03-01T10:00:00+04:00",
        "updated_at": "2024-03-01T10:00:00+04:00"
    }], "meta": {}}"#;
    let vault = parse(payload).unwrap();
    let entry = vault.get_entry("0123456789abcdef01234567").unwrap();
    assert_eq!(entry.notes.as_deref(), Some(""));
    assert_eq!(entry.created_at.to_rfc3339(), "2024-03-01T06:00:00+00:00");
}

#[test]
fn test_parse_rejects_garbage_and_duplicates() {
    assert!(matches!(
        parse(b"\x8f\x01garbage"),
        Err(EnvelopeError::Serialization(_))
    ));
    assert!(matches!(
        parse(br#"{"entries": "nope"}"#),
        Err(EnvelopeError::Serialization(_))
    ));

    let entry = r#"{"entry_id": "aaaaaaaaaaaaaaaaaaaaaaaa", "service": "s", "username": "u", "password": "p"}"#;
    let payload = format!(r#"{{"entries": [{entry}, {entry}], "meta": {{}}}}"#);
    assert!(matches!(
        parse(payload.as_bytes()),
        Err(EnvelopeError::Serialization(_))
    ));
}

#[test]
fn test_serialize_writes_compact_json() {
    let vault = common::sample_vault();
    let bytes = serialize(&vault).unwrap();
    assert_eq!(
        bytes.expose_secret().as_slice(),
        serde_json::to_vec(&vault).unwrap().as_slice()
    );
}

#[test]
fn test_parse_reads_timestamps_without_offset_as_utc() {
    let payload = br#"{"entries": [{
        "entry_id": "0123456789abcdef01234567",
        "service": "github", "username": "octocat", "password": "pw",
        "created_at": "2024-01-01T00:00:00",
        "updated_at": "2024-01-02 08:30:15.250"
    }], "meta": {}}"#;
    let vault = parse(payload).unwrap();
    let entry = vault.get_entry("0123456789abcdef01234567").unwrap();
    assert_eq!(entry.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    assert_eq!(entry.updated_at.timestamp(), 1_704_184_215);
}

#[test]
fn test_parse_rejects_unreadable_timestamps() {
    let payload = br#"{"entries": [{
        "entry_id": "0123456789abcdef01234567",
        "service": "github", "username": "octocat", "password": "pw",
        "created_at": "yesterday"
    }]}"#;
    assert!(matches!(
        parse(payload),
        Err(EnvelopeError::Serialization(_))
    ));
}
