// src/vault/model.rs
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use zeroize::Zeroize;

use crate::consts::{
    DEFAULT_PASSWORD_LENGTH, ENTRY_ID_BYTES, META_CREATED_AT, META_DEFAULT_PASSWORD_LENGTH,
    META_UPDATED_AT,
};
use crate::crypto::random_hex;
use crate::error::VaultError;

fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// RFC 3339, or ISO 8601 without an offset (read as UTC)
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_timestamp(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp {text:?}")))
}

fn now_rfc3339() -> String {
    now_utc().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Opaque entry identifier: 96 random bits as 24 hex characters
///
/// Collisions are not ruled out by the generator; [`Vault`] enforces uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(random_hex(ENTRY_ID_BYTES))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entry's password: masked in `Debug`, wiped on drop
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryPassword(String);

impl EntryPassword {
    pub const MASK: &'static str = "********";

    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Explicit opt-in to the cleartext value
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EntryPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryPassword({})", Self::MASK)
    }
}

impl Drop for EntryPassword {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A single credential record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultEntry {
    pub entry_id: EntryId,
    pub service: String,
    pub username: String,
    pub password: EntryPassword,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "now_utc", deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "now_utc", deserialize_with = "lenient_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl VaultEntry {
    pub fn new(
        service: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = now_utc();
        Self {
            entry_id: EntryId::generate(),
            service: service.into(),
            username: username.into(),
            password: EntryPassword::new(password),
            notes: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Tags behave like a set; first occurrence wins
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            let tag = tag.into();
            if !tag.is_empty() && !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    /// Case-insensitive match on service, username and tags
    pub fn matches(&self, keyword: Option<&str>) -> bool {
        let Some(keyword) = keyword.filter(|k| !k.is_empty()) else {
            return true;
        };
        let haystack = format!("{}|{}|{}", self.service, self.username, self.tags.join(" "));
        haystack.to_lowercase().contains(&keyword.to_lowercase())
    }

    fn touch(&mut self) {
        self.updated_at = now_utc();
    }
}

#[derive(Deserialize)]
struct RawVault {
    #[serde(default)]
    entries: Vec<VaultEntry>,
    #[serde(default, deserialize_with = "meta_from_wire")]
    meta: BTreeMap<String, String>,
}

/// The decrypted vault: ordered entries plus open-ended string metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVault")]
pub struct Vault {
    entries: Vec<VaultEntry>,
    meta: BTreeMap<String, String>,
}

impl TryFrom<RawVault> for Vault {
    type Error = VaultError;

    fn try_from(raw: RawVault) -> Result<Self, Self::Error> {
        Vault::from_parts(raw.entries, raw.meta)
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

impl Vault {
    /// Empty vault with fresh metadata
    pub fn new() -> Self {
        let now = now_rfc3339();
        let meta = BTreeMap::from([
            (META_CREATED_AT.to_owned(), now.clone()),
            (META_UPDATED_AT.to_owned(), now),
            (
                META_DEFAULT_PASSWORD_LENGTH.to_owned(),
                DEFAULT_PASSWORD_LENGTH.to_string(),
            ),
        ]);
        Self {
            entries: Vec::new(),
            meta,
        }
    }

    /// Build a vault from existing parts, rejecting duplicate entry ids
    pub fn from_parts(
        entries: Vec<VaultEntry>,
        meta: BTreeMap<String, String>,
    ) -> Result<Self, VaultError> {
        let mut vault = Self {
            entries: Vec::with_capacity(entries.len()),
            meta,
        };
        for entry in entries {
            if vault.position(entry.entry_id.as_str()).is_some() {
                return Err(VaultError::DuplicateEntry(entry.entry_id.to_string()));
            }
            vault.entries.push(entry);
        }
        Ok(vault)
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[VaultEntry] {
        &self.entries
    }

    pub fn meta(&self) -> &BTreeMap<String, String> {
        &self.meta
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add_entry(&mut self, entry: VaultEntry) -> Result<&VaultEntry, VaultError> {
        if self.position(entry.entry_id.as_str()).is_some() {
            return Err(VaultError::DuplicateEntry(entry.entry_id.to_string()));
        }
        self.entries.push(entry);
        self.touch();
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn get_entry(&self, entry_id: &str) -> Result<&VaultEntry, VaultError> {
        self.position(entry_id)
            .map(|idx| &self.entries[idx])
            .ok_or_else(|| VaultError::EntryNotFound(entry_id.to_owned()))
    }

    /// Edit an entry in place; the id cannot be changed and timestamps are bumped
    pub fn update_entry<F>(&mut self, entry_id: &str, edit: F) -> Result<&VaultEntry, VaultError>
    where
        F: FnOnce(&mut VaultEntry),
    {
        let idx = self
            .position(entry_id)
            .ok_or_else(|| VaultError::EntryNotFound(entry_id.to_owned()))?;
        let entry = &mut self.entries[idx];
        let original_id = entry.entry_id.clone();
        let created_at = entry.created_at;
        edit(entry);
        entry.entry_id = original_id;
        entry.created_at = created_at;
        entry.touch();
        self.touch();
        Ok(&self.entries[idx])
    }

    pub fn update_password(
        &mut self,
        entry_id: &str,
        password: impl Into<String>,
    ) -> Result<&VaultEntry, VaultError> {
        let password = EntryPassword::new(password);
        self.update_entry(entry_id, |entry| entry.password = password)
    }

    pub fn delete_entry(&mut self, entry_id: &str) -> Result<VaultEntry, VaultError> {
        let idx = self
            .position(entry_id)
            .ok_or_else(|| VaultError::EntryNotFound(entry_id.to_owned()))?;
        let entry = self.entries.remove(idx);
        self.touch();
        Ok(entry)
    }

    /// Matching entries sorted by service, then username (case-insensitive)
    pub fn list_entries(&self, keyword: Option<&str>) -> Vec<&VaultEntry> {
        let mut found: Vec<&VaultEntry> =
            self.entries.iter().filter(|e| e.matches(keyword)).collect();
        found.sort_by_cached_key(|e| (e.service.to_lowercase(), e.username.to_lowercase()));
        found
    }

    pub fn find_by_service(&self, service: &str) -> Vec<&VaultEntry> {
        let service = service.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.service.to_lowercase() == service)
            .collect()
    }

    fn position(&self, entry_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.entry_id.as_str() == entry_id)
    }

    fn touch(&mut self) {
        self.meta.insert(META_UPDATED_AT.to_owned(), now_rfc3339());
    }
}

/// Older clients store some meta values as numbers; keep them as text
fn meta_from_wire<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}
