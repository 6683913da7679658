//! Tag identifiers
//!
//! ID Format: `tag-{7-char-hash}-{sequence}` (e.g., `tag-7f2b4c1-3`)
//!
//! The hash is derived from the tag name and its creation timestamp. The
//! sequence is a process-wide counter, so every ID handed out in a session
//! is distinct even when the truncated hashes collide.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PREFIX: &str = "tag-";
const HASH_LEN: usize = 7;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid tag ID format: expected 'tag-{{7-char-hash}}-{{sequence}}', got '{0}'")]
    InvalidTagId(String),
}

/// Generates a 7-character hash from name and timestamp
fn generate_hash(name: &str, timestamp: NaiveDateTime) -> String {
    let nanos = timestamp.and_utc().timestamp_nanos_opt().unwrap_or(0);
    let input = format!("{}{}", name, nanos);
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..HASH_LEN].to_string()
}

/// Tag ID in the format `tag-{7-char-hash}-{sequence}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagId {
    hash: String,
    sequence: u64,
}

impl TagId {
    /// Creates a new tag ID from a name and creation timestamp
    pub fn new(name: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            hash: generate_hash(name, timestamp),
            sequence: SEQUENCE.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", PREFIX, self.hash, self.sequence)
    }
}

impl FromStr for TagId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || IdError::InvalidTagId(s.to_string());

        let (hash, sequence) = s
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.split_once('-'))
            .ok_or_else(invalid)?;

        if hash.len() != HASH_LEN || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        if sequence.is_empty() || !sequence.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence = sequence.parse().map_err(|_| invalid())?;

        Ok(Self {
            hash: hash.to_string(),
            sequence,
        })
    }
}

impl TryFrom<String> for TagId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TagId> for String {
    fn from(id: TagId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn tag_id_format_is_correct() {
        let id = TagId::new("urgent", noon());
        let s = id.to_string();

        assert!(s.starts_with("tag-"));
        let (hash, sequence) = s["tag-".len()..].split_once('-').unwrap();
        assert_eq!(hash.len(), 7);
        assert!(sequence.parse::<u64>().is_ok());
    }

    #[test]
    fn same_name_and_time_still_unique() {
        let id1 = TagId::new("urgent", noon());
        let id2 = TagId::new("urgent", noon());

        assert_ne!(id1, id2);
    }

    #[test]
    fn many_ids_for_one_name_never_repeat() {
        let mut seen = HashSet::new();
        for _ in 0..100_000 {
            let id = TagId::new("urgent", noon());
            assert!(seen.insert(id.to_string()), "duplicate tag id: {}", id);
        }
    }

    #[test]
    fn tag_id_parses_correctly() {
        let original = TagId::new("work", noon());
        let parsed: TagId = original.to_string().parse().unwrap();

        assert_eq!(original, parsed);
    }

    #[test]
    fn tag_id_rejects_invalid_format() {
        assert!("invalid".parse::<TagId>().is_err());
        assert!("tag-short-1".parse::<TagId>().is_err());
        assert!("tag-toolonggg-1".parse::<TagId>().is_err());
        assert!("tag-gggggg1-1".parse::<TagId>().is_err()); // 'g' is not hex
        assert!("tag-1234567".parse::<TagId>().is_err()); // no sequence
        assert!("tag-1234567-".parse::<TagId>().is_err());
        assert!("tag-1234567-x".parse::<TagId>().is_err());
        assert!("tag-1234567-+1".parse::<TagId>().is_err());
        assert!("t-1234567-1".parse::<TagId>().is_err());
        assert!("tag-7f2b4c1-3".parse::<TagId>().is_ok());
    }

    #[test]
    fn serde_roundtrip_tag_id() {
        let original = TagId::new("home", noon());
        let json = serde_json::to_string(&original).unwrap();
        let parsed: TagId = serde_json::from_str(&json).unwrap();

        assert_eq!(original, parsed);
    }
}
