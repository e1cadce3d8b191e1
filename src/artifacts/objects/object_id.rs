//! Commit identifier (SHA-1 hash)
//!
//! Ids are 40-character lowercase hexadecimal strings. Every stored object is
//! a flat file named by its full id directly under `.dotgit/objects`, with no
//! two-level sharding.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Commit identifier (SHA-1 hash)
///
/// Always derived from an object's canonical encoding, never assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    /// Parse and validate a commit id from a string
    ///
    /// # Returns
    ///
    /// Validated CommitId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an id from a raw digest
    pub fn from_digest(digest: &[u8]) -> anyhow::Result<Self> {
        let hex = digest
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>();

        Self::try_parse(hex)
    }

    /// File name of the object inside the objects directory
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl TryFrom<String> for CommitId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(value)
    }
}

impl From<CommitId> for String {
    fn from(value: CommitId) -> Self {
        value.0
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    proptest! {
        #[test]
        fn test_valid_hex_ids_parse(id in "[0-9a-f]{40}") {
            let parsed = CommitId::try_parse(id.clone()).unwrap();
            assert_eq!(parsed.as_ref(), id);
            assert_eq!(parsed.to_short_oid(), &id[..7]);
        }

        #[test]
        fn test_wrong_length_ids_are_rejected(id in "[0-9a-f]{1,39}") {
            assert!(CommitId::try_parse(id).is_err());
        }
    }

    #[test]
    fn test_non_hex_id_is_rejected() {
        let id = "g".repeat(OBJECT_ID_LENGTH);
        assert!(CommitId::try_parse(id).is_err());
    }

    #[test]
    fn test_uppercase_id_is_normalized() {
        let id = "ABCDEF0123".repeat(4);
        let parsed = CommitId::try_parse(id.clone()).unwrap();
        assert_eq!(parsed.as_ref(), id.to_ascii_lowercase());
    }

    #[test]
    fn test_from_digest_renders_lowercase_hex() {
        let digest = [0xABu8; 20];
        let id = CommitId::from_digest(&digest).unwrap();
        assert_eq!(id.as_ref(), "ab".repeat(20));
    }

    #[test]
    fn test_deserializing_invalid_id_fails() {
        let parsed = serde_json::from_str::<CommitId>("\"not-an-id\"");
        assert!(parsed.is_err());
    }
}
