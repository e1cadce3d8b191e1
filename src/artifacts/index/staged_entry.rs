use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One file queued for the next commit.
///
/// The content is captured when the file is staged; later edits to the
/// working tree do not reach the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedEntry {
    #[serde(with = "base64_content")]
    pub content: Vec<u8>,
    pub size: u64,
    pub staged_at: DateTime<FixedOffset>,
}

impl StagedEntry {
    pub fn new(content: Vec<u8>, staged_at: DateTime<FixedOffset>) -> Self {
        StagedEntry {
            size: content.len() as u64,
            content,
            staged_at,
        }
    }

    /// Capture `content` with the current local time.
    pub fn capture(content: Vec<u8>) -> Self {
        Self::new(content, chrono::Local::now().fixed_offset())
    }
}

/// Raw file bytes travel through JSON as standard base64 text.
pub(crate) mod base64_content {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(content: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(content))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
