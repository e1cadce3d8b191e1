//! Commit object
//!
//! A commit is an immutable record of a message, a timestamp and the file
//! snapshots that were staged when it was created.
//!
//! ## Format
//!
//! On disk (`.dotgit/objects/<id>`):
//! ```text
//! {"id":"<sha1>","message":"first","timestamp":"<rfc3339>",
//!  "files":[{"path":"a.txt","content":"<base64>","size":5,"stagedAt":"<rfc3339>"}]}
//! ```
//!
//! The id is the SHA-1 of the same JSON without the `id` field.

use crate::artifacts::index::staged_entry::{StagedEntry, base64_content};
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::CommitId;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::warn;

/// Environment variable pinning the commit timestamp
pub const COMMIT_DATE_ENV: &str = "DOTGIT_COMMIT_DATE";

/// A staged file copied verbatim into a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSnapshot {
    pub path: String,
    #[serde(with = "base64_content")]
    pub content: Vec<u8>,
    pub size: u64,
    pub staged_at: DateTime<FixedOffset>,
}

impl FileSnapshot {
    pub fn from_staged(path: &str, entry: &StagedEntry) -> Self {
        FileSnapshot {
            path: path.to_string(),
            content: entry.content.clone(),
            size: entry.size,
            staged_at: entry.staged_at,
        }
    }
}

/// Field order here is the canonical encoding.
#[derive(Serialize)]
struct CanonicalCommit<'c> {
    message: &'c str,
    timestamp: &'c DateTime<FixedOffset>,
    files: &'c [FileSnapshot],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitObject {
    id: CommitId,
    message: String,
    timestamp: DateTime<FixedOffset>,
    files: Vec<FileSnapshot>,
}

impl CommitObject {
    /// Build a commit and derive its id from the content
    ///
    /// A blank message is rejected, since `deserialize` would refuse it.
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        files: Vec<FileSnapshot>,
    ) -> anyhow::Result<Self> {
        if message.trim().is_empty() {
            anyhow::bail!("commit message is empty");
        }

        let mut commit = CommitObject {
            id: CommitId::default(),
            message,
            timestamp,
            files,
        };
        commit.id = commit.object_id()?;

        Ok(commit)
    }

    pub fn id(&self) -> &CommitId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &DateTime<FixedOffset> {
        &self.timestamp
    }

    pub fn files(&self) -> &[FileSnapshot] {
        &self.files
    }

    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// Date in the same shape `git log` prints it
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    /// Check the stored id and file sizes against the content
    pub fn verify(&self) -> anyhow::Result<()> {
        if let Some(file) = self.files.iter().find(|file| file.size != file.content.len() as u64) {
            anyhow::bail!(
                "file {} records size {} but holds {} bytes",
                file.path,
                file.size,
                file.content.len()
            );
        }

        let computed = self.object_id()?;
        if computed != self.id {
            anyhow::bail!("content hashes to {}", computed);
        }

        Ok(())
    }

    /// Fixed timestamp from `DOTGIT_COMMIT_DATE`, if set and parseable
    pub fn timestamp_from_env() -> Option<DateTime<FixedOffset>> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| Self::parse_commit_date(&date_str))
    }

    /// Accepts RFC 3339 or `%Y-%m-%d %H:%M:%S %z`; anything else is logged and
    /// dropped so the caller falls back to the current time.
    pub fn parse_commit_date(date_str: &str) -> Option<DateTime<FixedOffset>> {
        let parsed = DateTime::parse_from_rfc3339(date_str)
            .or_else(|_| DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S %z"));

        match parsed {
            Ok(timestamp) => Some(timestamp),
            Err(error) => {
                warn!(value = date_str, %error, "ignoring unparseable {}", COMMIT_DATE_ENV);
                None
            }
        }
    }
}

impl Packable for CommitObject {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = serde_json::to_vec(self).context("Unable to serialize commit object")?;
        Ok(content.into())
    }
}

impl Unpackable for CommitObject {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let commit: CommitObject =
            serde_json::from_reader(reader).context("Unable to parse commit object")?;

        if commit.message.trim().is_empty() {
            anyhow::bail!("commit message is empty");
        }

        Ok(commit)
    }
}

impl Object for CommitObject {
    fn canonical_bytes(&self) -> anyhow::Result<Bytes> {
        let canonical = CanonicalCommit {
            message: &self.message,
            timestamp: &self.timestamp,
            files: &self.files,
        };

        let content =
            serde_json::to_vec(&canonical).context("Unable to encode commit for hashing")?;
        Ok(content.into())
    }

    fn display(&self) -> String {
        let mut lines = vec![
            format!("commit {}", self.id),
            format!("Date:   {}", self.readable_timestamp()),
            String::new(),
        ];
        lines.extend(self.message.lines().map(|line| format!("    {line}")));
        lines.push(String::new());
        lines.extend(
            self.files
                .iter()
                .map(|file| format!("    {} ({} bytes)", file.path, file.size)),
        );

        lines.join("\n")
    }
}
