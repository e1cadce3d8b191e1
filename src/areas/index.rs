//! Staging area
//!
//! The index holds the files marked for the next commit, keyed by their
//! repository-relative path. It is loaded fresh at the start of every `add`
//! and `commit`, mutated in memory, and written back wholesale after each
//! mutation so a crash mid-`add` loses at most the file in flight.
//!
//! ## Data Structures
//!
//! - `entries`: path to staged snapshot, ordered by path. The order is the
//!   order files appear in a commit.

use crate::artifacts::core::errors::RepositoryError;
use crate::artifacts::core::write_atomically;
use crate::artifacts::index::staged_entry::StagedEntry;
use crate::artifacts::objects::commit::FileSnapshot;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Staging area
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.dotgit/index`)
    path: Box<Path>,
    /// Staged files mapped by path
    entries: BTreeMap<String, StagedEntry>,
}

impl Index {
    /// Create a new empty index
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the index file (typically `.dotgit/index`)
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
        }
    }

    /// Create an index and load it from disk
    pub fn load(path: Box<Path>) -> anyhow::Result<Self> {
        let mut index = Index::new(path);
        index.rehydrate()?;
        Ok(index)
    }

    /// Get the path to the index file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing, empty or malformed index file yields an empty index. Only a
    /// failure to access the file itself (e.g. permissions) is an error.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();

        let content = match std::fs::read(self.path()) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no index file, starting empty");
                return Ok(());
            }
            Err(error) => {
                return Err(RepositoryError::Io(error))
                    .with_context(|| format!("Unable to read index {}", self.path.display()));
            }
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }

        match serde_json::from_slice::<Vec<(String, StagedEntry)>>(&content) {
            Ok(pairs) => {
                // a duplicated path keeps its last entry
                self.entries.extend(pairs);
                debug!(entries = self.entries.len(), "loaded index");
            }
            Err(error) => {
                warn!(path = %self.path.display(), %error, "malformed index, treating it as empty");
            }
        }

        Ok(())
    }

    /// Look up an entry by its path
    pub fn entry_by_path(&self, path: &str) -> Option<&StagedEntry> {
        self.entries.get(path)
    }

    /// Stage `content` under `path` in memory, replacing any earlier entry
    pub fn add(&mut self, path: String, content: Vec<u8>) -> &StagedEntry {
        self.entries
            .insert(path.clone(), StagedEntry::capture(content));
        &self.entries[&path]
    }

    /// Stage `content` under `path` and persist the whole index immediately
    pub fn add_entry(&mut self, path: String, content: Vec<u8>) -> anyhow::Result<StagedEntry> {
        let entry = self.add(path, content).clone();
        self.write_updates()?;

        Ok(entry)
    }

    /// Empty the index and persist the empty state
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.entries.clear();

        self.write_updates()
    }

    /// Write the index as a JSON array of `[path, entry]` pairs, replacing the
    /// previous file in a single rename
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let pairs = self.entries.iter().collect::<Vec<_>>();
        let content = serde_json::to_vec(&pairs).context("Unable to serialize index")?;

        write_atomically(self.path(), &content)
            .with_context(|| format!("Unable to write index {}", self.path.display()))?;
        debug!(entries = self.entries.len(), "wrote index");

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &StagedEntry)> {
        self.entries.iter()
    }

    /// Copy of every staged file, in commit order
    pub fn snapshot(&self) -> Vec<FileSnapshot> {
        self.entries
            .iter()
            .map(|(path, entry)| FileSnapshot::from_staged(path, entry))
            .collect()
    }
}
