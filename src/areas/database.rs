//! Object store
//!
//! Commit objects live as flat files named by their full id directly under
//! `.dotgit/objects`. Nothing is cached in memory between invocations; every
//! read goes back to disk.

use crate::artifacts::core::errors::RepositoryError;
use crate::artifacts::core::write_atomically;
use crate::artifacts::objects::commit::{CommitObject, FileSnapshot};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::CommitId;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Shortest prefix accepted when resolving an abbreviated id
pub const MIN_PREFIX_LENGTH: usize = 4;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Build a commit from the staged files and persist it
    ///
    /// Fails with `NothingToCommit` when `files` is empty, writing nothing.
    /// Staging is left untouched; clearing it is the caller's second phase.
    pub fn commit(
        &self,
        files: Vec<FileSnapshot>,
        message: &str,
        timestamp: DateTime<FixedOffset>,
    ) -> anyhow::Result<CommitId> {
        if files.is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let commit = CommitObject::new(message.to_string(), timestamp, files)?;
        self.store(&commit)?;
        info!(id = %commit.id(), files = commit.files().len(), "stored commit object");

        Ok(commit.id().clone())
    }

    /// Write the object unless one with the same id already exists
    pub fn store(&self, commit: &CommitObject) -> anyhow::Result<()> {
        let object_path = self.path.join(commit.id().to_path());

        if object_path.exists() {
            debug!(id = %commit.id(), "object already stored");
            return Ok(());
        }

        let object_content = commit.serialize()?;
        write_atomically(&object_path, &object_content)
            .with_context(|| format!("Unable to write object file {}", object_path.display()))
    }

    /// Ids of every stored object, in directory-listing order
    ///
    /// The order is whatever the filesystem returns and is not chronological;
    /// entries that are not object files (`info/`, `pack/`, temp files) are
    /// skipped.
    pub fn list(&self) -> anyhow::Result<Vec<CommitId>> {
        let entries = std::fs::read_dir(&self.path).with_context(|| {
            format!("Unable to list objects directory {}", self.path.display())
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.context("Unable to read objects directory entry")?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            if let Ok(id) = CommitId::try_parse(entry.file_name().to_string_lossy().to_string()) {
                ids.push(id);
            }
        }

        Ok(ids)
    }

    /// Load and validate one commit object
    ///
    /// Fails with `NotFound` when no object exists for `id` and with
    /// `CorruptObject` when the stored bytes do not parse or do not hash back
    /// to `id`.
    pub fn read(&self, id: &CommitId) -> anyhow::Result<CommitObject> {
        let object_path = self.path.join(id.to_path());
        let content = std::fs::read(&object_path)
            .map_err(|error| RepositoryError::from_io(error, format!("object {id}")))?;

        Self::parse_object(id, content.into())
    }

    fn parse_object(id: &CommitId, content: Bytes) -> anyhow::Result<CommitObject> {
        let corrupt = |reason: anyhow::Error| RepositoryError::CorruptObject {
            id: id.to_string(),
            reason: format!("{reason:#}"),
        };

        let commit = CommitObject::deserialize(Cursor::new(content)).map_err(corrupt)?;
        commit.verify().map_err(corrupt)?;

        if commit.id() != id {
            return Err(corrupt(anyhow::anyhow!("object records id {}", commit.id())).into());
        }

        Ok(commit)
    }

    /// Find all objects whose id starts with the given prefix.
    ///
    /// # Returns
    ///
    /// A vector of all matching ids. If multiple matches are found, all are
    /// returned (indicating an ambiguous prefix).
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<CommitId>> {
        let prefix = prefix.to_ascii_lowercase();

        Ok(self
            .list()?
            .into_iter()
            .filter(|id| id.as_ref().starts_with(&prefix))
            .collect())
    }

    /// Resolve a full or abbreviated id to exactly one stored object
    pub fn resolve(&self, revision: &str) -> anyhow::Result<CommitId> {
        if let Ok(id) = CommitId::try_parse(revision.to_string()) {
            return Ok(id);
        }

        if revision.len() < MIN_PREFIX_LENGTH || !revision.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("not a valid object name: {revision}");
        }

        let mut matches = self.find_objects_by_prefix(revision)?;
        match matches.len() {
            0 => Err(RepositoryError::NotFound(format!("object {revision}")).into()),
            1 => Ok(matches.remove(0)),
            _ => {
                matches.sort();
                let candidates = matches
                    .iter()
                    .map(|id| format!("  {}", id.to_short_oid()))
                    .collect::<Vec<_>>()
                    .join("\n");
                anyhow::bail!("short object id {revision} is ambiguous\ncandidates:\n{candidates}")
            }
        }
    }
}
