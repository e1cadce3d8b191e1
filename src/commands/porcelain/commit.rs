use crate::areas::repository::Repository;
use crate::artifacts::core::errors::RepositoryError;
use crate::artifacts::objects::commit::CommitObject;
use crate::artifacts::objects::object_id::CommitId;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Snapshot the staging area into a new commit object, then clear staging
    ///
    /// The two steps are separate writes. A crash between them leaves the
    /// object stored and the files still staged; staging holds no pointer to
    /// the object, so nothing else is inconsistent.
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<CommitId> {
        let message = message.trim();
        if message.is_empty() {
            anyhow::bail!("aborting commit due to empty commit message");
        }

        let _lock = self.lock()?;
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;
        if index.is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let timestamp = CommitObject::timestamp_from_env()
            .unwrap_or_else(|| chrono::Local::now().fixed_offset());
        let files_count = index.len();

        let commit_id = self
            .database()
            .commit(index.snapshot(), message, timestamp)?;
        index.clear()?;
        info!(id = %commit_id, "cleared staging after commit");

        let branch = self
            .refs()
            .current_branch()?
            .map(|branch| branch.to_string())
            .unwrap_or_else(|| "detached HEAD".to_string());
        let short_message = message.lines().next().unwrap_or_default();

        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch,
            commit_id.to_short_oid(),
            short_message
        )?;
        writeln!(
            self.writer(),
            " {} file{} committed",
            files_count,
            if files_count == 1 { "" } else { "s" }
        )?;

        Ok(commit_id)
    }
}
