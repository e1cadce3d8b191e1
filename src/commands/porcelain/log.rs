use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::CommitId;
use std::io::Write;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Sort by embedded timestamp, oldest first, instead of listing order
    pub date_order: bool,
}

/// A stored object that could not be read back
#[derive(Debug)]
pub struct LogFailure {
    pub id: CommitId,
    pub error: anyhow::Error,
}

impl Repository {
    /// Print every stored commit with its message, date and file sizes
    ///
    /// By default commits appear in the object directory's listing order,
    /// which is not chronological and may differ between filesystems. An
    /// object that fails to read is returned in the failure list and the
    /// remaining commits are still printed.
    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<Vec<LogFailure>> {
        let mut commits = Vec::new();
        let mut failures = Vec::new();

        for id in self.database().list()? {
            match self.database().read(&id) {
                Ok(commit) => commits.push(commit),
                Err(error) => {
                    warn!(id = %id, error = %error, "skipping unreadable object");
                    failures.push(LogFailure { id, error });
                }
            }
        }

        if opts.date_order {
            commits.sort_by_key(|commit| *commit.timestamp());
        }

        for (position, commit) in commits.iter().enumerate() {
            if position > 0 {
                writeln!(self.writer())?;
            }
            writeln!(self.writer(), "{}", commit.display())?;
        }

        Ok(failures)
    }
}
