use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::ignore::ignore_rules::IgnoreRules;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// A path argument that could not be staged
#[derive(Debug)]
pub struct AddFailure {
    pub path: String,
    pub error: anyhow::Error,
}

impl Repository {
    /// Stage every file named by `paths`, expanding directories
    ///
    /// Each argument is handled on its own: a failing path is returned in the
    /// failure list and the remaining paths are still staged. Every staged
    /// file is persisted before the next one is read.
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<Vec<AddFailure>> {
        let _lock = self.lock()?;
        let ignore_rules = self.ignore_rules()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let mut failures = Vec::new();
        for path in paths {
            if let Err(error) = self.add_path(&mut index, Path::new(path), &ignore_rules) {
                debug!(path = %path, error = %error, "failed to stage path");
                failures.push(AddFailure {
                    path: path.clone(),
                    error,
                });
            }
        }

        Ok(failures)
    }

    fn add_path(
        &self,
        index: &mut Index,
        path: &Path,
        ignore_rules: &IgnoreRules,
    ) -> anyhow::Result<()> {
        let absolute_path = self.workspace().resolve(path)?;
        let relative_path = self.workspace().relative_path(&absolute_path)?;

        if ignore_rules.is_ignored(&relative_path, absolute_path.is_dir()) {
            anyhow::bail!("'{}' is ignored", path.display());
        }

        for file in self.workspace().list_files(&absolute_path, ignore_rules)? {
            let content = self.workspace().read_file(&file)?;
            let key = Workspace::to_key(&file);

            let entry = index.add_entry(key.clone(), content)?;
            writeln!(self.writer(), "staged {} ({} bytes)", key, entry.size)?;
        }

        Ok(())
    }
}
