use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::config::CoreConfig;
use crate::artifacts::core::errors::RepositoryError;
use anyhow::Context;
use std::fs;
use std::io::Write;
use tracing::debug;

/// Directories laid out under `.dotgit`, parents first
const REPOSITORY_DIRECTORIES: [&str; 11] = [
    "",
    "refs",
    "refs/heads",
    "refs/tags",
    "objects",
    "objects/info",
    "objects/pack",
    "logs",
    "logs/refs/heads",
    "hooks",
    "stash",
];

impl Repository {
    /// Lay out a fresh `.dotgit` directory
    ///
    /// Re-initializing is refused: an existing `.dotgit` fails with
    /// `AlreadyExists` and is left untouched.
    pub async fn init(&mut self) -> anyhow::Result<()> {
        let repository_path = self.repository_path();
        if repository_path.exists() {
            return Err(RepositoryError::AlreadyExists(format!(
                "repository at {}",
                repository_path.display()
            ))
            .into());
        }

        for directory in REPOSITORY_DIRECTORIES {
            let directory_path = repository_path.join(directory);
            fs::create_dir_all(&directory_path).with_context(|| {
                format!("Failed to create directory {}", directory_path.display())
            })?;
        }

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        fs::write(repository_path.join("config"), CoreConfig::default().to_string())
            .context("Failed to write .dotgit/config")?;
        fs::write(repository_path.join("logs").join("HEAD"), b"")
            .context("Failed to create .dotgit/logs/HEAD")?;

        let rules = self.ignore_rules()?;
        debug!(rules = rules.rules().len(), "loaded ignore rules");

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;
        index
            .write_updates()
            .context("Failed to create .dotgit/index file")?;

        writeln!(
            self.writer(),
            "Initialized empty dotgit repository in {}",
            repository_path.display()
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn init_lays_out_the_repository() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let mut repository = Repository::new(dir.path(), Box::new(std::io::sink()))?;

        repository.init().await?;

        let root = repository.repository_path();
        for directory in REPOSITORY_DIRECTORIES {
            assert!(root.join(directory).is_dir(), "missing {directory}");
        }
        assert_eq!(
            fs::read_to_string(root.join("HEAD"))?,
            "ref: refs/heads/main\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("config"))?,
            CoreConfig::default().to_string()
        );
        assert_eq!(fs::read_to_string(root.join("index"))?, "[]");
        assert_eq!(fs::read_to_string(root.join("logs").join("HEAD"))?, "");

        Ok(())
    }

    #[tokio::test]
    async fn init_twice_fails_with_already_exists() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let mut repository = Repository::new(dir.path(), Box::new(std::io::sink()))?;
        repository.init().await?;

        let error = repository.init().await.unwrap_err();

        assert!(matches!(
            error.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::AlreadyExists(_))
        ));

        Ok(())
    }
}
