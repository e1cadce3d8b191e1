//! References (branches and HEAD)
//!
//! ## Reference Types
//!
//! - HEAD: symbolic reference to the current branch (`ref: refs/heads/main`)
//! - Branches: `refs/heads/*` files holding a literal target string
//! - Tags: `refs/tags/` is laid out but unused
//!
//! A new branch stores the literal string `main` rather than a commit id: the
//! store never moves refs, so there is no commit to point at.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::branch::{DEFAULT_BRANCH, HEAD_REF_NAME, SYMREF_REGEX};
use crate::artifacts::core::errors::RepositoryError;
use crate::artifacts::core::write_atomically;
use anyhow::Context;
use derive_new::new;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// References manager
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.dotgit`)
    path: Box<Path>,
}

impl Refs {
    /// Point HEAD at `refs/heads/<branch>`
    pub fn set_head(&self, branch: &BranchName) -> anyhow::Result<()> {
        let content = format!("ref: {}\n", branch.to_sym_ref_name());

        self.update_ref_file(&self.head_path(), &content)
    }

    /// The ref HEAD points at, or `HEAD` itself when it is not symbolic
    pub fn current_ref(&self) -> anyhow::Result<SymRefName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .map_err(|error| RepositoryError::from_io(error, HEAD_REF_NAME))?;

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content.trim());
        match symref_match {
            Some(symref_match) => Ok(SymRefName::new(symref_match[1].to_string())),
            None => Ok(SymRefName::new(HEAD_REF_NAME.to_string())),
        }
    }

    /// The branch HEAD points at, if HEAD is a symbolic branch ref
    pub fn current_branch(&self) -> anyhow::Result<Option<BranchName>> {
        let current_ref = self.current_ref()?;

        Ok(BranchName::try_parse_sym_ref_name(&current_ref).ok())
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(self.current_branch()?.as_ref() == Some(branch_name))
    }

    /// Names of every ref under `refs/heads`, sorted
    ///
    /// An empty list is a valid state: `main` exists only through HEAD until
    /// it is created explicitly.
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        if !heads_path.exists() {
            return Ok(Vec::new());
        }

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    /// Literal content of a branch ref, if it exists
    pub fn read_branch_target(&self, name: &BranchName) -> anyhow::Result<Option<String>> {
        let branch_path = self.heads_path().join(name.as_ref());
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(content.trim().to_string()))
    }

    /// Create `refs/heads/<name>` holding the literal default target
    ///
    /// Fails with `AlreadyExists` if the ref is present. Whether the target
    /// branch exists is not checked.
    pub fn create_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(name.as_ref());

        if branch_path.exists() {
            return Err(RepositoryError::AlreadyExists(format!("branch {name}")).into());
        }

        self.update_ref_file(&branch_path, DEFAULT_BRANCH)?;
        info!(branch = %name, target = DEFAULT_BRANCH, "created branch");

        Ok(())
    }

    /// Remove `refs/heads/<name>` and return what it pointed at
    ///
    /// Deleting the branch HEAD points at is allowed; HEAD is left dangling.
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<String> {
        let branch_path = self.heads_path().join(name.as_ref());

        let Some(target) = self.read_branch_target(name)? else {
            return Err(RepositoryError::NotFound(format!("branch {name}")).into());
        };

        if self.is_current_branch(name)? {
            warn!(branch = %name, "deleting the branch HEAD points at");
        }

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        info!(branch = %name, "deleted branch");

        Ok(target)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("invalid ref file path {:?}", path))?;
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create parent directories for ref file at {:?}", path)
        })?;

        write_atomically(path, raw_ref.as_bytes())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn refs(dir: &TempDir) -> anyhow::Result<Refs> {
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());
        std::fs::create_dir_all(refs.heads_path())?;
        refs.set_head(&branch(DEFAULT_BRANCH))?;
        Ok(refs)
    }

    fn branch(name: &str) -> BranchName {
        BranchName::try_parse(name.to_string()).unwrap()
    }

    #[test]
    fn head_is_symbolic_ref_to_main() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let refs = refs(&dir)?;

        assert_eq!(
            std::fs::read_to_string(refs.head_path())?,
            "ref: refs/heads/main\n"
        );
        assert_eq!(refs.current_ref()?.as_ref_path(), "refs/heads/main");
        assert_eq!(refs.current_branch()?, Some(branch("main")));

        Ok(())
    }

    #[test]
    fn fresh_repository_lists_no_branches() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let refs = refs(&dir)?;

        assert!(refs.list_branches()?.is_empty());

        Ok(())
    }

    #[test]
    fn created_branch_is_listed_and_holds_literal_main() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let refs = refs(&dir)?;

        refs.create_branch(&branch("feature"))?;

        assert_eq!(refs.list_branches()?, vec![branch("feature")]);
        assert_eq!(
            std::fs::read_to_string(refs.heads_path().join("feature"))?,
            "main"
        );

        Ok(())
    }

    #[test]
    fn creating_existing_branch_fails() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let refs = refs(&dir)?;
        refs.create_branch(&branch("feature"))?;

        let error = refs.create_branch(&branch("feature")).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::AlreadyExists(_))
        ));

        Ok(())
    }

    #[test]
    fn deleted_branch_leaves_the_listing() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let refs = refs(&dir)?;
        refs.create_branch(&branch("feature"))?;
        refs.create_branch(&branch("develop"))?;

        let target = refs.delete_branch(&branch("feature"))?;

        assert_eq!(target, "main");
        assert_eq!(refs.list_branches()?, vec![branch("develop")]);

        Ok(())
    }

    #[test]
    fn deleting_missing_branch_is_not_found() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let refs = refs(&dir)?;

        let error = refs.delete_branch(&branch("ghost")).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::NotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn hierarchical_branches_prune_empty_directories() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let refs = refs(&dir)?;
        refs.create_branch(&branch("feature/login"))?;
        refs.create_branch(&branch("bugfix/auth"))?;

        assert_eq!(
            refs.list_branches()?,
            vec![branch("bugfix/auth"), branch("feature/login")]
        );

        refs.delete_branch(&branch("feature/login"))?;

        assert!(!refs.heads_path().join("feature").exists());
        assert!(refs.heads_path().exists());

        Ok(())
    }

    #[test]
    fn current_branch_can_be_deleted() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let refs = refs(&dir)?;
        refs.create_branch(&branch("main"))?;

        assert!(refs.is_current_branch(&branch("main"))?);
        refs.delete_branch(&branch("main"))?;

        assert!(refs.list_branches()?.is_empty());
        assert_eq!(refs.current_branch()?, Some(branch("main")));

        Ok(())
    }
}
