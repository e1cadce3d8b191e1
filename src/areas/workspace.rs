use crate::artifacts::core::errors::RepositoryError;
use crate::artifacts::ignore::ignore_rules::IgnoreRules;
use anyhow::Context;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Read-only access to the working tree
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a user-supplied path to an absolute path inside the workspace
    pub fn resolve(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let absolute_path = std::fs::canonicalize(path)
            .map_err(|error| RepositoryError::from_io(error, format!("'{}'", path.display())))?;

        if !absolute_path.starts_with(self.path()) {
            anyhow::bail!(
                "'{}' is outside repository at {}",
                path.display(),
                self.path.display()
            );
        }

        Ok(absolute_path)
    }

    /// Path relative to the workspace root
    pub fn relative_path(&self, absolute_path: &Path) -> anyhow::Result<PathBuf> {
        absolute_path
            .strip_prefix(self.path.as_ref())
            .map(Path::to_path_buf)
            .with_context(|| format!("'{}' is outside repository", absolute_path.display()))
    }

    /// List the non-ignored files at or below `absolute_path`, sorted, relative
    /// to the workspace root
    ///
    /// Ignored directories are pruned without being walked.
    pub fn list_files(
        &self,
        absolute_path: &Path,
        ignore_rules: &IgnoreRules,
    ) -> anyhow::Result<Vec<PathBuf>> {
        if !absolute_path.is_dir() {
            return Ok(vec![self.relative_path(absolute_path)?]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(absolute_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                self.relative_path(entry.path())
                    .map(|relative| !ignore_rules.is_ignored(&relative, entry.file_type().is_dir()))
                    .unwrap_or(false)
            });

        for entry in walker {
            let entry = entry.with_context(|| {
                format!("Unable to walk directory {}", absolute_path.display())
            })?;

            if entry.file_type().is_file() {
                files.push(self.relative_path(entry.path())?);
            }
        }

        Ok(files)
    }

    pub fn read_file(&self, relative_path: &Path) -> anyhow::Result<Vec<u8>> {
        let file_path = self.path.join(relative_path);

        std::fs::read(&file_path).map_err(|error| {
            RepositoryError::from_io(error, format!("'{}'", relative_path.display())).into()
        })
    }

    /// Repository key for a relative path: components joined with `/`
    pub fn to_key(relative_path: &Path) -> String {
        relative_path
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use pretty_assertions::assert_eq;

    fn workspace(dir: &TempDir) -> anyhow::Result<Workspace> {
        Ok(Workspace::new(dir.path().canonicalize()?.into_boxed_path()))
    }

    #[test]
    fn list_files_expands_directories_and_skips_ignored() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("a.txt").write_str("a")?;
        dir.child("src/lib.rs").write_str("lib")?;
        dir.child("src/.lib.rs.swp").write_str("swap")?;
        dir.child("node_modules/pkg/index.js").write_str("js")?;
        dir.child(".dotgit/index").write_str("[]")?;

        let workspace = workspace(&dir)?;
        let rules = IgnoreRules::with_defaults(workspace.path())?;
        let files = workspace
            .list_files(workspace.path(), &rules)?
            .iter()
            .map(|path| Workspace::to_key(path))
            .collect::<Vec<_>>();

        assert_eq!(files, vec!["a.txt".to_string(), "src/lib.rs".to_string()]);

        Ok(())
    }

    #[test]
    fn list_files_returns_single_file_as_is() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("docs/readme.md").write_str("docs")?;

        let workspace = workspace(&dir)?;
        let rules = IgnoreRules::with_defaults(workspace.path())?;
        let target = workspace.path().join("docs").join("readme.md");

        let files = workspace.list_files(&target, &rules)?;

        assert_eq!(files, vec![PathBuf::from("docs").join("readme.md")]);

        Ok(())
    }

    #[test]
    fn resolve_reports_missing_paths_as_not_found() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let workspace = workspace(&dir)?;

        let error = workspace
            .resolve(&workspace.path().join("missing.txt"))
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::NotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn resolve_rejects_paths_outside_the_workspace() -> anyhow::Result<()> {
        let outer = TempDir::new()?;
        outer.child("repo/a.txt").write_str("a")?;
        outer.child("other.txt").write_str("b")?;

        let workspace = Workspace::new(
            outer
                .path()
                .join("repo")
                .canonicalize()?
                .into_boxed_path(),
        );

        assert!(workspace.resolve(&outer.path().join("other.txt")).is_err());
        assert!(workspace.resolve(&outer.path().join("repo/a.txt")).is_ok());

        Ok(())
    }

    #[test]
    fn keys_use_forward_slashes() {
        let path = PathBuf::from("a").join("b").join("c.txt");
        assert_eq!(Workspace::to_key(&path), "a/b/c.txt");
    }
}
