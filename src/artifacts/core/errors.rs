use thiserror::Error;

/// Failures of repository operations that callers branch on.
///
/// Everything else travels as plain `anyhow` context; these variants are
/// recovered with `downcast_ref` where the kind matters (exit status,
/// per-path reporting in `add`).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("nothing to commit")]
    NothingToCommit,

    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: String, reason: String },

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("not a dotgit repository (or any of the parent directories): {0}")]
    NotARepository(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RepositoryError {
    /// Map an I/O failure on `subject`, keeping "not found" distinct from
    /// every other filesystem error.
    pub fn from_io(error: std::io::Error, subject: impl Into<String>) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => RepositoryError::NotFound(subject.into()),
            _ => RepositoryError::Io(error),
        }
    }
}

/// Check whether an `anyhow` error carries the given repository error kind.
pub fn is_kind(error: &anyhow::Error, matcher: impl Fn(&RepositoryError) -> bool) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<RepositoryError>())
        .any(matcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_not_found() {
        let error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let mapped = RepositoryError::from_io(error, "a.txt");

        assert!(matches!(mapped, RepositoryError::NotFound(ref path) if path == "a.txt"));
        assert_eq!(mapped.to_string(), "a.txt not found");
    }

    #[test]
    fn permission_error_maps_to_io() {
        let error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let mapped = RepositoryError::from_io(error, "a.txt");

        assert!(matches!(mapped, RepositoryError::Io(_)));
    }

    #[test]
    fn kind_is_found_behind_context() {
        let error = anyhow::Error::new(RepositoryError::NothingToCommit).context("commit failed");

        assert!(is_kind(&error, |kind| matches!(
            kind,
            RepositoryError::NothingToCommit
        )));
        assert!(!is_kind(&error, |kind| matches!(
            kind,
            RepositoryError::NotFound(_)
        )));
    }
}
