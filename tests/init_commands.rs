use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{init_repository_dir, repository_dir, run_dotgit_command};

#[rstest]
fn init_creates_repository_layout(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dotgit_path = repository_dir.path().canonicalize()?.join(".dotgit");

    run_dotgit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty dotgit repository in",
        ))
        .stdout(predicate::str::contains(dotgit_path.display().to_string()));

    for directory in [
        "refs/heads",
        "refs/tags",
        "objects/info",
        "objects/pack",
        "logs/refs/heads",
        "hooks",
        "stash",
    ] {
        assert!(dotgit_path.join(directory).is_dir(), "missing {directory}");
    }

    assert_eq!(
        std::fs::read_to_string(dotgit_path.join("HEAD"))?,
        "ref: refs/heads/main\n"
    );
    assert!(
        std::fs::read_to_string(dotgit_path.join("config"))?
            .contains("repositoryformatversion = 0")
    );
    assert_eq!(std::fs::read_to_string(dotgit_path.join("index"))?, "[]");

    Ok(())
}

#[rstest]
fn init_at_explicit_path_creates_missing_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir.path().join("nested").join("project");

    run_dotgit_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    assert!(target.join(".dotgit").join("HEAD").is_file());

    Ok(())
}

#[rstest]
fn reinit_fails_and_leaves_repository_untouched(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let head_path = init_repository_dir.path().join(".dotgit").join("HEAD");
    std::fs::write(&head_path, "ref: refs/heads/feature\n")?;

    run_dotgit_command(init_repository_dir.path(), &["init"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        std::fs::read_to_string(&head_path)?,
        "ref: refs/heads/feature\n"
    );

    Ok(())
}

#[rstest]
fn commands_outside_a_repository_fail(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_dotgit_command(repository_dir.path(), &["log"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a dotgit repository"));

    Ok(())
}

#[rstest]
fn commands_run_from_a_subdirectory_find_the_repository(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let subdirectory = init_repository_dir.path().join("src").join("deep");
    std::fs::create_dir_all(&subdirectory)?;

    run_dotgit_command(&subdirectory, &["branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no branches"));

    Ok(())
}
