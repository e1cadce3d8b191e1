use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const FIXED_COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_dotgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let file1 = FileSpec::new(init_repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        init_repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        init_repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_dotgit_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    dotgit_commit(init_repository_dir.path(), "Initial commit")
        .assert()
        .success();

    init_repository_dir
}

pub fn run_dotgit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("dotgit").expect("Failed to find dotgit binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("DOTGIT_LOG");
    cmd.env_remove("DOTGIT_COMMIT_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn dotgit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_dotgit_command(dir, &["commit", "-m", message]);
    cmd.env("DOTGIT_COMMIT_DATE", FIXED_COMMIT_DATE); // %Y-%m-%d %H:%M:%S %z
    cmd
}

/// Extract the short id from a `[<branch> <short-id>] <message>` commit line
pub fn short_id_from_commit_output(stdout: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let header = stdout
        .lines()
        .find(|line| line.starts_with('['))
        .expect("Missing commit header line");
    let (_, rest) = header.split_once(' ').expect("Malformed commit header");
    let (short_id, _) = rest.split_once(']').expect("Malformed commit header");
    short_id.to_string()
}
