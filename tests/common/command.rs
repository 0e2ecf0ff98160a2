use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with three files in nested directories and one commit
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    sit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

/// Repository with a linear history of three commits, each changing `file.txt`
#[fixture]
pub fn repository_with_multiple_commits(repository_dir: TempDir) -> TempDir {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (index, message) in ["First commit", "Second commit", "Third commit"]
        .iter()
        .enumerate()
    {
        let file = FileSpec::new(
            repository_dir.path().join("file.txt"),
            format!("content {index}"),
        );
        write_file(file);

        sit_commit(repository_dir.path(), message)
            .assert()
            .success();
    }

    repository_dir
}

pub fn run_sit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sit").expect("Failed to find sit binary");
    cmd.envs(vec![("NO_COLOR", "1"), ("SIT_LOG", "off")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn sit_commit(dir: &Path, message: &str) -> Command {
    run_sit_command(dir, &["commit", "-m", message])
}

/// Run a command expected to print a single object ID and return it
pub fn sit_output(dir: &Path, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_sit_command(dir, args).output()?;
    if !output.status.success() {
        return Err(format!(
            "sit {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        )
        .into());
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Raw text of a reference file below `.sit`
pub fn read_ref_file(dir: &Path, name: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(std::fs::read_to_string(dir.join(".sit").join(name))?
        .trim()
        .to_string())
}

/// OID HEAD resolves to, following one symbolic hop as written by `init`
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head = read_ref_file(dir, "HEAD")?;
    match head.strip_prefix("ref: ") {
        Some(target) => read_ref_file(dir, target),
        None => Ok(head),
    }
}

/// Parent OID recorded in a commit, read back through `cat-file`
pub fn get_parent_commit_id(
    dir: &Path,
    commit_id: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_sit_command(dir, &["cat-file", commit_id]).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // Find the parent line
    for line in stdout.lines() {
        if let Some(oid) = line.strip_prefix("parent ") {
            return Ok(oid.to_string());
        }
    }

    Err("No parent found".into())
}
