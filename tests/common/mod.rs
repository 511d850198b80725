// Shared helpers for tests that drive a real git client.
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Whether a git client is installed; git-backed tests return early without one
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run git in `dir`, panicking on failure, and return trimmed stdout
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create an empty repository whose unborn branch is `main`
pub fn init_repo() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    dir
}

/// Commit a change to `file.txt` and return the new commit id
pub fn commit(dir: &Path, message: &str) -> String {
    let path = dir.join("file.txt");
    let mut contents = fs::read_to_string(&path).unwrap_or_default();
    contents.push_str(message);
    contents.push('\n');
    fs::write(&path, contents).expect("Failed to write file");

    git(dir, &["add", "file.txt"]);
    git(dir, &["commit", "-q", "-m", message]);
    git(dir, &["rev-parse", "HEAD"])
}

pub fn short_sha(dir: &Path) -> String {
    git(dir, &["rev-parse", "--short", "HEAD"])
}
