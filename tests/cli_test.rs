//! Binary-level tests: the `release-gate` executable against fake tools.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serial_test::serial;
use tempfile::{tempdir, TempDir};

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}", body)).expect("write fake tool");
    let mut perms = fs::metadata(path).expect("meta").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod");
}

fn fake_git(branch: &str, tags: &str) -> String {
    format!(
        r#"
case "$1" in
  --version) echo "git version 2.43.0" ;;
  rev-parse)
    if [ "$2" = "--abbrev-ref" ]; then echo "{branch}"; exit 0; fi
    [ -f MERGE_HEAD ] ;;
  tag) printf '{tags}' ;;
esac
"#
    )
}

const FAKE_GH: &str = r#"
case "$1" in
  --version) echo "gh version 2.40.0" ;;
  auth) echo "gho_abcdef" ;;
  release) echo "$@" > gh-args.txt; echo "https://github.com/example/tmgr/releases/tag/$3" ;;
esac
"#;

const FAKE_CARGO: &str = r#"
case "$1" in
  pkgid) echo "path+file:///home/dev/tmgr#2.0.0" ;;
  build) touch built ;;
esac
"#;

/// A project directory with fake tools and a `releasegate.toml` pointing at them
struct Project {
    dir: TempDir,
}

impl Project {
    fn new(git: &str, gh: &str, cargo: &str) -> Self {
        let dir = tempdir().expect("tempdir");
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).expect("mkdir");
        write_script(&bin.join("git"), git);
        write_script(&bin.join("gh"), gh);
        write_script(&bin.join("cargo"), cargo);

        let config = format!(
            "[tools]\ngit = \"{}\"\ngh = \"{}\"\ncargo = \"{}\"\n",
            bin.join("git").display(),
            bin.join("gh").display(),
            bin.join("cargo").display()
        );
        fs::write(dir.path().join("releasegate.toml"), config).expect("write config");
        Project { dir }
    }

    fn mark_merge(&self) {
        fs::write(self.path().join("MERGE_HEAD"), "abc123\n").expect("write MERGE_HEAD");
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("release-gate"));
        cmd.arg("-C").arg(self.path());
        cmd
    }
}

#[test]
#[serial]
fn test_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("release-gate"))
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("release-gate"))
        .stdout(contains("--dry-run"));
}

#[test]
#[serial]
fn test_missing_git_exits_one() {
    let project = Project::new(&fake_git("main", ""), FAKE_GH, FAKE_CARGO);
    let config = project.path().join("broken.toml");
    fs::write(&config, "[tools]\ngit = \"/nonexistent/release-gate/git\"\n").unwrap();

    project
        .cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(contains("Git is not installed. Please install Git."))
        .stderr(contains("Release aborted").not());
}

#[test]
#[serial]
fn test_missing_directory_exits_one() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("no-such-project");

    Command::new(assert_cmd::cargo::cargo_bin!("release-gate"))
        .arg("-C")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(contains("no-such-project"))
        .stderr(contains("not a directory"))
        .stderr(contains("not installed").not());
}

#[test]
#[serial]
fn test_unauthenticated_exits_one() {
    let project = Project::new(&fake_git("main", ""), "[ \"$1\" = \"--version\" ]\n", FAKE_CARGO);

    project
        .cmd()
        .assert()
        .code(1)
        .stderr(contains("GitHub token not found"));
}

#[test]
#[serial]
fn test_other_branch_exits_zero() {
    let project = Project::new(&fake_git("develop", ""), FAKE_GH, FAKE_CARGO);
    project.mark_merge();

    project
        .cmd()
        .assert()
        .success()
        .stdout(contains("Skipping release"));
    assert!(!project.path().join("built").exists());
    assert!(!project.path().join("gh-args.txt").exists());
}

#[test]
#[serial]
fn test_without_merge_exits_zero() {
    let project = Project::new(&fake_git("main", ""), FAKE_GH, FAKE_CARGO);

    project
        .cmd()
        .assert()
        .success()
        .stdout(contains("Not a merge commit"));
    assert!(!project.path().join("built").exists());
}

#[test]
#[serial]
fn test_existing_tag_exits_zero() {
    let project = Project::new(&fake_git("main", "v1.0.0\\nv2.0.0\\n"), FAKE_GH, FAKE_CARGO);
    project.mark_merge();

    project
        .cmd()
        .assert()
        .success()
        .stdout(contains("Tag v2.0.0 already exists"));
    assert!(!project.path().join("built").exists());
}

#[test]
#[serial]
fn test_full_release() {
    let project = Project::new(&fake_git("main", "v1.0.0\\n"), FAKE_GH, FAKE_CARGO);
    project.mark_merge();

    project
        .cmd()
        .assert()
        .success()
        .stdout(contains("Published release v2.0.0"));

    assert!(project.path().join("built").exists());
    let args = fs::read_to_string(project.path().join("gh-args.txt")).unwrap();
    assert_eq!(
        args.trim(),
        "release create v2.0.0 ./target/release/tmgr --latest --generate-notes"
    );
}

#[test]
#[serial]
fn test_dry_run_does_not_build() {
    let project = Project::new(&fake_git("main", ""), FAKE_GH, FAKE_CARGO);
    project.mark_merge();

    project
        .cmd()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(contains("Dry run"));
    assert!(!project.path().join("built").exists());
    assert!(!project.path().join("gh-args.txt").exists());
}

#[test]
#[serial]
fn test_build_failure_exits_one() {
    let cargo = r#"
case "$1" in
  pkgid) echo "tmgr#2.0.0" ;;
  build) echo "error: could not compile tmgr" >&2; exit 101 ;;
esac
"#;
    let project = Project::new(&fake_git("main", ""), FAKE_GH, cargo);
    project.mark_merge();

    project
        .cmd()
        .assert()
        .code(1)
        .stderr(contains("Release aborted: Release build failed"));
    assert!(!project.path().join("gh-args.txt").exists());
}
