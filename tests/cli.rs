//! CLI surface tests: argument handling, init scaffolding, failure paths.

use assert_cmd::Command;
use predicates::prelude::*;

fn shellpack() -> Command {
    Command::cargo_bin("shellpack").expect("binary built")
}

#[test]
fn version_subcommand_prints_version() {
    shellpack()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shellpack"));
}

#[test]
fn no_subcommand_shows_usage_and_fails() {
    shellpack()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_scaffolds_project_layout() {
    let dir = tempfile::tempdir().expect("tempdir");

    shellpack().arg("init").arg(dir.path()).assert().success();

    assert!(dir.path().join("shellpack.toml").is_file());
    assert!(dir.path().join("scripts/main.sh").is_file());
    assert!(dir.path().join("build").is_dir());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(dir.path().join("scripts/main.sh"))
            .expect("metadata")
            .permissions()
            .mode();
        assert_ne!(mode & 0o111, 0, "sample entry script must be executable");
    }
}

#[test]
fn build_without_entry_script_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("scripts")).expect("mkdir");
    std::fs::write(
        dir.path().join("shellpack.toml"),
        "name = \"demo\"\nversion = \"1.0.0\"\n",
    )
    .expect("write config");
    // scripts/ holds something discoverable, but no entry script on disk
    std::fs::write(dir.path().join("scripts/helper.sh"), "#!/bin/sh\n").expect("write script");

    shellpack()
        .arg("build")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("entry script not found"));
}

#[test]
fn make_without_main_script_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("other.sh"), "#!/bin/sh\n").expect("write script");

    shellpack()
        .arg("make")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("entry script not found"));
}

#[test]
fn build_on_missing_directory_fails() {
    shellpack()
        .arg("build")
        .arg("/nonexistent/shellpack/project")
        .assert()
        .failure()
        .stderr(predicate::str::contains("resolving project directory"));
}
