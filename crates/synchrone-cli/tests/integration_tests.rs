//! Integration tests for the synchrone CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use synchrone_test_utils::TestProject;

/// Get a Command for the synchrone binary
fn synchrone_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_synchrone"));
    cmd.env_remove("SYNCHRONE_ROOT").env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    synchrone_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("backups"));
}

#[test]
fn test_version_output() {
    synchrone_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("synchrone"));
}

#[test]
fn test_no_command_shows_help_hint() {
    synchrone_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("synchrone --help"));
}

// ============================================================================
// Targeted and new-component installs
// ============================================================================

#[test]
fn test_specific_install_reports_not_found() {
    let project = TestProject::new();
    project.vendor_file("bin/config/Config.ini", "ini");
    project.write_config(
        "update:\n  type:\n    specific: true\nupdate_targets:\n  bin:\n    config:\n      Config.ini: true\n      ghost.ini: true\n",
    );

    synchrone_cmd()
        .current_dir(project.root())
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) added"))
        .stdout(predicate::str::contains("1 file(s) not found"));

    project.assert_file_contains("bin/config/Config.ini", "ini");
}

#[test]
fn test_new_components_install_adds_widget() {
    let project = TestProject::new();
    project.new_component_file("bin/widget.php", "<?php");
    project.write_config("update:\n  type:\n    new: true\n");

    synchrone_cmd()
        .current_dir(project.root())
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("No general or specific updates detected"))
        .stdout(predicate::str::contains("1 file(s) added"));

    project.assert_file_contains("bin/widget.php", "<?php");
}

#[test]
fn test_second_full_install_replaces_identically() {
    let project = TestProject::new();
    project.vendor_file("bin/a.txt", "alpha");
    project.write_config("update:\n  type:\n    all: true\n");

    synchrone_cmd()
        .current_dir(project.root())
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) added"));

    synchrone_cmd()
        .current_dir(project.root())
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) replaced"));

    assert_eq!(project.read("bin/a.txt"), "alpha");
}

#[test]
fn test_backups_without_runs() {
    let project = TestProject::new();

    synchrone_cmd()
        .current_dir(project.root())
        .arg("backups")
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups found"));
}

#[cfg(unix)]
#[test]
fn test_update_runs_package_manager() {
    let project = TestProject::new();

    synchrone_cmd()
        .current_dir(project.root())
        .args(["update", "--program", "echo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("require epaphrodites/packages"));
}

#[cfg(unix)]
#[test]
fn test_update_failure_exits_nonzero() {
    let project = TestProject::new();

    synchrone_cmd()
        .current_dir(project.root())
        .args(["-u", "--program", "false"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exit code 1"));
}
