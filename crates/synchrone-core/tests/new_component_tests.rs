//! New-component merge: correspondence swaps and the additive sweep

use std::fs;

use pretty_assertions::assert_eq;
use synchrone_core::{
    BackupKind, ReconciliationEngine, ResourceLayout, RunStamp, UpdatePolicy, find_correspondences,
};
use synchrone_fs::{EntryKind, NormalizedPath};
use synchrone_test_utils::TestProject;

fn run(project: &TestProject, layout: ResourceLayout) -> synchrone_core::RunReport {
    let policy = UpdatePolicy::new_component_merge(&layout);
    ReconciliationEngine::new(layout, RunStamp::parse("2026-10-16_101500").unwrap())
        .run(&policy)
        .unwrap_or_else(|e| panic!("run failed in {}: {e}", project.root().display()))
}

#[test]
fn brand_new_file_is_added_by_sweep() {
    let project = TestProject::new();
    project.new_component_file("bin/widget.php", "widget");
    project.project_file("bin/other.php", "other");

    let layout = ResourceLayout::new(project.root());
    assert!(find_correspondences(&layout, &layout.new_component_directories).is_empty());

    let report = run(&project, layout);

    project.assert_file_contains("bin/widget.php", "widget");
    project.assert_file_contains("bin/other.php", "other");
    assert_eq!(report.stats.added, 1);
    assert_eq!(report.stats.replaced, 0);
    assert!(report.backups.is_empty());
}

#[test]
fn sweep_creates_missing_directories() {
    let project = TestProject::new();
    project.new_component_file("public/layouts/partials/nav.html", "nav");

    let report = run(&project, ResourceLayout::new(project.root()));

    project.assert_file_contains("public/layouts/partials/nav.html", "nav");
    assert_eq!(report.stats.added, 1);
    // public, public/layouts, public/layouts/partials
    assert_eq!(report.directories_created, 3);
}

#[test]
fn matching_directory_is_swapped_wholesale() {
    let project = TestProject::new();
    project.project_file("bin/controllers/old.php", "old");
    project.project_file("bin/controllers/keep.php", "keep");
    project.new_component_file("bin/controllers/new.php", "new");

    let layout = ResourceLayout::new(project.root());
    let matches = find_correspondences(&layout, &layout.new_component_directories);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].directory, NormalizedPath::new("bin"));
    assert_eq!(matches[0].item, "controllers");
    assert_eq!(matches[0].kind, EntryKind::Directory);

    let report = run(&project, layout);

    let controllers = project.root().join("bin/controllers");
    assert_eq!(project.files_under(&controllers), vec!["new.php"]);
    assert_eq!(report.stats.replaced, 1);
    assert_eq!(report.stats.backed_up, 1);
    assert_eq!(report.backups[0].kind, BackupKind::Directory);

    let run_dir = project.only_backup_run();
    assert_eq!(
        fs::read_to_string(run_dir.join("new-component-merge/bin/controllers/old.php")).unwrap(),
        "old"
    );
    assert_eq!(
        fs::read_to_string(run_dir.join("new-component-merge/bin/controllers/keep.php")).unwrap(),
        "keep"
    );
}

#[test]
fn matching_file_is_replaced_after_backup() {
    let project = TestProject::new();
    project.project_file("public/layouts/main.html", "mine");
    project.new_component_file("public/layouts/main.html", "theirs");

    let report = run(&project, ResourceLayout::new(project.root()));

    assert_eq!(project.read("public/layouts/main.html"), "theirs");
    assert_eq!(report.stats.replaced, 1);
    assert_eq!(report.stats.added, 0);
    let run_dir = project.only_backup_run();
    assert_eq!(
        fs::read_to_string(run_dir.join("new-component-merge/public/layouts/main.html")).unwrap(),
        "mine"
    );
}

#[test]
fn failed_backup_leaves_match_untouched() {
    let project = TestProject::new();
    project.project_file("bin/controllers/old.php", "old");
    project.new_component_file("bin/controllers/new.php", "new");
    project.project_file("blocked", "file");

    let layout = ResourceLayout::new(project.root()).with_backup_dir("blocked");
    let report = run(&project, layout);

    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.replaced, 0);
    project.assert_file_contains("bin/controllers/old.php", "old");
    // The sweep still adds what the project lacks.
    project.assert_file_contains("bin/controllers/new.php", "new");
    assert_eq!(report.stats.added, 1);
}

#[test]
fn kind_mismatch_is_a_failure() {
    let project = TestProject::new();
    project.project_file("bin/widget", "a file");
    project.new_component_file("bin/widget/index.php", "dir");

    let report = run(&project, ResourceLayout::new(project.root()));

    // The swap and the sweep's attempt to write below the file both fail.
    assert_eq!(report.stats.failed, 2);
    assert_eq!(report.stats.backed_up, 0);
    assert_eq!(project.read("bin/widget"), "a file");
}

#[test]
fn unscanned_directories_only_get_additions() {
    let project = TestProject::new();
    project.project_file("config/Config.ini", "local");
    project.new_component_file("config/Config.ini", "shipped");
    project.new_component_file("config/extra.ini", "extra");

    let report = run(&project, ResourceLayout::new(project.root()));

    assert_eq!(project.read("config/Config.ini"), "local");
    project.assert_file_contains("config/extra.ini", "extra");
    assert_eq!(report.stats.replaced, 0);
    assert_eq!(report.stats.added, 1);
}
