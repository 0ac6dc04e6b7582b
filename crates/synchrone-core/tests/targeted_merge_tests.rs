//! Targeted merge driven by `update_targets`

use pretty_assertions::assert_eq;
use synchrone_config::ConfigDocument;
use synchrone_core::summary::NO_UPDATES_NOTICE;
use synchrone_core::{ReconciliationEngine, ResourceLayout, RunReport, RunStamp, Summary, UpdatePolicy};
use synchrone_test_utils::TestProject;

fn run_targets(project: &TestProject, roots: &[&str], targets_yaml: &str) -> RunReport {
    let doc = ConfigDocument::parse(targets_yaml).unwrap();
    let layout = ResourceLayout::new(project.root());
    let policy = UpdatePolicy::TargetedMerge {
        roots: roots.iter().map(|r| r.to_string()).collect(),
        tree: doc.update_targets(None),
    };
    ReconciliationEngine::new(layout, RunStamp::parse("2026-10-16_101500").unwrap())
        .run(&policy)
        .unwrap()
}

#[test]
fn true_on_directory_takes_whole_subtree() {
    let project = TestProject::new();
    project.vendor_file("config/Config.ini", "ini");
    project.vendor_file("config/Config.json", "{}");

    let report = run_targets(&project, &["config"], "update_targets:\n  config: true\n");

    project.assert_file_contains("config/Config.ini", "ini");
    project.assert_file_contains("config/Config.json", "{}");
    assert_eq!(report.stats.added, 2);
}

#[test]
fn true_below_a_root_takes_that_directory() {
    let project = TestProject::new();
    project.vendor_file("bin/config/Config.ini", "ini");
    project.vendor_file("bin/config/Config.json", "{}");
    project.vendor_file("bin/controllers/home.php", "home");

    let report = run_targets(&project, &["bin"], "update_targets:\n  bin:\n    config: true\n");

    project.assert_file_exists("bin/config/Config.ini");
    project.assert_file_exists("bin/config/Config.json");
    project.assert_file_not_exists("bin/controllers");
    assert_eq!(report.stats.added, 2);
}

#[test]
fn file_level_selection_copies_only_that_file() {
    let project = TestProject::new();
    project.vendor_file("bin/config/Config.ini", "ini");
    project.vendor_file("bin/config/Config.json", "{}");

    let report = run_targets(
        &project,
        &["bin"],
        "update_targets:\n  bin:\n    config:\n      Config.ini: true\n",
    );

    project.assert_file_exists("bin/config/Config.ini");
    project.assert_file_not_exists("bin/config/Config.json");
    assert_eq!(report.stats.added, 1);
}

#[test]
fn selected_existing_file_is_backed_up() {
    let project = TestProject::new();
    project.vendor_file("public/layouts/main.html", "new");
    project.project_file("public/layouts/main.html", "old");

    let report = run_targets(
        &project,
        &["bin", "public"],
        "update_targets:\n  public:\n    layouts:\n      main.html: true\n",
    );

    assert_eq!(project.read("public/layouts/main.html"), "new");
    assert_eq!(report.stats.backed_up, 1);
    assert_eq!(report.stats.replaced, 1);
    assert_eq!(report.backups[0].path, "public/layouts/main.html");
}

#[test]
fn false_and_absent_entries_are_never_visited() {
    let project = TestProject::new();
    project.vendor_file("bin/config/Config.ini", "ini");
    project.vendor_file("public/css/site.css", "css");

    let report = run_targets(
        &project,
        &["bin", "public"],
        "update_targets:\n  bin:\n    config: false\n  templates:\n    x: true\n",
    );

    project.assert_file_not_exists("bin");
    project.assert_file_not_exists("public");
    assert!(report.stats.is_empty());
    assert!(report.log.is_empty());
    assert_eq!(
        Summary::from_report(&report).notice.as_deref(),
        Some(NO_UPDATES_NOTICE)
    );
}

#[test]
fn missing_top_level_entry_recovers_baseline_files() {
    let project = TestProject::new();
    project.vendor_file("bin/a.txt", "vendor a");
    project.vendor_file("bin/sub/b.txt", "vendor b");
    project.project_file("bin/a.txt", "local a");

    let report = run_targets(&project, &["bin"], "update_targets:\n  bin:\n    ghost: true\n");

    assert_eq!(report.stats.not_found, 1);
    assert_eq!(report.stats.added, 1);
    assert_eq!(report.stats.replaced, 0);
    assert_eq!(project.read("bin/a.txt"), "local a");
    assert_eq!(project.read("bin/sub/b.txt"), "vendor b");
}

#[test]
fn missing_nested_entry_is_only_counted() {
    let project = TestProject::new();
    project.vendor_file("bin/config/Config.ini", "ini");

    let report = run_targets(
        &project,
        &["bin"],
        "update_targets:\n  bin:\n    config:\n      ghost.ini: true\n",
    );

    assert_eq!(report.stats.not_found, 1);
    assert_eq!(report.stats.added, 0);
    project.assert_file_not_exists("bin/config/Config.ini");
}

#[test]
fn non_boolean_leaves_are_ignored() {
    let project = TestProject::new();
    project.vendor_file("bin/config/Config.ini", "ini");

    let report = run_targets(
        &project,
        &["bin"],
        "update_targets:\n  bin:\n    config: \"yes\"\n",
    );

    assert!(report.stats.is_empty());
    project.assert_file_not_exists("bin/config/Config.ini");
}

#[test]
fn selections_climbing_out_of_the_project_are_refused() {
    let temp = tempfile::TempDir::new().unwrap();
    let project_root = temp.path().join("project");
    let vendor = temp.path().join("pkg/vendor");
    std::fs::create_dir_all(project_root.join("bin")).unwrap();
    std::fs::create_dir_all(vendor.join("bin")).unwrap();
    std::fs::write(vendor.join("bin/ok.txt"), "ok").unwrap();
    // Where `vendor/bin/../../outside.txt` lands.
    std::fs::write(temp.path().join("pkg/outside.txt"), "outside").unwrap();

    let doc = ConfigDocument::parse(
        "update_targets:\n  bin:\n    \"../../outside.txt\": true\n    ok.txt: true\n",
    )
    .unwrap();
    let layout = ResourceLayout::new(&project_root).with_vendor_dir(&vendor);
    let policy = UpdatePolicy::TargetedMerge {
        roots: vec!["bin".to_string()],
        tree: doc.update_targets(None),
    };
    let report = ReconciliationEngine::new(layout, RunStamp::parse("2026-10-16_101500").unwrap())
        .run(&policy)
        .unwrap();

    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.added, 1);
    assert_eq!(report.stats.not_found, 0);
    assert_eq!(std::fs::read_to_string(project_root.join("bin/ok.txt")).unwrap(), "ok");
    assert!(!temp.path().join("outside.txt").exists());
    let mut top: Vec<String> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    top.sort();
    assert_eq!(top, vec!["pkg", "project"]);
}
