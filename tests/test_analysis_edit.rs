//! Tests for analysis display and the edit-resets-downstream rule.

mod common;

use common::{init_project, run};

fn reach_topic_selection(dir: &std::path::Path) {
    run(dir, &["analyze", "acme.com"]);
    run(dir, &["strategy", "select", "1"]);
    run(dir, &["topics", "generate"]);
    run(dir, &["--demo", "topics", "select", "scenario-1"]);
}

#[test]
fn analysis_show_prints_fields() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);

    let result = run(temp_dir.path(), &["analysis", "show"]);
    assert_eq!(result.code, 0);
    assert!(result.stdout.contains("Business name:   Acme"));
    assert!(result.stdout.contains("#6B8CAE"));
    assert!(result.stdout.contains("unable to analyze"));
}

#[test]
fn analysis_show_without_analysis_errors() {
    let temp_dir = init_project();
    let result = run(temp_dir.path(), &["analysis", "show"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0201"));
}

#[test]
fn analysis_edit_resets_downstream_selections() {
    let temp_dir = init_project();
    reach_topic_selection(temp_dir.path());

    let result = run(
        temp_dir.path(),
        &["analysis", "set", "business-name", "Bolt Industries"],
    );
    assert_eq!(result.code, 0);
    assert!(result.stderr.contains("reset"));

    // Name changed, wizard rewound, topics and selection gone
    let status = run(temp_dir.path(), &["status"]);
    assert!(status.stderr.contains("Bolt Industries"));
    assert!(status.stderr.contains("strategy-selection"));

    let topics = run(temp_dir.path(), &["topics", "list"]);
    assert_eq!(topics.code, 1);
    assert!(topics.stderr.contains("E0401"));
}

#[test]
fn analysis_edit_rejects_unknown_field() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);

    let result = run(temp_dir.path(), &["analysis", "set", "favorite-color", "blue"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0103"));
}

#[test]
fn analysis_edit_rejects_empty_value() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);

    let result = run(temp_dir.path(), &["analysis", "set", "business-name", "  "]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0104"));
}
