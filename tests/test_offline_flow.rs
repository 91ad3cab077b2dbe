//! Tests for the degraded offline flow: analysis falls back, topics come
//! from scenario content ideas, and generation aborts instead of
//! fabricating content.

mod common;

use common::{init_project, run};

#[test]
fn analysis_falls_back_when_backend_is_down() {
    let temp_dir = init_project();
    let result = run(temp_dir.path(), &["analyze", "acme.com"]);
    assert_eq!(result.code, 0, "fallback must not fail the command");
    assert!(result.stderr.contains("W0101"));
    assert!(result.stderr.contains("Acme"));

    let status = run(temp_dir.path(), &["status"]);
    assert!(status.stderr.contains("strategy-selection"));
    assert!(status.stderr.contains("Acme"));
}

#[test]
fn fallback_strategies_are_listed_in_priority_order() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);

    let result = run(
        temp_dir.path(),
        &["strategy", "list", "--output", "plain"],
    );
    assert_eq!(result.code, 0);
    let first = result.stdout.lines().next().unwrap_or("");
    assert!(first.contains("Reach new customers"), "got: {first}");
}

#[test]
fn topics_fall_back_to_scenario_ideas() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);
    let select = run(temp_dir.path(), &["strategy", "select", "1"]);
    assert_eq!(select.code, 0);

    let result = run(temp_dir.path(), &["topics", "generate"]);
    assert_eq!(result.code, 0);
    assert!(result.stderr.contains("W0105"));

    let list = run(temp_dir.path(), &["topics", "list", "--output", "plain"]);
    assert!(list.stdout.contains("scenario-1"));
    assert!(list.stdout.contains("scenario-2"));
    assert_eq!(list.stdout.lines().count(), 2);
}

#[test]
fn unauthenticated_topic_selection_hits_the_gate() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);
    run(temp_dir.path(), &["strategy", "select", "1"]);
    run(temp_dir.path(), &["topics", "generate"]);

    let result = run(temp_dir.path(), &["topics", "select", "scenario-1"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0601"));

    // Selection must not have stuck
    let status = run(temp_dir.path(), &["status"]);
    assert!(status.stderr.contains("topic-generation"));
}

#[test]
fn demo_mode_bypasses_the_gate() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);
    run(temp_dir.path(), &["strategy", "select", "1"]);
    run(temp_dir.path(), &["topics", "generate"]);

    let result = run(temp_dir.path(), &["--demo", "topics", "select", "scenario-1"]);
    assert_eq!(result.code, 0, "demo mode must bypass the gate: {}", result.stderr);

    let status = run(temp_dir.path(), &["status"]);
    assert!(status.stderr.contains("content-generation"));
}

#[test]
fn sticky_demo_flag_bypasses_the_gate() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);
    run(temp_dir.path(), &["strategy", "select", "1"]);
    run(temp_dir.path(), &["topics", "generate"]);

    run(temp_dir.path(), &["demo", "on"]);
    let result = run(temp_dir.path(), &["topics", "select", "scenario-1"]);
    assert_eq!(result.code, 0);

    run(temp_dir.path(), &["demo", "off"]);
    let result = run(temp_dir.path(), &["demo", "status"]);
    assert!(result.stderr.contains("off"));
}

#[test]
fn failed_generation_aborts_and_rewinds() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);
    run(temp_dir.path(), &["strategy", "select", "1"]);
    run(temp_dir.path(), &["topics", "generate"]);
    run(temp_dir.path(), &["--demo", "topics", "select", "scenario-1"]);

    // Backend is down: generation must abort and report, never fabricate
    let result = run(temp_dir.path(), &["--demo", "content", "generate"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0502"));

    let status = run(temp_dir.path(), &["status"]);
    assert!(status.stderr.contains("topic-generation"));

    // And no article text exists
    let show = run(temp_dir.path(), &["content", "show"]);
    assert_eq!(show.code, 1);
    assert!(show.stderr.contains("E0501"));
}

#[test]
fn strategy_selection_out_of_range_and_locked() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);

    let result = run(temp_dir.path(), &["strategy", "select", "9"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0301"));

    let unlock = run(temp_dir.path(), &["strategy", "unlock"]);
    assert_eq!(unlock.code, 1);
    assert!(unlock.stderr.contains("E0601"));

    let unlock = run(
        temp_dir.path(),
        &["strategy", "unlock", "--email", "lead@example.com"],
    );
    assert_eq!(unlock.code, 0);
    assert!(unlock.stderr.contains("unlocked"));
}
