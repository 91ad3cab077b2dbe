//! Tests for session resume, reset, and the 24-hour snapshot TTL.

mod common;

use chrono::{Duration, Utc};
use common::{init_project, run};

#[test]
fn resume_without_session_reports_missing() {
    let temp_dir = init_project();
    let result = run(temp_dir.path(), &["resume"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0804"));
}

#[test]
fn resume_after_analyze_succeeds() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);

    let result = run(temp_dir.path(), &["resume"]);
    assert_eq!(result.code, 0);
    assert!(result.stderr.contains("Resumed session"));
    assert!(result.stderr.contains("https://acme.com"));
}

#[test]
fn reset_discards_the_session() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);

    let result = run(temp_dir.path(), &["reset"]);
    assert_eq!(result.code, 0);

    let result = run(temp_dir.path(), &["resume"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0804"));
}

fn write_stale_snapshot(dir: &std::path::Path) {
    let stale = (Utc::now() - Duration::hours(48)).to_rfc3339();
    let snapshot = format!(
        r#"{{
            "current_step": "editing",
            "website_url": "https://acme.com",
            "generated_content": "old draft",
            "session_id": "session_1_abcd",
            "saved_at": "{stale}"
        }}"#
    );
    std::fs::write(dir.join("blog/workflow_progress_anonymous.json"), snapshot)
        .expect("write snapshot");
}

#[test]
fn resume_refuses_expired_snapshot() {
    let temp_dir = init_project();
    write_stale_snapshot(temp_dir.path());

    let result = run(temp_dir.path(), &["resume"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0803"));
}

#[test]
fn stale_snapshot_starts_fresh_with_warning() {
    let temp_dir = init_project();
    write_stale_snapshot(temp_dir.path());

    let result = run(temp_dir.path(), &["status"]);
    assert_eq!(result.code, 0);
    assert!(result.stderr.contains("W0106"));
    assert!(result.stderr.contains("url-entry"));
}

#[test]
fn fresh_snapshot_survives_status() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);

    // A read-only command must not expire or clobber the snapshot
    run(temp_dir.path(), &["status"]);
    let result = run(temp_dir.path(), &["resume"]);
    assert_eq!(result.code, 0);
}
