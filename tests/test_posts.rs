//! Tests for the saved-posts, projects, activity, and stats commands.

mod common;

use chrono::Utc;
use common::{init_project, run};
use serde_json::json;

fn seed_collections(dir: &std::path::Path) {
    let now = Utc::now().to_rfc3339();
    let posts = json!([
        {
            "id": "post_1_aaaa",
            "title": "Older Post",
            "content": "Old body.",
            "version": 1,
            "created_at": now,
            "updated_at": "2026-01-01T00:00:00+00:00",
            "export_count": 0,
            "status": "draft"
        },
        {
            "id": "post_2_bbbb",
            "title": "Newer Post",
            "content": "New body.",
            "version": 3,
            "created_at": now,
            "updated_at": now,
            "export_count": 2,
            "status": "exported"
        }
    ]);
    let activity = json!([
        {
            "id": "activity_1_aaaa",
            "event_type": "content_generation",
            "event_data": {},
            "timestamp": now,
            "session_id": "session_1_aaaa"
        },
        {
            "id": "activity_2_bbbb",
            "event_type": "content_export",
            "event_data": {"format": "markdown"},
            "timestamp": now,
            "session_id": "session_1_aaaa"
        }
    ]);
    std::fs::write(
        dir.join("blog/posts.json"),
        serde_json::to_string_pretty(&posts).expect("posts json"),
    )
    .expect("write posts");
    std::fs::write(
        dir.join("blog/activity.json"),
        serde_json::to_string_pretty(&activity).expect("activity json"),
    )
    .expect("write activity");
}

#[test]
fn posts_list_orders_newest_first() {
    let temp_dir = init_project();
    seed_collections(temp_dir.path());

    let result = run(temp_dir.path(), &["posts", "list", "--output", "plain"]);
    assert_eq!(result.code, 0);
    let rows: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("Newer Post"));
    assert!(rows[1].contains("Older Post"));
    assert!(rows[0].contains("exported"));
}

#[test]
fn posts_stats_aggregates_counters() {
    let temp_dir = init_project();
    seed_collections(temp_dir.path());

    let result = run(temp_dir.path(), &["posts", "stats"]);
    assert_eq!(result.code, 0);
    assert!(result.stderr.contains("Content generations: 1"));
    assert!(result.stderr.contains("Posts: 2"));
    assert!(result.stderr.contains("Exports: 2"));
    assert!(result.stderr.contains("Activity this week: 2"));
}

#[test]
fn activity_lists_recent_events() {
    let temp_dir = init_project();
    seed_collections(temp_dir.path());

    let result = run(temp_dir.path(), &["activity", "--output", "plain"]);
    assert_eq!(result.code, 0);
    assert!(result.stdout.contains("content_generation"));
    assert!(result.stdout.contains("content_export"));
}

#[test]
fn empty_collections_report_cleanly() {
    let temp_dir = init_project();
    let result = run(temp_dir.path(), &["posts", "list"]);
    assert_eq!(result.code, 0);
    assert!(result.stderr.contains("No posts available"));

    let result = run(temp_dir.path(), &["projects", "list"]);
    assert_eq!(result.code, 0);
    assert!(result.stderr.contains("No projects available"));
}

#[test]
fn project_save_requires_analysis() {
    let temp_dir = init_project();
    let result = run(temp_dir.path(), &["projects", "save"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0201"));
}

#[test]
fn project_save_after_analysis() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);

    let result = run(temp_dir.path(), &["projects", "save"]);
    assert_eq!(result.code, 0);
    assert!(result.stderr.contains("Saved project 'Acme'"));

    let result = run(temp_dir.path(), &["projects", "list", "--output", "plain"]);
    assert!(result.stdout.contains("Acme"));
    assert!(result.stdout.contains("https://acme.com"));
}
