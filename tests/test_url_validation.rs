//! Tests for URL validation at the CLI boundary.

mod common;

use common::{init_project, run};

#[test]
fn rejects_free_text() {
    let temp_dir = init_project();
    let result = run(temp_dir.path(), &["analyze", "not a url"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0101"));
}

#[test]
fn rejects_undotted_host() {
    let temp_dir = init_project();
    let result = run(temp_dir.path(), &["analyze", "localhost"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0101"));
}

#[test]
fn rejected_url_leaves_no_session() {
    let temp_dir = init_project();
    let result = run(temp_dir.path(), &["analyze", "localhost"]);
    assert_eq!(result.code, 1);
    assert!(
        !temp_dir
            .path()
            .join("blog/workflow_progress_anonymous.json")
            .exists()
    );
}

#[test]
fn accepts_bare_and_schemed_hosts() {
    // Backend is unreachable in this test; the analysis falls back but the
    // URL itself must be accepted
    for url in ["example.com", "http://example.com", "https://sub.example.co.uk"] {
        let temp_dir = init_project();
        let result = run(temp_dir.path(), &["analyze", url]);
        assert_eq!(result.code, 0, "url {url} was rejected: {}", result.stderr);
    }
}

#[test]
fn normalizes_scheme_into_session() {
    let temp_dir = init_project();
    run(temp_dir.path(), &["analyze", "acme.com"]);
    let result = run(temp_dir.path(), &["status"]);
    assert!(result.stderr.contains("https://acme.com"));
}
