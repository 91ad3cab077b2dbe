//! End-to-end flow against a mocked backend: scenario ordering, topic
//! truncation, content generation, export, and the export lock.

mod common;

use common::{init_project, run_env};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn analysis_body() -> serde_json::Value {
    json!({
        "success": true,
        "analysis": {
            "businessName": "Acme Tools",
            "businessType": "Hardware",
            "targetAudience": "Makers and hobbyists",
            "contentFocus": "Workshop techniques",
            "brandVoice": "Direct, practical",
            "keywords": ["tools", "workshop"],
            "scenarios": [
                {"title": "S3", "customerProblem": "p3", "businessValue": {"priority": 3}},
                {"title": "S1", "customerProblem": "p1", "seoKeywords": ["k1"],
                 "businessValue": {"priority": 1}},
                {"title": "S2", "customerProblem": "p2", "businessValue": {"priority": 2}}
            ],
            "webSearchStatus": {"enhancementComplete": true}
        }
    })
}

fn topics_body(count: usize) -> serde_json::Value {
    let topics: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            json!({
                "id": format!("t{i}"),
                "title": format!("Topic {i}"),
                "subheader": format!("Subheader {i}"),
                "category": "Workshop",
                "seoBenefit": "High intent searches"
            })
        })
        .collect();
    json!({ "topics": topics })
}

fn start_backend(rt: &tokio::runtime::Runtime, article: &str) -> MockServer {
    let article = article.to_string();
    rt.block_on(async move {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/analyze-website"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/trending-topics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(topics_body(5)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/generate-content"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "blogPost": { "content": article } })),
            )
            .mount(&server)
            .await;
        server
    })
}

#[test]
fn full_flow_generates_and_exports() {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let article = "Sharp chisels cut clean.\nDull chisels cut fingers.";
    let server = start_backend(&rt, article);
    let uri = server.uri();
    let env: &[(&str, &str)] = &[("AUTOBLOG_API_URL", uri.as_str())];

    let temp_dir = init_project();
    let dir = temp_dir.path();

    // Analysis succeeds without fallback warnings
    let result = run_env(dir, env, &["analyze", "acme.com"]);
    assert_eq!(result.code, 0);
    assert!(!result.stderr.contains("W0101"));
    assert!(result.stderr.contains("Acme Tools"));

    // Priorities [3,1,2] present as [1,2,3]; the third is gated
    let list = run_env(dir, env, &["strategy", "list", "--output", "plain"]);
    let rows: Vec<&str> = list.stdout.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].contains("S1"));
    assert!(rows[1].contains("S2"));
    assert!(rows[2].contains("S3"));
    assert!(rows[2].contains("(locked)"));
    assert!(list.stderr.contains("1 more strategies are locked"));

    let locked = run_env(dir, env, &["strategy", "select", "3"]);
    assert_eq!(locked.code, 1);
    assert!(locked.stderr.contains("E0302"));

    assert_eq!(run_env(dir, env, &["strategy", "select", "1"]).code, 0);

    // Backend list of 5 truncates to 2
    assert_eq!(run_env(dir, env, &["topics", "generate"]).code, 0);
    let topics = run_env(dir, env, &["topics", "list", "--output", "plain"]);
    assert_eq!(topics.stdout.lines().count(), 2);
    assert!(topics.stdout.contains("t1"));
    assert!(topics.stdout.contains("t2"));
    assert!(!topics.stdout.contains("Topic 3"));

    // Demo account passes the gate; generation succeeds
    assert_eq!(run_env(dir, env, &["demo", "on"]).code, 0);
    assert_eq!(run_env(dir, env, &["topics", "select", "t1"]).code, 0);
    let generated = run_env(dir, env, &["content", "generate"]);
    assert_eq!(generated.code, 0, "generation failed: {}", generated.stderr);

    let show = run_env(dir, env, &["content", "show"]);
    assert!(show.stdout.contains("Sharp chisels cut clean."));
    assert!(show.stdout.contains("# Topic 1"));

    // Draft content is editable
    let edited = "Sharp chisels cut clean.\nDull chisels cut fingers.\nKeep them sharp.";
    let edit = run_env(dir, env, &["content", "edit", "--text", edited]);
    assert_eq!(edit.code, 0, "draft edit failed: {}", edit.stderr);
    let show = run_env(dir, env, &["content", "show"]);
    assert!(show.stdout.contains("Keep them sharp."));

    // Regeneration snapshots the previous version only after success
    let regen = run_env(dir, env, &["content", "regenerate", "--feedback", "tighten"]);
    assert_eq!(regen.code, 0, "regeneration failed: {}", regen.stderr);
    let changes = run_env(dir, env, &["content", "changes"]);
    assert_eq!(changes.code, 0);
    assert!(changes.stdout.contains("-1 sentences removed"));
    assert!(changes.stdout.contains("Feedback applied: tighten"));

    // Export markdown, then verify the lock holds across formats
    let export = run_env(dir, env, &["export", "markdown"]);
    assert_eq!(export.code, 0, "export failed: {}", export.stderr);
    let md_path = dir.join("exports/topic-1.md");
    assert!(md_path.exists());
    let md = std::fs::read_to_string(&md_path).expect("read export");
    assert!(md.starts_with("# Topic 1\n"));
    assert!(md.contains("Subheader 1"));
    assert!(md.contains("Sharp chisels cut clean."));
    assert!(md.contains("Word count:"));
    assert!(md.contains("Source: https://acme.com"));

    let status = run_env(dir, env, &["status"]);
    assert!(status.stderr.contains("exported"));

    // Edits after export are rejected with a warning and change nothing
    let edit = run_env(dir, env, &["content", "edit", "--text", "overwrite attempt"]);
    assert_eq!(edit.code, 0, "lock rejection is a warning, not an error");
    assert!(edit.stderr.contains("W0103"));
    let show = run_env(dir, env, &["content", "show"]);
    assert!(show.stdout.contains("Sharp chisels cut clean."));
    assert!(!show.stdout.contains("overwrite attempt"));

    let regen = run_env(dir, env, &["content", "regenerate", "--feedback", "x"]);
    assert_eq!(regen.code, 0);
    assert!(regen.stderr.contains("W0103"));

    // Re-export in another format still works on the locked post
    let export_json = run_env(dir, env, &["export", "json"]);
    assert_eq!(export_json.code, 0);
    let json_path = dir.join("exports/topic-1.json");
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).expect("read json export"))
            .expect("parse json export");
    assert_eq!(exported["title"], "Topic 1");
    assert_eq!(exported["slug"], "topic-1");
    assert_eq!(exported["metadata"]["autoGenerated"], true);
    assert_eq!(exported["brandColors"]["primary"], "#6B8CAE");
    assert_eq!(exported["sourceWebsite"], "https://acme.com");

    // Saved post recorded both exports
    let stats = run_env(dir, env, &["posts", "stats"]);
    assert!(stats.stderr.contains("Exports: 2"));
}

#[test]
fn html_export_carries_brand_colors() {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let server = start_backend(&rt, "One line.\nTwo line.");
    let uri = server.uri();
    let env: &[(&str, &str)] = &[("AUTOBLOG_API_URL", uri.as_str())];

    let temp_dir = init_project();
    let dir = temp_dir.path();
    run_env(dir, env, &["analyze", "acme.com"]);
    run_env(dir, env, &["strategy", "select", "1"]);
    run_env(dir, env, &["topics", "generate"]);
    run_env(dir, env, &["demo", "on"]);
    run_env(dir, env, &["topics", "select", "t2"]);
    run_env(dir, env, &["content", "generate"]);

    let export = run_env(dir, env, &["export", "html"]);
    assert_eq!(export.code, 0, "html export failed: {}", export.stderr);
    let html = std::fs::read_to_string(dir.join("exports/topic-2.html")).expect("read html");
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("#6B8CAE"));
    assert!(html.contains("One line.<br>"));
    assert!(html.contains("<title>Topic 2</title>"));
}

#[test]
fn zip_export_is_unsupported() {
    let temp_dir = init_project();
    let result = run_env(temp_dir.path(), &[], &["export", "zip"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0701"));
}

#[test]
fn unauthenticated_generation_makes_no_backend_call() {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/analyze-website"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/trending-topics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(topics_body(2)))
            .mount(&server)
            .await;
        // The gate must fire before any generation request
        Mock::given(method("POST"))
            .and(path("/api/generate-content"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        server
    });
    let uri = server.uri();
    let env: &[(&str, &str)] = &[("AUTOBLOG_API_URL", uri.as_str())];

    let temp_dir = init_project();
    let dir = temp_dir.path();
    run_env(dir, env, &["analyze", "acme.com"]);
    run_env(dir, env, &["strategy", "select", "1"]);
    run_env(dir, env, &["topics", "generate"]);
    // Selection passes only with the one-shot demo flag
    run_env(dir, env, &["--demo", "topics", "select", "t1"]);

    // Without demo or an account, generation is redirected to the gate
    let result = run_env(dir, env, &["content", "generate"]);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("E0601"));

    rt.block_on(server.verify());
}

#[test]
fn bounded_enhancement_wait_gives_up_with_warning() {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        let mut body = analysis_body();
        body["analysis"]["webSearchStatus"]["enhancementComplete"] = json!(false);
        Mock::given(method("POST"))
            .and(path("/api/analyze-website"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    });
    let uri = server.uri();
    let env: &[(&str, &str)] = &[("AUTOBLOG_API_URL", uri.as_str())];

    let temp_dir = init_project();
    let dir = temp_dir.path();
    // Tighten the backoff so the test finishes quickly
    std::fs::write(
        dir.join("blog/config.toml"),
        "[analysis]\npoll_base_ms = 10\npoll_max_attempts = 2\n",
    )
    .expect("write config");

    let result = run_env(dir, env, &["analyze", "acme.com"]);
    assert_eq!(result.code, 0, "incomplete enhancement must not fail");
    assert!(result.stderr.contains("W0102"));
}
