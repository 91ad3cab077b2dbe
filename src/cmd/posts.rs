//! Saved-posts, statistics, and activity commands.

use crate::OutputFormat;
use crate::cmd;
use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::session;
use crate::store;
use crate::ui;
use serde::Serialize;

/// Serializable post summary for JSON output
#[derive(Serialize)]
struct PostSummary {
    id: String,
    title: String,
    version: u32,
    status: String,
    exports: u32,
    updated_at: String,
}

/// List saved posts, newest update first
pub fn list(config: &Config, output: OutputFormat) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let user_id = auth.user_id();
    let posts = store::list_posts(config, user_id.as_deref());

    if posts.is_empty() {
        ui::not_found("posts");
        return Ok(vec![]);
    }

    let summaries: Vec<PostSummary> = posts
        .iter()
        .map(|p| PostSummary {
            id: p.id.clone(),
            title: p.title.clone(),
            version: p.version,
            status: p.status.as_ref().to_string(),
            exports: p.export_count,
            updated_at: p.updated_at.clone(),
        })
        .collect();

    cmd::output_list(
        &summaries,
        &["Post", "Title", "Version", "Status", "Exports", "Updated"],
        output,
        |p| {
            vec![
                p.id.clone(),
                p.title.clone(),
                p.version.to_string(),
                p.status.clone(),
                p.exports.to_string(),
                p.updated_at.clone(),
            ]
        },
    );

    Ok(vec![])
}

/// Show usage statistics across all collections
pub fn stats(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let stats = store::usage_stats(config);
    ui::info("Usage statistics:");
    ui::status_count("Content generations", stats.total_generations);
    ui::status_count("Projects", stats.total_projects);
    ui::status_count("Posts", stats.total_posts);
    ui::status_count("Exports", stats.total_exports);
    ui::status_count("Activity this week", stats.recent_activity);
    Ok(vec![])
}

/// Serializable activity summary for JSON output
#[derive(Serialize)]
struct ActivitySummary {
    id: String,
    event_type: String,
    timestamp: String,
}

/// Show the most recent activity records
pub fn activity(
    config: &Config,
    limit: usize,
    output: OutputFormat,
) -> anyhow::Result<Vec<Diagnostic>> {
    let records = store::recent_activities(config, limit);
    if records.is_empty() {
        ui::not_found("activity records");
        return Ok(vec![]);
    }

    let summaries: Vec<ActivitySummary> = records
        .iter()
        .map(|r| ActivitySummary {
            id: r.id.clone(),
            event_type: r.event_type.clone(),
            timestamp: r.timestamp.clone(),
        })
        .collect();

    cmd::output_list(
        &summaries,
        &["Activity", "Event", "Timestamp"],
        output,
        |a| {
            vec![
                a.id.clone(),
                a.event_type.clone(),
                a.timestamp.clone(),
            ]
        },
    );

    Ok(vec![])
}
