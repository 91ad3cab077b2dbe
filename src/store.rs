//! Persisted collections: projects, posts, and the activity log.
//!
//! Each collection is a JSON ring buffer (newest first) with a hard capacity
//! applied before every write, so storage can never grow without bound.
//! Storage failures degrade to warnings at the call sites; they never stop
//! the wizard.

use crate::config::Config;
use crate::model::{
    ActivityRecord, ContentStrategy, SavedPost, SavedProject, Topic, UsageStats, WebsiteAnalysis,
};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Capacity of the saved-projects ring buffer
pub const MAX_PROJECTS: usize = 50;
/// Capacity of the saved-posts ring buffer
pub const MAX_POSTS: usize = 100;
/// Capacity of the activity log ring buffer
pub const MAX_ACTIVITIES: usize = 1000;

/// Generate a collection item id: `{prefix}_{millis}_{hex4}`
pub fn generate_id(prefix: &str) -> String {
    use rand::RngExt;
    let mut rng = rand::rng();
    let bytes: [u8; 2] = rng.random();
    format!(
        "{prefix}_{}_{:02x}{:02x}",
        Utc::now().timestamp_millis(),
        bytes[0],
        bytes[1]
    )
}

/// Read a JSON collection; a missing or unreadable file is an empty one
pub fn read_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Write a JSON collection, creating the state root on first use
fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create state root: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(items)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write collection: {}", path.display()))?;
    Ok(())
}

// =============================================================================
// Projects
// =============================================================================

/// Save a website analysis as a named project (newest first, capped)
pub fn save_project(
    config: &Config,
    name: &str,
    website_url: &str,
    analysis: &WebsiteAnalysis,
    user_id: Option<&str>,
) -> Result<SavedProject> {
    let path = config.projects_path();
    let mut projects: Vec<SavedProject> = read_collection(&path);

    let now = Utc::now().to_rfc3339();
    let project = SavedProject {
        id: generate_id("project"),
        name: name.to_string(),
        website_url: website_url.to_string(),
        analysis: analysis.clone(),
        created_at: now.clone(),
        last_modified: now,
        user_id: user_id.map(str::to_string),
    };

    projects.insert(0, project.clone());
    projects.truncate(MAX_PROJECTS);
    write_collection(&path, &projects)?;
    Ok(project)
}

/// List saved projects, optionally filtered by user, newest change first
pub fn list_projects(config: &Config, user_id: Option<&str>) -> Vec<SavedProject> {
    let mut projects: Vec<SavedProject> = read_collection(&config.projects_path());
    if let Some(uid) = user_id {
        projects.retain(|p| p.user_id.as_deref() == Some(uid));
    }
    projects.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    projects
}

// =============================================================================
// Posts
// =============================================================================

/// Save a content version. A post with the same id (or same title within the
/// same project) gets its version bumped instead of a new entry; the original
/// creation date is kept.
#[allow(clippy::too_many_arguments)]
pub fn save_post_version(
    config: &Config,
    post_id: Option<&str>,
    title: &str,
    content: &str,
    project_id: Option<&str>,
    topic: Option<&Topic>,
    strategy: Option<&ContentStrategy>,
    user_id: Option<&str>,
) -> Result<SavedPost> {
    let path = config.posts_path();
    let mut posts: Vec<SavedPost> = read_collection(&path);

    let now = Utc::now().to_rfc3339();
    let id = post_id
        .map(str::to_string)
        .unwrap_or_else(|| generate_id("post"));

    let mut post = SavedPost {
        id: id.clone(),
        title: title.to_string(),
        content: content.to_string(),
        version: 1,
        project_id: project_id.map(str::to_string),
        topic: topic.cloned(),
        strategy: strategy.copied(),
        created_at: now.clone(),
        updated_at: now,
        user_id: user_id.map(str::to_string),
        export_count: 0,
        last_exported_at: None,
        last_export_format: None,
        status: Default::default(),
    };

    let existing = posts
        .iter()
        .position(|p| p.id == id || (p.title == title && p.project_id.as_deref() == project_id));

    if let Some(idx) = existing {
        post.version = posts[idx].version + 1;
        post.created_at = posts[idx].created_at.clone();
        post.export_count = posts[idx].export_count;
        posts[idx] = post.clone();
    } else {
        posts.insert(0, post.clone());
    }

    posts.truncate(MAX_POSTS);
    write_collection(&path, &posts)?;
    Ok(post)
}

/// List saved posts, newest update first
pub fn list_posts(config: &Config, user_id: Option<&str>) -> Vec<SavedPost> {
    let mut posts: Vec<SavedPost> = read_collection(&config.posts_path());
    if let Some(uid) = user_id {
        posts.retain(|p| p.user_id.as_deref() == Some(uid));
    }
    posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    posts
}

/// Record an export against a saved post: bump the counter, stamp the format,
/// and mark the post exported
pub fn track_export(config: &Config, post_id: &str, format: &str) -> Result<()> {
    let path = config.posts_path();
    let mut posts: Vec<SavedPost> = read_collection(&path);

    if let Some(post) = posts.iter_mut().find(|p| p.id == post_id) {
        post.export_count += 1;
        post.last_exported_at = Some(Utc::now().to_rfc3339());
        post.last_export_format = Some(format.to_string());
        post.status = crate::model::PostState::Exported;
        write_collection(&path, &posts)?;
    }
    Ok(())
}

// =============================================================================
// Activity log
// =============================================================================

/// Append an activity record (newest first, capped)
pub fn track_activity(
    config: &Config,
    event_type: &str,
    event_data: serde_json::Value,
    session_id: &str,
    user_id: Option<&str>,
) -> Result<ActivityRecord> {
    let path = config.activity_path();
    let mut activities: Vec<ActivityRecord> = read_collection(&path);

    let record = ActivityRecord {
        id: generate_id("activity"),
        event_type: event_type.to_string(),
        event_data,
        timestamp: Utc::now().to_rfc3339(),
        session_id: session_id.to_string(),
        user_id: user_id.map(str::to_string),
    };

    activities.insert(0, record.clone());
    activities.truncate(MAX_ACTIVITIES);
    write_collection(&path, &activities)?;
    Ok(record)
}

/// Most recent activity records
pub fn recent_activities(config: &Config, limit: usize) -> Vec<ActivityRecord> {
    let mut activities: Vec<ActivityRecord> = read_collection(&config.activity_path());
    activities.truncate(limit);
    activities
}

// =============================================================================
// Usage statistics
// =============================================================================

/// Aggregate counters across all collections
pub fn usage_stats(config: &Config) -> UsageStats {
    let activities: Vec<ActivityRecord> = read_collection(&config.activity_path());
    let posts: Vec<SavedPost> = read_collection(&config.posts_path());
    let projects: Vec<SavedProject> = read_collection(&config.projects_path());

    let week_ago = Utc::now() - Duration::days(7);
    let recent_activity = activities
        .iter()
        .filter(|a| {
            chrono::DateTime::parse_from_rfc3339(&a.timestamp)
                .map(|t| t.with_timezone(&Utc) > week_ago)
                .unwrap_or(false)
        })
        .count();

    UsageStats {
        total_generations: activities
            .iter()
            .filter(|a| a.event_type == "content_generation")
            .count(),
        total_projects: projects.len(),
        total_posts: posts.len(),
        total_exports: posts.iter().map(|p| u64::from(p.export_count)).sum(),
        recent_activity,
    }
}
