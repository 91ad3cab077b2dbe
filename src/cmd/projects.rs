//! Saved-projects commands.

use crate::OutputFormat;
use crate::cmd;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::lock::acquire_state_lock;
use crate::session;
use crate::store;
use crate::ui;
use serde::Serialize;

/// Serializable project summary for JSON output
#[derive(Serialize)]
struct ProjectSummary {
    id: String,
    name: String,
    website_url: String,
    last_modified: String,
}

/// List saved projects, newest change first
pub fn list(config: &Config, output: OutputFormat) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let user_id = auth.user_id();
    let projects = store::list_projects(config, user_id.as_deref());

    if projects.is_empty() {
        ui::not_found("projects");
        return Ok(vec![]);
    }

    let summaries: Vec<ProjectSummary> = projects
        .iter()
        .map(|p| ProjectSummary {
            id: p.id.clone(),
            name: p.name.clone(),
            website_url: p.website_url.clone(),
            last_modified: p.last_modified.clone(),
        })
        .collect();

    cmd::output_list(
        &summaries,
        &["Project", "Name", "Website", "Modified"],
        output,
        |p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                p.website_url.clone(),
                p.last_modified.clone(),
            ]
        },
    );

    Ok(vec![])
}

/// Save the current analysis as a named project
pub fn save(config: &Config, name: Option<&str>) -> anyhow::Result<Vec<Diagnostic>> {
    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let (state, _diags) = cmd::load_state(config, &auth);

    let Some(analysis) = &state.analysis else {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0201AnalysisMissing,
            "No analysis to save. Run: autoblog analyze <url>",
            "projects save",
        )]);
    };

    let project_name = name
        .map(str::to_string)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| analysis.business_name.clone());

    let user_id = auth.user_id();
    let project = store::save_project(
        config,
        &project_name,
        &state.website_url,
        analysis,
        user_id.as_deref(),
    )?;

    ui::success(format!("Saved project '{}' ({})", project.name, project.id));
    Ok(vec![])
}
