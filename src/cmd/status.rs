//! Status and health commands.

use crate::api::ApiClient;
use crate::cmd;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::{PostState, Step};
use crate::render;
use crate::session;
use crate::ui;
use crate::validate::is_valid_step_transition;

const STEPS: [Step; 7] = [
    Step::UrlEntry,
    Step::Analyzing,
    Step::StrategySelection,
    Step::TopicGeneration,
    Step::ContentGeneration,
    Step::Editing,
    Step::Exporting,
];

/// Show wizard position and session summary
pub fn show_status(config: &Config, demo_flag: bool) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);
    let (state, diags) = cmd::load_state(config, &auth);

    let position = STEPS
        .iter()
        .position(|s| *s == state.current_step)
        .unwrap_or(0)
        + 1;
    ui::step_banner(position, STEPS.len(), state.current_step.as_ref());
    ui::status_count("Project", &config.project.name);

    if !state.website_url.is_empty() {
        ui::status_count("Website", &state.website_url);
    }
    if let Some(analysis) = &state.analysis {
        ui::status_count("Business", &analysis.business_name);
        ui::status_count("Strategies", analysis.scenarios.len());
    }
    if let Some(scenario) = state.selected_scenario() {
        ui::status_count("Strategy", &scenario.title);
    }
    if !state.topics.is_empty() {
        ui::status_count("Topics", state.topics.len());
    }
    if let Some(topic) = state.selected_topic() {
        ui::status_count("Topic", &topic.title);
    }
    if !state.generated_content.is_empty() {
        ui::status_count(
            "Article",
            format!(
                "{} words, {} min read",
                render::word_count(&state.generated_content),
                render::reading_time(&state.generated_content)
            ),
        );
    }
    ui::status_count("Post state", state.post_state.as_ref());
    ui::status_count(
        "Account",
        auth.account
            .as_ref()
            .map(|a| a.email.as_str())
            .unwrap_or("none"),
    );
    ui::status_count("Demo mode", if demo { "on" } else { "off" });

    // Next step from the transition table; a locked post has nowhere to go
    if state.post_state != PostState::Exported {
        let next = STEPS
            .iter()
            .copied()
            .find(|s| is_valid_step_transition(state.current_step, *s));
        if let Some(next) = next {
            ui::status_count("Next step", next.as_ref());
        }
    }

    Ok(diags)
}

/// Probe the backend /health endpoint
pub fn health(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let api = ApiClient::new(&config.api, auth.access_token.clone())?;
    match api.health() {
        Ok(resp) => {
            ui::success(format!("Backend is {}", resp.status));
            if let Some(message) = resp.message {
                ui::sub_info(message);
            }
            Ok(vec![])
        }
        Err(err) => Ok(vec![Diagnostic::new(
            DiagnosticCode::E0903ApiError,
            format!("Backend unreachable: {err}"),
            config.api.effective_base_url(),
        )]),
    }
}
