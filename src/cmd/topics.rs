//! Topic commands: generate, list, and the gated selection.

use crate::OutputFormat;
use crate::analysis;
use crate::api::ApiClient;
use crate::cmd;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::gate;
use crate::lock::acquire_state_lock;
use crate::model::Step;
use crate::session;
use crate::topics::{self as topicgen, TopicsOutcome};
use crate::ui;
use serde::Serialize;

/// Generate topic candidates from the analysis and selected strategy.
/// Generation itself is ungated; selection is not.
pub fn generate(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let (mut state, mut diags) = cmd::load_state(config, &auth);

    if state.analysis.is_none() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0201AnalysisMissing,
            "No analysis yet. Run: autoblog analyze <url>",
            "topics generate",
        )]);
    }
    if state.selected_strategy.is_none() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0303StrategyNotSelected,
            "Select a strategy first: autoblog strategy select <n>",
            "topics generate",
        )]);
    }

    let api = ApiClient::new(&config.api, auth.access_token.clone())?;

    // Topic quality depends on the web-search enhancement; wait for it with
    // bounded backoff, then proceed with whatever data exists
    let url = state.website_url.clone();
    if let Some(a) = state.analysis.as_mut() {
        diags.extend(analysis::ensure_enhanced(&api, &url, a, &config.analysis));
    }

    let scenario = state.selected_scenario().cloned();
    let Some(analysis_ref) = &state.analysis else {
        // Checked above; analysis cannot vanish between the two borrows
        return Ok(diags);
    };

    let (outcome, topic_diags) = topicgen::generate(
        &api,
        analysis_ref,
        scenario.as_ref(),
        config.gates.free_topic_limit,
    );
    diags.extend(topic_diags);

    let topics = match outcome {
        TopicsOutcome::Generated(topics) | TopicsOutcome::FromScenario(topics) => topics,
        TopicsOutcome::Unavailable => {
            diags.push(Diagnostic::new(
                DiagnosticCode::E0403TopicsUnavailable,
                "No content ideas available. Try editing the analysis or re-analyzing.",
                "topics generate",
            ));
            return Ok(diags);
        }
    };

    ui::generated("topics", topics.len());
    for topic in &topics {
        ui::sub_info(format!("[{}] {}", topic.id, topic.title));
    }
    ui::success("Next: autoblog topics select <id>");

    state.topics = topics;
    cmd::save_state(config, &auth, &mut state)?;
    cmd::track(
        config,
        &auth,
        &state,
        "topics_generated",
        serde_json::json!({ "count": state.topics.len() }),
        &mut diags,
    );
    Ok(diags)
}

/// Serializable topic summary for JSON output
#[derive(Serialize)]
struct TopicSummary {
    id: String,
    title: String,
    category: String,
    seo_benefit: String,
}

/// List the generated topics
pub fn list(config: &Config, output: OutputFormat) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let (state, diags) = cmd::load_state(config, &auth);

    if state.topics.is_empty() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0401TopicsNotGenerated,
            "No topics yet. Run: autoblog topics generate",
            "topics list",
        )]);
    }

    let summaries: Vec<TopicSummary> = state
        .topics
        .iter()
        .map(|t| TopicSummary {
            id: t.id.clone(),
            title: t.title.clone(),
            category: t.category.clone(),
            seo_benefit: t.seo_benefit.clone(),
        })
        .collect();

    cmd::output_list(
        &summaries,
        &["Topic", "Title", "Category", "SEO Benefit"],
        output,
        |t| {
            vec![
                t.id.clone(),
                t.title.clone(),
                t.category.clone(),
                t.seo_benefit.clone(),
            ]
        },
    );

    Ok(diags)
}

/// Select a topic. The full account gate applies here: without an account
/// (or demo mode) the command redirects to signup and performs no state
/// change and no network call.
pub fn select(config: &Config, demo_flag: bool, id: &str) -> anyhow::Result<Vec<Diagnostic>> {
    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);
    let (mut state, mut diags) = cmd::load_state(config, &auth);

    if state.topics.is_empty() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0401TopicsNotGenerated,
            "No topics yet. Run: autoblog topics generate",
            "topics select",
        )]);
    }

    // Gate before anything else: selecting a topic targets content
    // generation
    if gate::requires_gate(Step::ContentGeneration, auth.is_logged_in(), demo) {
        ui::gate_notice(
            "Content generation needs an account. Run: autoblog auth register --email <you> \
             (or enable demo mode)",
        );
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0601AccountRequired,
            "Topic selection requires an account",
            "topics select",
        )]);
    }

    let Some(topic) = state.topics.iter().find(|t| t.id == id) else {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0402TopicNotFound,
            format!("Topic not found: {id}"),
            "topics select",
        )]);
    };
    let title = topic.title.clone();

    // Selecting a topic starts a fresh article thread
    state.reset_article();
    state.selected_topic_id = Some(id.to_string());
    state.current_step = Step::ContentGeneration;
    cmd::save_state(config, &auth, &mut state)?;
    cmd::track(
        config,
        &auth,
        &state,
        "topic_selected",
        serde_json::json!({ "id": id, "title": title }),
        &mut diags,
    );

    ui::selected("topic", &title);
    ui::success("Next: autoblog content generate");
    Ok(diags)
}
