//! Content commands: generate, show, edit, regenerate, changes.

use crate::api::ApiClient;
use crate::cmd;
use crate::config::Config;
use crate::content as contentgen;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::diff;
use crate::gate;
use crate::lock::acquire_state_lock;
use crate::model::{
    ContentGoal, ContentLength, ContentTemplate, ContentVoice, Step, WizardState,
};
use crate::session::{self, AuthSession};
use crate::store;
use crate::ui;
use crate::validate::{check_mutable, require_step};
use std::io::Read;
use std::path::Path;

/// Article title for the session: the selected topic, or a name-derived
/// default
fn post_title(state: &WizardState) -> String {
    state
        .selected_topic()
        .map(|t| t.title.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| {
            let name = state
                .analysis
                .as_ref()
                .map(|a| a.business_name.as_str())
                .unwrap_or("Business");
            format!("{name} Insights")
        })
}

/// Persist the current content as a saved-post version; storage failures
/// degrade to a warning
fn save_version(
    config: &Config,
    auth: &AuthSession,
    state: &mut WizardState,
    diags: &mut Vec<Diagnostic>,
) {
    let title = post_title(state);
    let topic = state.selected_topic().cloned();
    let user_id = auth.user_id();
    match store::save_post_version(
        config,
        state.post_id.as_deref(),
        &title,
        &state.generated_content,
        None,
        topic.as_ref(),
        Some(&state.content_strategy),
        user_id.as_deref(),
    ) {
        Ok(post) => state.post_id = Some(post.id),
        Err(e) => diags.push(Diagnostic::new(
            DiagnosticCode::W0104StorageDegraded,
            format!("Could not save post version: {e}"),
            "posts",
        )),
    }
}

/// Generate the article for the selected topic. Failure aborts and rewinds
/// to topic selection; filler content is never substituted.
pub fn generate(config: &Config, demo_flag: bool) -> anyhow::Result<Vec<Diagnostic>> {
    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);
    let (mut state, mut diags) = cmd::load_state(config, &auth);

    if state.selected_topic_id.is_none() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0404TopicNotSelected,
            "Select a topic first: autoblog topics select <id>",
            "content generate",
        )]);
    }
    if let Err(diag) = require_step(state.current_step, Step::ContentGeneration, "generate content")
    {
        return Ok(vec![diag]);
    }

    // Account gate: redirect before any network call
    let Some(_account) = gate::resolve_account(
        auth.account.as_ref(),
        Step::ContentGeneration,
        demo,
    ) else {
        ui::gate_notice(
            "Content generation needs an account. Run: autoblog auth register --email <you> \
             (or enable demo mode)",
        );
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0601AccountRequired,
            "Content generation requires an account",
            "content generate",
        )]);
    };

    let api = ApiClient::new(&config.api, auth.access_token.clone())?;
    let scenario = state.selected_scenario().cloned();
    let instructions = contentgen::build_instructions(scenario.as_ref());

    let (topic, analysis) = match (state.selected_topic(), state.analysis.as_ref()) {
        (Some(t), Some(a)) => (t.clone(), a.clone()),
        _ => {
            return Ok(vec![Diagnostic::new(
                DiagnosticCode::E0201AnalysisMissing,
                "Session is missing analysis data; re-run: autoblog analyze <url>",
                "content generate",
            )]);
        }
    };

    match contentgen::generate(&api, &topic, &analysis, &instructions) {
        Ok(content) => {
            state.generated_content = content;
            state.current_step = Step::Editing;
            save_version(config, &auth, &mut state, &mut diags);
            cmd::save_state(config, &auth, &mut state)?;
            cmd::track(
                config,
                &auth,
                &state,
                "content_generation",
                serde_json::json!({ "topic": topic.id }),
                &mut diags,
            );
            ui::generated(
                "article",
                format!("{} characters", state.generated_content.len()),
            );
            ui::success("Next: autoblog content show, then autoblog export <format>");
            Ok(diags)
        }
        Err(err) => {
            // Abort and report: rewind to topic selection
            state.current_step = Step::TopicGeneration;
            cmd::save_state(config, &auth, &mut state)?;
            diags.push(Diagnostic::new(
                DiagnosticCode::E0502GenerationFailed,
                format!("Content generation failed: {err}"),
                "content generate",
            ));
            Ok(diags)
        }
    }
}

/// Print the article to stdout
pub fn show(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let (state, diags) = cmd::load_state(config, &auth);

    if state.generated_content.is_empty() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0501ContentMissing,
            "No article yet. Run: autoblog content generate",
            "content show",
        )]);
    }

    println!("# {}\n", post_title(&state));
    println!("{}", state.generated_content);
    Ok(diags)
}

/// Replace the article text from a flag, file, or stdin
pub fn edit(
    config: &Config,
    text: Option<&str>,
    text_file: Option<&Path>,
    stdin: bool,
) -> anyhow::Result<Vec<Diagnostic>> {
    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let (mut state, mut diags) = cmd::load_state(config, &auth);

    if state.generated_content.is_empty() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0501ContentMissing,
            "No article yet. Run: autoblog content generate",
            "content edit",
        )]);
    }

    // Exported posts are locked: warn, change nothing
    if let Err(diag) = check_mutable(state.post_state) {
        ui::locked("This post was exported; edits are disabled.");
        return Ok(vec![diag]);
    }

    let new_text = match (text, text_file, stdin) {
        (Some(t), None, false) => t.to_string(),
        (None, Some(path), false) => std::fs::read_to_string(path)?,
        (None, None, true) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        _ => {
            return Ok(vec![Diagnostic::new(
                DiagnosticCode::E0104ValueEmpty,
                "Provide exactly one of --text, --text-file, or --stdin",
                "content edit",
            )]);
        }
    };

    if new_text.trim().is_empty() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0104ValueEmpty,
            "Replacement text must not be empty",
            "content edit",
        )]);
    }

    state.generated_content = new_text;
    save_version(config, &auth, &mut state, &mut diags);
    cmd::save_state(config, &auth, &mut state)?;

    ui::success("Article updated");
    Ok(diags)
}

/// Regenerate with feedback and strategy adjustments. The previous content
/// snapshot is taken only after the backend call succeeds.
pub fn regenerate(
    config: &Config,
    demo_flag: bool,
    feedback: Option<&str>,
    goal: Option<ContentGoal>,
    voice: Option<ContentVoice>,
    template: Option<ContentTemplate>,
    length: Option<ContentLength>,
) -> anyhow::Result<Vec<Diagnostic>> {
    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);
    let (mut state, mut diags) = cmd::load_state(config, &auth);

    if state.generated_content.is_empty() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0501ContentMissing,
            "No article yet. Run: autoblog content generate",
            "content regenerate",
        )]);
    }

    if let Err(diag) = check_mutable(state.post_state) {
        ui::locked("This post was exported; regeneration is disabled.");
        return Ok(vec![diag]);
    }

    let Some(_account) =
        gate::resolve_account(auth.account.as_ref(), Step::Editing, demo)
    else {
        ui::gate_notice(
            "Regeneration needs an account. Run: autoblog auth register --email <you> \
             (or enable demo mode)",
        );
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0601AccountRequired,
            "Regeneration requires an account",
            "content regenerate",
        )]);
    };

    // Strategy tuple is only adjustable while the post is a draft; the
    // mutability check above guarantees that here
    if let Some(goal) = goal {
        state.content_strategy.goal = goal;
    }
    if let Some(voice) = voice {
        state.content_strategy.voice = voice;
    }
    if let Some(template) = template {
        state.content_strategy.template = template;
    }
    if let Some(length) = length {
        state.content_strategy.length = length;
    }
    state.custom_feedback = feedback.map(str::to_string);

    let scenario = state.selected_scenario().cloned();
    let instructions =
        contentgen::regeneration_instructions(scenario.as_ref(), feedback, &state.content_strategy);

    let (topic, analysis) = match (state.selected_topic(), state.analysis.as_ref()) {
        (Some(t), Some(a)) => (t.clone(), a.clone()),
        _ => {
            return Ok(vec![Diagnostic::new(
                DiagnosticCode::E0201AnalysisMissing,
                "Session is missing analysis data; re-run: autoblog analyze <url>",
                "content regenerate",
            )]);
        }
    };

    let api = ApiClient::new(&config.api, auth.access_token.clone())?;
    match contentgen::generate(&api, &topic, &analysis, &instructions) {
        Ok(content) => {
            // Snapshot only on success so a failed call cannot clobber the
            // previous version
            state.previous_content = std::mem::take(&mut state.generated_content);
            state.generated_content = content;
            save_version(config, &auth, &mut state, &mut diags);
            cmd::save_state(config, &auth, &mut state)?;
            cmd::track(
                config,
                &auth,
                &state,
                "content_regeneration",
                serde_json::json!({ "feedback": feedback.unwrap_or_default() }),
                &mut diags,
            );

            let summary = diff::summarize_changes(&state.previous_content, &state.generated_content);
            ui::generated(
                "article",
                format!(
                    "{} characters (+{} / -{} sentences)",
                    state.generated_content.len(),
                    summary.added,
                    summary.removed
                ),
            );
            ui::success("Run: autoblog content changes to inspect the differences");
            Ok(diags)
        }
        Err(err) => {
            diags.push(Diagnostic::new(
                DiagnosticCode::E0502GenerationFailed,
                format!("Regeneration failed: {err}"),
                "content regenerate",
            ));
            Ok(diags)
        }
    }
}

/// Summarize changes between the previous and current versions
pub fn changes(config: &Config, remote: bool) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let (state, mut diags) = cmd::load_state(config, &auth);

    if state.previous_content.is_empty() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0501ContentMissing,
            "No previous version to compare. Regenerate first.",
            "content changes",
        )]);
    }

    let summary = diff::summarize_changes(&state.previous_content, &state.generated_content);
    if summary.total() == 0 {
        println!("Content restructured (no sentence-level changes)");
    } else {
        println!("+{} sentences added", summary.added);
        println!("-{} sentences removed", summary.removed);
    }
    if let Some(feedback) = &state.custom_feedback {
        println!("Feedback applied: {feedback}");
    }

    if remote {
        let api = ApiClient::new(&config.api, auth.access_token.clone())?;
        match api.analyze_changes(
            &state.previous_content,
            &state.generated_content,
            state.custom_feedback.as_deref().unwrap_or(""),
        ) {
            Ok(change_analysis) => {
                println!("\nBackend summary: {}", change_analysis.summary);
                for change in &change_analysis.key_changes {
                    println!("  - {change}");
                }
                if change_analysis.feedback_applied {
                    println!("  Feedback was applied.");
                }
            }
            Err(err) => {
                diags.push(Diagnostic::new(
                    DiagnosticCode::E0903ApiError,
                    format!("Change analysis failed: {err}"),
                    "content changes",
                ));
            }
        }
    }

    Ok(diags)
}
