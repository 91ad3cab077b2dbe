//! Strategy commands: list, select, and the simulated premium unlock.

use crate::OutputFormat;
use crate::cmd;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::gate;
use crate::lock::acquire_state_lock;
use crate::model::Step;
use crate::session;
use crate::ui;
use serde::Serialize;

/// Serializable strategy summary for JSON output
#[derive(Serialize)]
struct StrategySummary {
    rank: usize,
    priority: Option<u32>,
    title: String,
    customer_problem: String,
    keywords: String,
    locked: bool,
}

/// List strategies ordered ascending by priority; the free tier sees only
/// the first two, the rest render as locked rows
pub fn list(config: &Config, demo_flag: bool, output: OutputFormat) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);
    let (state, diags) = cmd::load_state(config, &auth);

    let Some(analysis) = &state.analysis else {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0201AnalysisMissing,
            "No analysis yet. Run: autoblog analyze <url>",
            "strategy list",
        )]);
    };

    if analysis.scenarios.is_empty() {
        ui::not_found("strategies");
        return Ok(diags);
    }

    let visible = gate::strategy_visible_limit(
        config.gates.free_strategy_limit,
        state.premium_unlocked,
        demo,
    );

    let ranked = analysis.ranked_scenarios();
    let summaries: Vec<StrategySummary> = ranked
        .iter()
        .enumerate()
        .map(|(rank, &idx)| {
            let s = &analysis.scenarios[idx];
            let locked = visible.is_some_and(|limit| rank >= limit);
            StrategySummary {
                rank: rank + 1,
                priority: s.priority(),
                title: s.title.clone(),
                customer_problem: if locked {
                    "(locked)".to_string()
                } else {
                    s.customer_problem.clone()
                },
                keywords: if locked {
                    String::new()
                } else {
                    s.seo_keywords.join(", ")
                },
                locked,
            }
        })
        .collect();

    cmd::output_list(
        &summaries,
        &["#", "Priority", "Strategy", "Customer Problem", "Keywords"],
        output,
        |s| {
            vec![
                s.rank.to_string(),
                s.priority.map_or_else(|| "-".to_string(), |p| p.to_string()),
                s.title.clone(),
                s.customer_problem.clone(),
                s.keywords.clone(),
            ]
        },
    );

    if let Some(limit) = visible {
        let hidden = summaries.len().saturating_sub(limit);
        if hidden > 0 {
            ui::info(format!(
                "{hidden} more strategies are locked. Run: autoblog strategy unlock"
            ));
        }
    }

    Ok(diags)
}

/// Select a strategy by its 1-based position in the sorted list
pub fn select(config: &Config, demo_flag: bool, rank: usize) -> anyhow::Result<Vec<Diagnostic>> {
    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);
    let (mut state, mut diags) = cmd::load_state(config, &auth);

    let Some(analysis) = &state.analysis else {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0201AnalysisMissing,
            "No analysis yet. Run: autoblog analyze <url>",
            "strategy select",
        )]);
    };

    let ranked = analysis.ranked_scenarios();
    if rank == 0 || rank > ranked.len() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0301StrategyOutOfRange,
            format!("Strategy {rank} does not exist (1..{})", ranked.len()),
            "strategy select",
        )]);
    }

    let visible = gate::strategy_visible_limit(
        config.gates.free_strategy_limit,
        state.premium_unlocked,
        demo,
    );
    if visible.is_some_and(|limit| rank > limit) {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0302StrategyLocked,
            format!("Strategy {rank} is locked. Run: autoblog strategy unlock"),
            "strategy select",
        )]);
    }

    let scenario_idx = ranked[rank - 1];
    let title = analysis.scenarios[scenario_idx].title.clone();
    // Re-selection invalidates topics and the article in progress
    state.reset_downstream();
    state.selected_strategy = Some(scenario_idx);
    state.current_step = Step::TopicGeneration;
    cmd::save_state(config, &auth, &mut state)?;
    cmd::track(
        config,
        &auth,
        &state,
        "strategy_selected",
        serde_json::json!({ "rank": rank, "title": title }),
        &mut diags,
    );

    ui::selected("strategy", &title);
    ui::success("Next: autoblog topics generate");
    Ok(diags)
}

/// Simulated premium unlock. The two pricing tiers of the product UI have
/// an identical effect, so the CLI exposes a single action. No payment is
/// processed and no entitlement is checked.
pub fn unlock(
    config: &Config,
    demo_flag: bool,
    email: Option<&str>,
) -> anyhow::Result<Vec<Diagnostic>> {
    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);
    let (mut state, mut diags) = cmd::load_state(config, &auth);

    // The lighter email gate: a logged-in account, demo mode, or any email
    // passes it
    if gate::requires_gate(Step::StrategySelection, auth.is_logged_in(), demo) && email.is_none() {
        ui::gate_notice("Provide --email, log in, or enable demo mode to unlock strategies.");
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0601AccountRequired,
            "Premium strategies need an email or account",
            "strategy unlock",
        )]);
    }

    state.premium_unlocked = true;
    cmd::save_state(config, &auth, &mut state)?;
    cmd::track(
        config,
        &auth,
        &state,
        "premium_unlock",
        serde_json::json!({ "email": email }),
        &mut diags,
    );

    ui::success("Premium strategies unlocked");
    Ok(diags)
}
