//! Analyze command: URL validation, the analysis call, and analysis edits.

use crate::analysis;
use crate::api::ApiClient;
use crate::cmd;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::lock::acquire_state_lock;
use crate::model::{Step, WizardState};
use crate::session;
use crate::ui;
use crate::validate::{normalize_url, validate_url};

/// Run the analysis step for a URL, starting or restarting the wizard.
/// The step is ungated; gates start at strategy viewing.
pub fn analyze(config: &Config, url: &str, no_wait: bool) -> anyhow::Result<Vec<Diagnostic>> {
    // Structural check before any network call; refusal leaves state untouched
    if let Err(diag) = validate_url(url) {
        return Ok(vec![diag]);
    }
    let normalized = normalize_url(url);

    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let (prev_state, mut diags) = cmd::load_state(config, &auth);

    let api = ApiClient::new(&config.api, auth.access_token.clone())?;
    let (mut result, analyze_diags) = analysis::analyze(&api, &normalized);
    diags.extend(analyze_diags);

    if !no_wait {
        diags.extend(analysis::ensure_enhanced(
            &api,
            &normalized,
            &mut result,
            &config.analysis,
        ));
    }

    // Re-analysis keeps the session identity but resets every downstream step
    let mut state = WizardState {
        session_id: prev_state.session_id,
        website_url: normalized.clone(),
        current_step: Step::StrategySelection,
        analysis: Some(result),
        ..Default::default()
    };

    cmd::save_state(config, &auth, &mut state)?;
    cmd::track(
        config,
        &auth,
        &state,
        "website_analysis",
        serde_json::json!({ "url": normalized }),
        &mut diags,
    );

    if let Some(a) = &state.analysis {
        ui::analyzed(&a.business_name, &state.website_url);
        ui::sub_info(format!("Business type: {}", a.business_type));
        ui::sub_info(format!("Audience: {}", a.target_audience));
        ui::sub_info(format!("Strategies available: {}", a.scenarios.len()));
    }
    ui::success("Analysis complete. Next: autoblog strategy list");

    Ok(diags)
}

/// Print the current analysis
pub fn show(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let (state, diags) = cmd::load_state(config, &auth);

    let Some(analysis) = &state.analysis else {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0201AnalysisMissing,
            "No analysis yet. Run: autoblog analyze <url>",
            "analysis",
        )]);
    };

    println!("Website:         {}", state.website_url);
    println!("Business name:   {}", analysis.business_name);
    println!("Business type:   {}", analysis.business_type);
    println!("Target audience: {}", analysis.target_audience);
    println!("Brand voice:     {}", analysis.brand_voice);
    println!("Content focus:   {}", analysis.content_focus);
    println!("Description:     {}", analysis.description);
    println!(
        "Brand colors:    {} / {} / {}",
        analysis.brand_colors.primary, analysis.brand_colors.secondary, analysis.brand_colors.accent
    );
    if !analysis.keywords.is_empty() {
        println!("Keywords:        {}", analysis.keywords.join(", "));
    }
    println!("Strategies:      {}", analysis.scenarios.len());

    Ok(diags)
}

/// Edit an analysis field. Always resets downstream selections so the flow
/// re-traverses strategy, topics, and content.
pub fn set_field(config: &Config, field: &str, value: &str) -> anyhow::Result<Vec<Diagnostic>> {
    if value.trim().is_empty() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0104ValueEmpty,
            "Value must not be empty",
            field,
        )]);
    }

    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let (mut state, diags) = cmd::load_state(config, &auth);

    let Some(analysis) = state.analysis.as_mut() else {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0201AnalysisMissing,
            "No analysis yet. Run: autoblog analyze <url>",
            "analysis",
        )]);
    };

    match field {
        "business-name" => analysis.business_name = value.to_string(),
        "business-type" => analysis.business_type = value.to_string(),
        "target-audience" => analysis.target_audience = value.to_string(),
        "brand-voice" => analysis.brand_voice = value.to_string(),
        "content-focus" => analysis.content_focus = value.to_string(),
        "description" => analysis.description = value.to_string(),
        _ => {
            return Ok(vec![Diagnostic::new(
                DiagnosticCode::E0103FieldUnknown,
                format!("Unknown analysis field: {field}"),
                field,
            )]);
        }
    }

    state.reset_downstream();
    state.current_step = Step::StrategySelection;
    cmd::save_state(config, &auth, &mut state)?;

    ui::field_set(field, value);
    ui::info("Downstream selections were reset; re-run strategy and topic steps.");
    Ok(diags)
}
