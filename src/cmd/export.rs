//! Export command: render the post, write the file, lock the session.

use crate::api::ApiClient;
use crate::cmd;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::gate;
use crate::lock::acquire_state_lock;
use crate::model::Step;
use crate::render::{self, ExportFormat};
use crate::session;
use crate::store;
use crate::ui;
use crate::validate::require_step;

/// Export the article. A successful export in ANY format locks the post
/// against further edits.
pub fn export(
    config: &Config,
    demo_flag: bool,
    format: ExportFormat,
    remote: bool,
) -> anyhow::Result<Vec<Diagnostic>> {
    if format == ExportFormat::Zip {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0701FormatUnsupported,
            "Zip export is not implemented; use markdown, html, or json",
            "export",
        )]);
    }

    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);
    let (mut state, mut diags) = cmd::load_state(config, &auth);

    if state.generated_content.is_empty() {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0501ContentMissing,
            "No article yet. Run: autoblog content generate",
            "export",
        )]);
    }
    if let Err(diag) = require_step(state.current_step, Step::Editing, "export") {
        return Ok(vec![diag]);
    }

    let Some(_account) =
        gate::resolve_account(auth.account.as_ref(), Step::Exporting, demo)
    else {
        ui::gate_notice(
            "Exporting needs an account. Run: autoblog auth register --email <you> \
             (or enable demo mode)",
        );
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0601AccountRequired,
            "Export requires an account",
            "export",
        )]);
    };

    let Some(analysis) = state.analysis.clone() else {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0201AnalysisMissing,
            "Session is missing analysis data; re-run: autoblog analyze <url>",
            "export",
        )]);
    };
    let topic = state.selected_topic().cloned();
    let post = render::build_post(&state, &analysis, topic.as_ref());

    let body = if remote {
        let api = ApiClient::new(&config.api, auth.access_token.clone())?;
        match api.export_remote(&post, format.as_ref()) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(body) => body,
                Err(_) => {
                    return Ok(vec![Diagnostic::new(
                        DiagnosticCode::E0702ExportFailed,
                        "Backend returned a non-text export body",
                        "export",
                    )]);
                }
            },
            Err(err) => {
                return Ok(vec![Diagnostic::new(
                    DiagnosticCode::E0702ExportFailed,
                    format!("Remote export failed: {err}"),
                    "export",
                )]);
            }
        }
    } else {
        match format {
            ExportFormat::Markdown => {
                let subheader = topic.as_ref().map(|t| t.subheader.as_str()).unwrap_or("");
                render::render_markdown(&post, subheader)
            }
            ExportFormat::Html => render::render_html(&post),
            ExportFormat::Json => render::render_json(&post)?,
            ExportFormat::Zip => unreachable!("rejected above"),
        }
    };

    let path = render::write_export(config, &post, format, &body)?;

    // Lock the post and step the wizard into its terminal position
    state.lock_exported();
    state.current_step = Step::Exporting;

    if let Some(post_id) = state.post_id.clone() {
        if let Err(e) = store::track_export(config, &post_id, format.as_ref()) {
            diags.push(Diagnostic::new(
                DiagnosticCode::W0104StorageDegraded,
                format!("Could not record export: {e}"),
                "posts",
            ));
        }
    }

    cmd::save_state(config, &auth, &mut state)?;
    cmd::track(
        config,
        &auth,
        &state,
        "content_export",
        serde_json::json!({ "format": format.as_ref(), "path": path.display().to_string() }),
        &mut diags,
    );

    ui::exported(format.as_ref(), &path);
    ui::info("The post is now locked; further edits are disabled.");
    Ok(diags)
}
