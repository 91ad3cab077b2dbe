//! Session lifecycle commands: resume and reset.

use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::lock::acquire_state_lock;
use crate::session::{self, SnapshotStatus};
use crate::ui;

/// Resume a saved wizard session within the 24-hour window
pub fn resume(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let user_id = auth.user_id();

    match session::load_snapshot(config, user_id.as_deref()) {
        SnapshotStatus::Resumable(state, hours) => {
            ui::success(format!(
                "Resumed session at step '{}' (saved {hours}h ago)",
                state.current_step.as_ref()
            ));
            if !state.website_url.is_empty() {
                ui::sub_info(format!("Website: {}", state.website_url));
            }
            if !state.generated_content.is_empty() {
                ui::sub_info(format!(
                    "Article in progress: {} characters",
                    state.generated_content.len()
                ));
            }
            Ok(vec![])
        }
        SnapshotStatus::Expired => Ok(vec![Diagnostic::new(
            DiagnosticCode::E0803SnapshotExpired,
            "Saved session is older than 24 hours. Run: autoblog reset, then analyze again.",
            "resume",
        )]),
        SnapshotStatus::Missing => Ok(vec![Diagnostic::new(
            DiagnosticCode::E0804SnapshotMissing,
            "No saved session. Run: autoblog analyze <url>",
            "resume",
        )]),
    }
}

/// Discard the saved wizard session
pub fn reset(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let _lock = acquire_state_lock(config)?;
    let auth = session::load_auth(config);
    let user_id = auth.user_id();
    session::clear_snapshot(config, user_id.as_deref())?;
    ui::success("Session discarded");
    Ok(vec![])
}
