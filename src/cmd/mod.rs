//! Command implementations.

pub mod analyze;
pub mod auth;
pub mod content;
pub mod demo;
pub mod export;
pub mod init;
pub mod posts;
pub mod projects;
pub mod status;
pub mod strategy;
pub mod topics;
pub mod wizard;

use crate::OutputFormat;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::WizardState;
use crate::session::{self, AuthSession, SnapshotStatus};
use crate::store;
use crate::ui::stdout_supports_color;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;

/// Load the wizard session for a command, falling back to a fresh one.
/// A stale snapshot (older than the TTL) is replaced and reported as a
/// warning rather than silently resumed.
pub(crate) fn load_state(config: &Config, auth: &AuthSession) -> (WizardState, Vec<Diagnostic>) {
    let user_id = auth.user_id();
    match session::load_snapshot(config, user_id.as_deref()) {
        SnapshotStatus::Resumable(state, _) => (state, vec![]),
        SnapshotStatus::Expired => {
            let diag = Diagnostic::new(
                DiagnosticCode::W0106SnapshotStale,
                "Previous session was older than 24 hours; starting fresh",
                "snapshot",
            );
            (fresh_state(), vec![diag])
        }
        SnapshotStatus::Missing => (fresh_state(), vec![]),
    }
}

/// Persist the wizard session after a mutating command
pub(crate) fn save_state(
    config: &Config,
    auth: &AuthSession,
    state: &mut WizardState,
) -> anyhow::Result<()> {
    let user_id = auth.user_id();
    session::save_snapshot(config, user_id.as_deref(), state)
}

fn fresh_state() -> WizardState {
    WizardState {
        session_id: store::generate_id("session"),
        ..Default::default()
    }
}

/// Record an activity event, degrading storage failures to a warning
pub(crate) fn track(
    config: &Config,
    auth: &AuthSession,
    state: &WizardState,
    event_type: &str,
    event_data: serde_json::Value,
    diags: &mut Vec<Diagnostic>,
) {
    let user_id = auth.user_id();
    if let Err(e) = store::track_activity(
        config,
        event_type,
        event_data,
        &state.session_id,
        user_id.as_deref(),
    ) {
        diags.push(Diagnostic::new(
            DiagnosticCode::W0104StorageDegraded,
            format!("Could not record activity: {e}"),
            event_type,
        ));
    }
}

// =============================================================================
// List output helpers
// =============================================================================

fn use_colors() -> bool {
    stdout_supports_color()
}

/// Create a cell with optional color
fn cell(text: &str) -> Cell {
    Cell::new(text)
}

/// Create an ID cell (cyan, bold when colors enabled)
fn id_cell(text: &str) -> Cell {
    if use_colors() {
        Cell::new(text)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(text)
    }
}

/// Create a status cell with semantic color
fn status_cell(status: &str) -> Cell {
    if use_colors() {
        let color = match status {
            "draft" => Color::Yellow,
            "exported" | "ok" => Color::Green,
            "locked" => Color::DarkGrey,
            _ => Color::White,
        };
        Cell::new(status).fg(color)
    } else {
        Cell::new(status)
    }
}

/// Create a header cell (bold when colors enabled)
fn header_cell(text: &str) -> Cell {
    if use_colors() {
        Cell::new(text).add_attribute(Attribute::Bold)
    } else {
        Cell::new(text)
    }
}

/// Output a list of items in the specified format
pub(crate) fn output_list<T: Serialize>(
    items: &[T],
    headers: &[&str],
    format: OutputFormat,
    to_row: impl Fn(&T) -> Vec<String>,
) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Plain => {
            for item in items {
                let row = to_row(item);
                // Plain output: tab-separated values
                println!("{}", row.join("\t"));
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(headers.iter().map(|h| header_cell(h)).collect::<Vec<_>>());

            for item in items {
                let row = to_row(item);
                table.add_row(
                    row.iter()
                        .enumerate()
                        .map(|(i, v)| {
                            // First column is the key (cyan), status columns get
                            // semantic colors
                            if i == 0 {
                                id_cell(v)
                            } else if headers.get(i).is_some_and(|h| *h == "Status") {
                                status_cell(v)
                            } else {
                                cell(v)
                            }
                        })
                        .collect::<Vec<_>>(),
                );
            }

            println!("{table}");
        }
    }
}
