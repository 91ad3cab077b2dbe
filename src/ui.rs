//! CLI output formatting with colors.
//!
//! Provides consistent, colorized output for all CLI commands.
//! Colors auto-disable when output is not a TTY (agent-friendly).

use owo_colors::OwoColorize;
use std::fmt::Display;
use std::path::Path;

/// Check if stderr supports colors (TTY detection)
fn use_colors() -> bool {
    supports_color::on(supports_color::Stream::Stderr).is_some()
}

/// Check if stdout supports colors (TTY detection)
pub fn stdout_supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

// =============================================================================
// Color Helpers
// =============================================================================

/// Format a success message (green checkmark prefix)
pub fn success(msg: impl Display) {
    if use_colors() {
        eprintln!("{} {}", "✓".green(), msg);
    } else {
        eprintln!("✓ {}", msg);
    }
}

/// Format an info/action message (no special prefix)
pub fn info(msg: impl Display) {
    eprintln!("{}", msg);
}

/// Format an indented detail line
pub fn sub_info(msg: impl Display) {
    eprintln!("  {}", msg);
}

/// Format a created item message
pub fn created_path(path: &Path) {
    if use_colors() {
        eprintln!("{}: {}", "Created".green(), path.display().cyan());
    } else {
        eprintln!("Created: {}", path.display());
    }
}

/// Format a wizard step banner ("Step 3/7: strategy-selection")
pub fn step_banner(position: usize, total: usize, step: &str) {
    if use_colors() {
        eprintln!(
            "{} {}: {}",
            "Step".bold(),
            format!("{position}/{total}").cyan().bold(),
            step.green()
        );
    } else {
        eprintln!("Step {position}/{total}: {step}");
    }
}

/// Format an analysis completion message
pub fn analyzed(business_name: &str, url: &str) {
    if use_colors() {
        eprintln!(
            "Analyzed {}: {}",
            url.cyan(),
            business_name.green().bold()
        );
    } else {
        eprintln!("Analyzed {}: {}", url, business_name);
    }
}

/// Format a selection message ("Selected strategy: ...")
pub fn selected(kind: &str, label: &str) {
    if use_colors() {
        eprintln!("Selected {}: {}", kind, label.cyan().bold());
    } else {
        eprintln!("Selected {}: {}", kind, label);
    }
}

/// Format a generation completion message
pub fn generated(kind: &str, detail: impl Display) {
    if use_colors() {
        eprintln!("{} {}: {}", "Generated".green(), kind, detail);
    } else {
        eprintln!("Generated {}: {}", kind, detail);
    }
}

/// Format an exported file message
pub fn exported(format: &str, path: &Path) {
    if use_colors() {
        eprintln!(
            "{} {} export: {}",
            "Wrote".green(),
            format.bold(),
            path.display().cyan()
        );
    } else {
        eprintln!("Wrote {} export: {}", format, path.display());
    }
}

/// Format a gate notice with the action needed to pass it
pub fn gate_notice(msg: &str) {
    if use_colors() {
        eprintln!("{} {}", "Account required:".yellow().bold(), msg);
    } else {
        eprintln!("Account required: {}", msg);
    }
}

/// Format a locked-item notice
pub fn locked(msg: &str) {
    if use_colors() {
        eprintln!("{} {}", "Locked:".yellow().bold(), msg);
    } else {
        eprintln!("Locked: {}", msg);
    }
}

/// Format a logged-in identity line
pub fn identity(email: &str) {
    if use_colors() {
        eprintln!("Logged in as {}", email.cyan().bold());
    } else {
        eprintln!("Logged in as {}", email);
    }
}

/// Format a field set message
pub fn field_set(field: &str, value: &str) {
    if use_colors() {
        eprintln!("Set {} = {}", field.yellow(), value.white());
    } else {
        eprintln!("Set {} = {}", field, value);
    }
}

/// Format a status count line
pub fn status_count(label: &str, value: impl Display) {
    if use_colors() {
        eprintln!("  {}: {}", label, value.to_string().cyan().bold());
    } else {
        eprintln!("  {}: {}", label, value);
    }
}

/// Format "not found" message
pub fn not_found(kind: &str) {
    eprintln!("No {kind} available");
}

// =============================================================================
// Diagnostic Formatting
// =============================================================================

use crate::diagnostic::{Diagnostic, DiagnosticLevel};

/// Format a diagnostic message
pub fn diagnostic(diag: &Diagnostic) {
    if use_colors() {
        let level_str = match diag.level {
            DiagnosticLevel::Error => "error".red().bold().to_string(),
            DiagnosticLevel::Warning => "warning".yellow().bold().to_string(),
        };
        eprintln!(
            "{}[{}]: {} ({})",
            level_str,
            diag.code.code().bright_black(),
            diag.message,
            diag.context.cyan()
        );
    } else {
        let level_str = match diag.level {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
        };
        eprintln!(
            "{}[{}]: {} ({})",
            level_str,
            diag.code.code(),
            diag.message,
            diag.context
        );
    }
}
