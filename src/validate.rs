//! Input validation and wizard state machine rules.

use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::{PostState, Step};
use regex::Regex;

/// Structural URL check: optional http(s) scheme, one or more dot-delimited
/// labels, final label of at least two letters. No DNS resolution.
const URL_PATTERN: &str =
    r"^(?:https?://)?(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}(?:[/?#]\S*)?$";

/// Validate a website URL before any network call
pub fn validate_url(url: &str) -> Result<(), Diagnostic> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(Diagnostic::new(
            DiagnosticCode::E0104ValueEmpty,
            "Website URL is required",
            url,
        ));
    }

    let Ok(re) = Regex::new(URL_PATTERN) else {
        return Err(Diagnostic::new(
            DiagnosticCode::E0101UrlInvalid,
            "Internal URL pattern error",
            url,
        ));
    };

    if re.is_match(trimmed) {
        Ok(())
    } else {
        Err(Diagnostic::new(
            DiagnosticCode::E0101UrlInvalid,
            format!("Not a valid website URL: {trimmed}"),
            url,
        ))
    }
}

/// Normalize a validated URL to always carry a scheme
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Leading host label of a normalized URL ("https://acme.com/x" -> "acme")
pub fn leading_label(url: &str) -> &str {
    let host = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let host = host.split(['/', '?', '#']).next().unwrap_or(host);
    host.split('.').next().unwrap_or(host)
}

/// Check if a forward wizard step transition is valid
pub fn is_valid_step_transition(from: Step, to: Step) -> bool {
    matches!(
        (from, to),
        (Step::UrlEntry, Step::Analyzing)
            | (Step::Analyzing, Step::StrategySelection)
            | (Step::StrategySelection, Step::TopicGeneration)
            | (Step::TopicGeneration, Step::ContentGeneration)
            | (Step::ContentGeneration, Step::Editing)
            | (Step::Editing, Step::Exporting)
            | (Step::Exporting, Step::Editing)
    )
}

/// Require the wizard to have reached at least `needed` before an operation
pub fn require_step(current: Step, needed: Step, operation: &str) -> Result<(), Diagnostic> {
    if current >= needed {
        Ok(())
    } else {
        Err(Diagnostic::new(
            DiagnosticCode::E0102StepOrder,
            format!(
                "Cannot {operation} at step '{}'. Complete '{}' first.",
                current.as_ref(),
                needed.as_ref()
            ),
            current.as_ref(),
        ))
    }
}

/// Guard against content mutation once the post has been exported.
/// Rejection is a warning: state stays unchanged and the wizard keeps going.
pub fn check_mutable(post_state: PostState) -> Result<(), Diagnostic> {
    match post_state {
        PostState::Draft => Ok(()),
        PostState::Exported => Err(Diagnostic::new(
            DiagnosticCode::W0103PostLocked,
            "Post was exported and is locked. Start a new session to keep editing.",
            "exported",
        )),
    }
}
