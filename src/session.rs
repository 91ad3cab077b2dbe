//! Auth session and wizard snapshot persistence.
//!
//! Both are best-effort local state, never authoritative: the snapshot lets a
//! wizard run resume within 24 hours, and the auth session carries the bearer
//! tokens between commands.

use crate::config::Config;
use crate::model::{Account, WizardState};
use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot age after which resume is refused
pub const SNAPSHOT_TTL_HOURS: i64 = 24;

/// Stored auth session (tokens + account)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
}

impl AuthSession {
    pub fn is_logged_in(&self) -> bool {
        self.account.is_some()
    }

    /// Current user id: stored account first, JWT payload as fallback
    pub fn user_id(&self) -> Option<String> {
        if let Some(account) = &self.account {
            return Some(account.id.clone());
        }
        self.access_token.as_deref().and_then(decode_user_id)
    }
}

/// Load the auth session, or an empty one if none is stored
pub fn load_auth(config: &Config) -> AuthSession {
    let path = config.session_path();
    let Ok(content) = std::fs::read_to_string(&path) else {
        return AuthSession::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Persist the auth session
pub fn save_auth(config: &Config, session: &AuthSession) -> Result<()> {
    let path = config.session_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create state root: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(session)?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write session: {}", path.display()))?;
    Ok(())
}

/// Drop tokens and account
pub fn clear_auth(config: &Config) -> Result<()> {
    let path = config.session_path();
    if path.exists() {
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove session: {}", path.display()))?;
    }
    Ok(())
}

/// Extract the user id from a JWT payload without verifying the signature
pub fn decode_user_id(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value
        .get("userId")
        .or_else(|| value.get("sub"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

// =============================================================================
// Wizard snapshot
// =============================================================================

/// Result of a snapshot load attempt
#[derive(Debug)]
pub enum SnapshotStatus {
    /// Fresh snapshot, hours since last save
    Resumable(WizardState, i64),
    /// Snapshot exists but is older than the TTL
    Expired,
    Missing,
}

/// Load the wizard snapshot for a user (or the anonymous session),
/// enforcing the 24-hour TTL
pub fn load_snapshot(config: &Config, user_id: Option<&str>) -> SnapshotStatus {
    let path = config.snapshot_path(user_id);
    let Ok(content) = std::fs::read_to_string(&path) else {
        return SnapshotStatus::Missing;
    };
    let Ok(state) = serde_json::from_str::<WizardState>(&content) else {
        return SnapshotStatus::Missing;
    };

    match snapshot_age_hours(&state.saved_at) {
        Some(hours) if hours < SNAPSHOT_TTL_HOURS => SnapshotStatus::Resumable(state, hours),
        Some(_) => SnapshotStatus::Expired,
        // Unparseable timestamp: treat like a fresh save rather than losing work
        None => SnapshotStatus::Resumable(state, 0),
    }
}

/// Persist the wizard snapshot, stamping `saved_at`
pub fn save_snapshot(config: &Config, user_id: Option<&str>, state: &mut WizardState) -> Result<()> {
    state.saved_at = Utc::now().to_rfc3339();
    let path = config.snapshot_path(user_id);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create state root: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(state)?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    Ok(())
}

/// Discard the wizard snapshot
pub fn clear_snapshot(config: &Config, user_id: Option<&str>) -> Result<()> {
    let path = config.snapshot_path(user_id);
    if path.exists() {
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove snapshot: {}", path.display()))?;
    }
    Ok(())
}

fn snapshot_age_hours(saved_at: &str) -> Option<i64> {
    let saved: DateTime<Utc> = DateTime::parse_from_rfc3339(saved_at).ok()?.into();
    Some((Utc::now() - saved).num_hours())
}

// =============================================================================
// Demo mode
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct DemoFlag {
    #[serde(default)]
    enabled: bool,
}

/// Resolve demo mode: environment variable, then the sticky persisted flag
pub fn demo_mode(config: &Config) -> bool {
    if std::env::var("AUTOBLOG_DEMO_MODE").is_ok_and(|v| v == "true" || v == "1") {
        return true;
    }
    let Ok(content) = std::fs::read_to_string(config.demo_path()) else {
        return false;
    };
    serde_json::from_str::<DemoFlag>(&content)
        .map(|f| f.enabled)
        .unwrap_or(false)
}

/// Persist the sticky demo-mode flag
pub fn set_demo_mode(config: &Config, enabled: bool) -> Result<()> {
    let path = config.demo_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create state root: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(&DemoFlag { enabled })?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write demo flag: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_user_id_reads_user_id_claim() {
        // {"userId":"u42"}
        let payload = URL_SAFE_NO_PAD.encode(r#"{"userId":"u42"}"#);
        let token = format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig");
        assert_eq!(decode_user_id(&token).as_deref(), Some("u42"));
    }

    #[test]
    fn decode_user_id_falls_back_to_sub() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"abc"}"#);
        let token = format!("h.{payload}.s");
        assert_eq!(decode_user_id(&token).as_deref(), Some("abc"));
    }

    #[test]
    fn decode_user_id_rejects_garbage() {
        assert!(decode_user_id("not-a-jwt").is_none());
        assert!(decode_user_id("a.!!!.c").is_none());
    }

    #[test]
    fn snapshot_age_parses_rfc3339() {
        let now = Utc::now().to_rfc3339();
        assert_eq!(snapshot_age_hours(&now), Some(0));
        assert!(snapshot_age_hours("garbage").is_none());
    }
}
