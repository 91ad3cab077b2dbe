//! Auth commands: login, register, logout, whoami, refresh.

use crate::api::ApiClient;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::Account;
use crate::session::{self, AuthSession};
use crate::ui;
use std::io::Read;

fn read_password(password: Option<&str>, stdin: bool) -> anyhow::Result<String> {
    match (password, stdin) {
        (Some(p), false) => Ok(p.to_string()),
        (None, true) | (Some(_), true) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf.trim_end_matches('\n').to_string())
        }
        (None, false) => anyhow::bail!("Provide --password or --stdin"),
    }
}

fn account_from(user: crate::api::ApiUser, access_token: &str) -> Account {
    let id = if user.id.is_empty() {
        session::decode_user_id(access_token).unwrap_or_default()
    } else {
        user.id
    };
    Account {
        id,
        email: user.email,
        name: user.name,
    }
}

/// Log in and store the session tokens
pub fn login(
    config: &Config,
    email: &str,
    password: Option<&str>,
    stdin: bool,
) -> anyhow::Result<Vec<Diagnostic>> {
    let password = read_password(password, stdin)?;
    let api = ApiClient::new(&config.api, None)?;

    match api.login(email, &password) {
        Ok(resp) => {
            let account = account_from(resp.user, &resp.access_token);
            let auth = AuthSession {
                access_token: Some(resp.access_token),
                refresh_token: Some(resp.refresh_token),
                account: Some(account.clone()),
            };
            session::save_auth(config, &auth)?;
            ui::identity(&account.email);
            Ok(vec![])
        }
        Err(err) => Ok(vec![Diagnostic::new(
            DiagnosticCode::E0602AuthFailed,
            format!("Login failed: {err}"),
            email,
        )]),
    }
}

/// Register a new account; the backend logs the user straight in
pub fn register(
    config: &Config,
    email: &str,
    password: Option<&str>,
    stdin: bool,
    name: Option<&str>,
) -> anyhow::Result<Vec<Diagnostic>> {
    let password = read_password(password, stdin)?;
    let api = ApiClient::new(&config.api, None)?;

    match api.register(email, &password, name) {
        Ok(resp) => {
            let account = account_from(resp.user, &resp.access_token);
            let auth = AuthSession {
                access_token: Some(resp.access_token),
                refresh_token: Some(resp.refresh_token),
                account: Some(account.clone()),
            };
            session::save_auth(config, &auth)?;
            ui::success(format!("Registered {}", account.email));
            ui::identity(&account.email);
            Ok(vec![])
        }
        Err(err) => Ok(vec![Diagnostic::new(
            DiagnosticCode::E0602AuthFailed,
            format!("Registration failed: {err}"),
            email,
        )]),
    }
}

/// Log out: best-effort server call, then drop local tokens either way
pub fn logout(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    if let Some(token) = auth.access_token.clone() {
        let api = ApiClient::new(&config.api, Some(token))?;
        // The local session is cleared regardless of what the server says
        let _ = api.logout();
    }
    session::clear_auth(config)?;
    ui::success("Logged out");
    Ok(vec![])
}

/// Show the logged-in account, verifying the token against the backend
/// when possible
pub fn whoami(config: &Config, demo_flag: bool) -> anyhow::Result<Vec<Diagnostic>> {
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);

    match &auth.account {
        Some(account) => {
            ui::identity(&account.email);
            if let Some(name) = &account.name {
                ui::sub_info(format!("Name: {name}"));
            }
            // Best-effort token check; an invalid token clears the session
            // the way the browser ancestor did
            if let Some(token) = auth.access_token.clone() {
                let api = ApiClient::new(&config.api, Some(token))?;
                if let Err(err) = api.me() {
                    session::clear_auth(config)?;
                    return Ok(vec![Diagnostic::new(
                        DiagnosticCode::E0602AuthFailed,
                        format!("Stored session is no longer valid: {err}"),
                        "auth whoami",
                    )]);
                }
            }
            Ok(vec![])
        }
        None if demo => {
            ui::info("Not logged in (demo mode active; gates are bypassed)");
            Ok(vec![])
        }
        None => Ok(vec![Diagnostic::new(
            DiagnosticCode::E0603NotLoggedIn,
            "Not logged in. Run: autoblog auth login --email <you>",
            "auth whoami",
        )]),
    }
}

/// Refresh the access token using the stored refresh token
pub fn refresh(config: &Config) -> anyhow::Result<Vec<Diagnostic>> {
    let mut auth = session::load_auth(config);
    let Some(refresh_token) = auth.refresh_token.clone() else {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0603NotLoggedIn,
            "No refresh token stored. Run: autoblog auth login --email <you>",
            "auth refresh",
        )]);
    };

    let api = ApiClient::new(&config.api, auth.access_token.clone())?;
    match api.refresh(&refresh_token) {
        Ok(resp) => {
            auth.account = Some(account_from(resp.user, &resp.access_token));
            auth.access_token = Some(resp.access_token);
            auth.refresh_token = Some(resp.refresh_token);
            session::save_auth(config, &auth)?;
            ui::success("Session refreshed");
            Ok(vec![])
        }
        Err(err) => Ok(vec![Diagnostic::new(
            DiagnosticCode::E0602AuthFailed,
            format!("Token refresh failed: {err}"),
            "auth refresh",
        )]),
    }
}
