//! Common test helpers for CLI integration tests.

#![allow(dead_code)] // Functions used across different test binaries

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Captured result of one CLI invocation
pub struct CmdResult {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

impl CmdResult {
    /// stdout and stderr concatenated, for loose assertions
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Run autoblog in a directory with extra environment variables.
/// Tests never talk to a real backend: unless a test points
/// AUTOBLOG_API_URL at a mock server, it goes to a dead local port.
pub fn run_env(dir: &Path, env: &[(&str, &str)], args: &[&str]) -> CmdResult {
    let mut command = Command::new(env!("CARGO_BIN_EXE_autoblog"));
    command
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("AUTOBLOG_DEMO_MODE");

    if !env.iter().any(|(k, _)| *k == "AUTOBLOG_API_URL") {
        command.env("AUTOBLOG_API_URL", "http://127.0.0.1:9");
    }
    for (k, v) in env {
        command.env(k, v);
    }

    let output = command.output().expect("failed to run autoblog");
    CmdResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code().unwrap_or(-1),
    }
}

/// Run autoblog with the default (offline) environment
pub fn run(dir: &Path, args: &[&str]) -> CmdResult {
    run_env(dir, &[], args)
}

/// Initialize an autoblog project in a temp directory
pub fn init_project() -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let result = run(temp_dir.path(), &["init"]);
    assert_eq!(result.code, 0, "autoblog init failed: {}", result.stderr);
    temp_dir
}
