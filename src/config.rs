//! Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration (blog/config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub gates: GatesConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default = "default_project_name")]
    pub name: String,
}

fn default_project_name() -> String {
    "autoblog-project".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root directory for wizard state (blog/)
    #[serde(default = "default_state_root")]
    pub state_root: PathBuf,
    /// Output directory for exported posts (exports/)
    #[serde(default = "default_exports_output")]
    pub exports_output: PathBuf,
}

fn default_state_root() -> PathBuf {
    PathBuf::from("blog")
}

fn default_exports_output() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_root: default_state_root(),
            exports_output: default_exports_output(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL. Overridden by AUTOBLOG_API_URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Uniform request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Effective base URL, environment override first
    pub fn effective_base_url(&self) -> String {
        std::env::var("AUTOBLOG_API_URL").unwrap_or_else(|_| self.base_url.clone())
    }
}

/// Free-tier display limits enforced by the access gates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatesConfig {
    /// Strategies shown to non-premium users
    #[serde(default = "default_free_strategies")]
    pub free_strategy_limit: usize,
    /// Topics retained from the backend list
    #[serde(default = "default_free_topics")]
    pub free_topic_limit: usize,
}

fn default_free_strategies() -> usize {
    2
}

fn default_free_topics() -> usize {
    2
}

impl Default for GatesConfig {
    fn default() -> Self {
        Self {
            free_strategy_limit: default_free_strategies(),
            free_topic_limit: default_free_topics(),
        }
    }
}

/// Bounded wait for the analysis enhancement flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// First poll delay in milliseconds; doubles per attempt
    #[serde(default = "default_poll_base_ms")]
    pub poll_base_ms: u64,
    /// Give up after this many polls and proceed with partial data
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,
}

fn default_poll_base_ms() -> u64 {
    2000
}

fn default_poll_max_attempts() -> u32 {
    5
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            poll_base_ms: default_poll_base_ms(),
            poll_max_attempts: default_poll_max_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcurrencyConfig {
    /// Seconds to wait for the exclusive state lock
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,
}

fn default_lock_timeout_secs() -> u64 {
    10
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            lock_timeout_secs: default_lock_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .or_else(Self::find_config)
            .unwrap_or_else(|| PathBuf::from("blog/config.toml"));

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if no file exists
            Ok(Config::default())
        }
    }

    /// Find config file by walking up directory tree
    fn find_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let config_path = current.join("blog/config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    // Convenience accessors for state files

    /// Auth session file (tokens + account)
    pub fn session_path(&self) -> PathBuf {
        self.paths.state_root.join("session.json")
    }

    /// Workflow snapshot for a user (or the anonymous session)
    pub fn snapshot_path(&self, user_id: Option<&str>) -> PathBuf {
        let name = match user_id {
            Some(uid) => format!("workflow_progress_{uid}.json"),
            None => "workflow_progress_anonymous.json".to_string(),
        };
        self.paths.state_root.join(name)
    }

    /// Saved projects ring buffer
    pub fn projects_path(&self) -> PathBuf {
        self.paths.state_root.join("projects.json")
    }

    /// Saved posts ring buffer
    pub fn posts_path(&self) -> PathBuf {
        self.paths.state_root.join("posts.json")
    }

    /// Activity log ring buffer
    pub fn activity_path(&self) -> PathBuf {
        self.paths.state_root.join("activity.json")
    }

    /// Sticky demo-mode flag
    pub fn demo_path(&self) -> PathBuf {
        self.paths.state_root.join("demo.json")
    }

    /// Exported file output directory
    pub fn exports_dir(&self) -> PathBuf {
        self.paths.exports_output.clone()
    }

    /// Generate default config TOML
    pub fn default_toml() -> &'static str {
        r#"[project]
name = "my-blog"

[paths]
state_root = "blog"
exports_output = "exports"

[api]
# Backend base URL (AUTOBLOG_API_URL overrides)
base_url = "http://localhost:3001"
# Uniform request timeout in seconds
timeout_secs = 60

[gates]
# Strategies/topics shown before the account gate
free_strategy_limit = 2
free_topic_limit = 2

[analysis]
# Bounded wait for web-search enhancement: first delay, doubling per attempt
poll_base_ms = 2000
poll_max_attempts = 5

[concurrency]
lock_timeout_secs = 10
"#
    }
}
