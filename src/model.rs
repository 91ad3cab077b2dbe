//! Data models for the wizard session and backend payloads.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

// =============================================================================
// Wizard step machine
// =============================================================================

/// Ordered wizard steps, URL entry through export
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Step {
    #[default]
    UrlEntry,
    Analyzing,
    StrategySelection,
    TopicGeneration,
    ContentGeneration,
    Editing,
    Exporting,
}

/// Post lifecycle: exported is terminal and blocks content mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostState {
    #[default]
    Draft,
    Exported,
}

// =============================================================================
// Website analysis (backend contract, camelCase on the wire)
// =============================================================================

/// Brand color triple; every consumer may assume all three keys exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColors {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_secondary")]
    pub secondary: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_primary() -> String {
    "#6B8CAE".to_string()
}

fn default_secondary() -> String {
    "#F4E5D3".to_string()
}

fn default_accent() -> String {
    "#8FBC8F".to_string()
}

impl Default for BrandColors {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            accent: default_accent(),
        }
    }
}

/// Web-search enhancement progress reported alongside an analysis
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSearchStatus {
    #[serde(default)]
    pub enhancement_complete: bool,
}

/// Business-value ranking attached to a scenario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_potential: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

/// Target-customer strategy supplied by the analysis backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub customer_problem: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_phrases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seo_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_value: Option<BusinessValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_ideas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_path: Option<String>,
}

impl Scenario {
    /// Priority rank for display ordering; absent priority sorts last
    pub fn priority(&self) -> Option<u32> {
        self.business_value.as_ref().and_then(|bv| bv.priority)
    }
}

/// Business analysis of a website; optional backend fields are defaulted
/// once here so downstream render code never null-checks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteAnalysis {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub brand_voice: String,
    #[serde(default)]
    pub brand_colors: BrandColors,
    #[serde(default)]
    pub content_focus: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub web_search_status: WebSearchStatus,
}

impl WebsiteAnalysis {
    /// Scenarios sorted ascending by priority; missing priority sorts last.
    /// Returns indices into `self.scenarios` so selection stays stable.
    pub fn ranked_scenarios(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.scenarios.len()).collect();
        indices.sort_by_key(|&i| {
            let p = self.scenarios[i].priority();
            (p.is_none(), p)
        });
        indices
    }
}

// =============================================================================
// Topics
// =============================================================================

/// Candidate article idea
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subheader: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub seo_benefit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// =============================================================================
// Content strategy (regeneration parameters)
// =============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContentGoal {
    #[default]
    Awareness,
    Consideration,
    Conversion,
    Retention,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContentVoice {
    #[default]
    Expert,
    Friendly,
    Insider,
    Storyteller,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContentTemplate {
    HowTo,
    #[default]
    ProblemSolution,
    Listicle,
    CaseStudy,
    Comprehensive,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContentLength {
    Quick,
    #[default]
    Standard,
    Deep,
}

/// 4-tuple that parameterizes content generation; mutable only while draft
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ContentStrategy {
    #[serde(default)]
    pub goal: ContentGoal,
    #[serde(default)]
    pub voice: ContentVoice,
    #[serde(default)]
    pub template: ContentTemplate,
    #[serde(default)]
    pub length: ContentLength,
}

// =============================================================================
// Account
// =============================================================================

/// Authenticated (or demo-synthesized) user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Account {
    /// Fake account synthesized when a gate is skipped in demo mode
    pub fn demo() -> Self {
        Self {
            id: "demo".to_string(),
            email: "demo@example.com".to_string(),
            name: Some("Demo User".to_string()),
        }
    }
}

// =============================================================================
// Wizard session state (persisted snapshot)
// =============================================================================

/// Aggregate root for one wizard run. Persisted as the workflow snapshot;
/// discarded on reset, expired after 24 hours.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardState {
    #[serde(default)]
    pub current_step: Step,
    #[serde(default)]
    pub website_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<WebsiteAnalysis>,
    /// Index into `analysis.scenarios`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_strategy: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Topic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_topic_id: Option<String>,
    #[serde(default)]
    pub generated_content: String,
    #[serde(default)]
    pub previous_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_feedback: Option<String>,
    #[serde(default)]
    pub content_strategy: ContentStrategy,
    #[serde(default)]
    pub post_state: PostState,
    /// Premium strategies revealed via the simulated unlock
    #[serde(default)]
    pub premium_unlocked: bool,
    /// Saved-posts entry this session writes its versions to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub saved_at: String,
}

impl WizardState {
    pub fn selected_scenario(&self) -> Option<&Scenario> {
        let analysis = self.analysis.as_ref()?;
        analysis.scenarios.get(self.selected_strategy?)
    }

    pub fn selected_topic(&self) -> Option<&Topic> {
        let id = self.selected_topic_id.as_deref()?;
        self.topics.iter().find(|t| t.id == id)
    }

    /// The single lock-policy decision point: exporting in any format
    /// locks the post against further edits.
    pub fn lock_exported(&mut self) {
        self.post_state = PostState::Exported;
    }

    /// Drop the in-progress article and its lock. Selecting a strategy or
    /// topic again starts a new article thread; the exported one stays in
    /// the saved-posts collection.
    pub fn reset_article(&mut self) {
        self.generated_content.clear();
        self.previous_content.clear();
        self.custom_feedback = None;
        self.post_state = PostState::Draft;
        self.post_id = None;
    }

    /// Clear everything downstream of the analysis. Editing the analysis
    /// forces re-traversal of strategy selection, topics, and content.
    pub fn reset_downstream(&mut self) {
        self.selected_strategy = None;
        self.topics.clear();
        self.selected_topic_id = None;
        self.reset_article();
    }
}

// =============================================================================
// Export projection
// =============================================================================

/// Flat post representation computed fresh at export time; never stored
/// except inside the saved-posts collection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: String,
    pub published_at: String,
    pub source: String,
    pub source_website: String,
    pub brand_colors: BrandColors,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub word_count: usize,
    pub reading_time: usize,
    pub generated_at: String,
    pub auto_generated: bool,
}

// =============================================================================
// Persisted collections
// =============================================================================

/// Saved analysis project (ring buffer, newest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedProject {
    pub id: String,
    pub name: String,
    pub website_url: String,
    pub analysis: WebsiteAnalysis,
    pub created_at: String,
    pub last_modified: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Saved post version (ring buffer, newest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ContentStrategy>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub export_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_exported_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_export_format: Option<String>,
    #[serde(default)]
    pub status: PostState,
}

/// Activity log record (ring buffer, newest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub event_type: String,
    #[serde(default)]
    pub event_data: serde_json::Value,
    pub timestamp: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Aggregated counters for `posts stats`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageStats {
    pub total_generations: usize,
    pub total_projects: usize,
    pub total_posts: usize,
    pub total_exports: u64,
    pub recent_activity: usize,
}
