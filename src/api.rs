//! Backend API client: content generation and auth endpoints.
//!
//! Every call carries a uniform timeout and, when a session token is
//! present, a bearer Authorization header. Callers decide the fallback
//! policy; this module only reports what the backend said.

use crate::config::ApiConfig;
use crate::model::{Topic, WebsiteAnalysis};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// API client error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out. Please try again.")]
    Timeout,
    #[error("API error: {0}")]
    Http(String),
    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// Error body shape used by the backend for non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// =============================================================================
// Wire payloads
// =============================================================================

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    /// Absent means success; only an explicit false is a failure
    #[serde(default = "default_true")]
    pub success: bool,
    pub analysis: WebsiteAnalysis,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicsRequest<'a> {
    business_type: &'a str,
    target_audience: &'a str,
    content_focus: &'a str,
}

#[derive(Debug, Deserialize)]
struct TopicsResponse {
    #[serde(default)]
    topics: Vec<Topic>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    topic: &'a Topic,
    business_info: &'a WebsiteAnalysis,
    additional_instructions: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    blog_post: BlogPost,
}

#[derive(Debug, Deserialize)]
struct BlogPost {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeChangesRequest<'a> {
    previous_content: &'a str,
    new_content: &'a str,
    custom_feedback: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeChangesResponse {
    analysis: ChangeAnalysis,
}

/// Summary of what a regeneration changed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAnalysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_changes: Vec<String>,
    #[serde(default)]
    pub feedback_applied: bool,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// User record as the auth backend reports it
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: ApiUser,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: ApiUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExportRequest<'a, T: Serialize> {
    #[serde(rename = "blogPost")]
    blog_post: &'a T,
    format: &'a str,
}

// =============================================================================
// Client
// =============================================================================

/// Blocking HTTP client for the AutoBlog backend
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    /// Build a client with the uniform request timeout applied
    pub fn new(api: &ApiConfig, token: Option<String>) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;
        Ok(Self {
            base_url: api.effective_base_url(),
            token,
            client,
        })
    }

    fn request(&self, method: reqwest::Method, endpoint: &str) -> reqwest::blocking::RequestBuilder {
        let mut req = self
            .client
            .request(method, format!("{}{}", self.base_url, endpoint));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .request(reqwest::Method::POST, endpoint)
            .json(body)
            .send()?;
        Self::decode(resp)
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let resp = self.request(reqwest::Method::GET, endpoint).send()?;
        Self::decode(resp)
    }

    fn decode<T: DeserializeOwned>(resp: reqwest::blocking::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ApiError::Http(message));
        }
        Ok(resp.json()?)
    }

    // =========================================================================
    // Content endpoints
    // =========================================================================

    /// Analyze website content and extract business information
    pub fn analyze_website(&self, url: &str) -> Result<WebsiteAnalysis, ApiError> {
        let resp: AnalyzeResponse =
            self.post_json("/api/analyze-website", &AnalyzeRequest { url })?;
        if !resp.success {
            return Err(ApiError::Http("analysis reported failure".to_string()));
        }
        Ok(resp.analysis)
    }

    /// Generate trending topics for a business
    pub fn trending_topics(
        &self,
        business_type: &str,
        target_audience: &str,
        content_focus: &str,
    ) -> Result<Vec<Topic>, ApiError> {
        let resp: TopicsResponse = self.post_json(
            "/api/trending-topics",
            &TopicsRequest {
                business_type,
                target_audience,
                content_focus,
            },
        )?;
        Ok(resp.topics)
    }

    /// Generate blog post content for a topic
    pub fn generate_content(
        &self,
        topic: &Topic,
        business_info: &WebsiteAnalysis,
        additional_instructions: &str,
    ) -> Result<String, ApiError> {
        let resp: GenerateContentResponse = self.post_json(
            "/api/generate-content",
            &GenerateContentRequest {
                topic,
                business_info,
                additional_instructions,
            },
        )?;
        Ok(resp.blog_post.content)
    }

    /// Summarize changes between two content versions
    pub fn analyze_changes(
        &self,
        previous_content: &str,
        new_content: &str,
        custom_feedback: &str,
    ) -> Result<ChangeAnalysis, ApiError> {
        let resp: AnalyzeChangesResponse = self.post_json(
            "/api/analyze-changes",
            &AnalyzeChangesRequest {
                previous_content,
                new_content,
                custom_feedback,
            },
        )?;
        Ok(resp.analysis)
    }

    /// Server-side export; returns the raw file body
    pub fn export_remote<T: Serialize>(&self, post: &T, format: &str) -> Result<Vec<u8>, ApiError> {
        let resp = self
            .request(reqwest::Method::POST, "/api/export")
            .json(&ExportRequest {
                blog_post: post,
                format,
            })
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http(format!("HTTP {status}")));
        }
        Ok(resp.bytes()?.to_vec())
    }

    /// Backend liveness probe
    pub fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json("/health")
    }

    // =========================================================================
    // Auth endpoints
    // =========================================================================

    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.post_json("/api/v1/auth/login", &LoginRequest { email, password })
    }

    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResponse, ApiError> {
        self.post_json(
            "/api/v1/auth/register",
            &RegisterRequest {
                email,
                password,
                name,
            },
        )
    }

    pub fn me(&self) -> Result<ApiUser, ApiError> {
        let resp: MeResponse = self.get_json("/api/v1/auth/me")?;
        Ok(resp.user)
    }

    pub fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        self.post_json("/api/v1/auth/refresh", &RefreshRequest { refresh_token })
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        let resp = self
            .request(reqwest::Method::POST, "/api/v1/auth/logout")
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http(format!("HTTP {status}")));
        }
        Ok(())
    }
}
