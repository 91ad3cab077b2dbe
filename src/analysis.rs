//! Website analysis gate.
//!
//! The analysis step never dead-ends the wizard: a failed backend call is
//! replaced with a deterministic fallback synthesized from the URL, and the
//! flow continues with degraded content quality. Contrast with topic and
//! content generation, which abort and report instead.

use crate::api::ApiClient;
use crate::config::AnalysisConfig;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::{BusinessValue, Scenario, WebSearchStatus, WebsiteAnalysis};
use crate::validate::leading_label;
use std::time::Duration;

/// Notice embedded in a fallback analysis description
const FALLBACK_NOTICE: &str = "We were unable to analyze this website automatically.";

/// Analyze a website. Always resolves: on any network or parse failure the
/// deterministic fallback is returned together with a warning diagnostic.
pub fn analyze(api: &ApiClient, url: &str) -> (WebsiteAnalysis, Vec<Diagnostic>) {
    match api.analyze_website(url) {
        Ok(analysis) => (analysis, vec![]),
        Err(err) => {
            let diag = Diagnostic::new(
                DiagnosticCode::W0101AnalysisFallback,
                format!("Analysis unavailable, continuing with defaults: {err}"),
                url,
            );
            (fallback_analysis(url), vec![diag])
        }
    }
}

/// Deterministic analysis synthesized from the URL alone. Carries two
/// generic scenarios so every later wizard step stays reachable.
pub fn fallback_analysis(url: &str) -> WebsiteAnalysis {
    let name = capitalize(leading_label(url));
    WebsiteAnalysis {
        business_name: name.clone(),
        business_type: "General Business".to_string(),
        target_audience: "Customers researching products and services online".to_string(),
        brand_voice: "Professional, helpful".to_string(),
        content_focus: "Industry insights and practical guidance".to_string(),
        description: format!(
            "{FALLBACK_NOTICE} Content will be generated from general information about {name}."
        ),
        scenarios: fallback_scenarios(&name),
        // No enhancement is coming for a synthesized analysis
        web_search_status: WebSearchStatus {
            enhancement_complete: true,
        },
        ..Default::default()
    }
}

fn fallback_scenarios(name: &str) -> Vec<Scenario> {
    vec![
        Scenario {
            title: "Reach new customers".to_string(),
            customer_problem: format!(
                "People who need what {name} offers have not heard of it yet"
            ),
            search_phrases: vec![
                "best options near me".to_string(),
                "how to choose a provider".to_string(),
            ],
            seo_keywords: vec!["guide".to_string(), "comparison".to_string()],
            business_value: Some(BusinessValue {
                priority: Some(1),
                ..Default::default()
            }),
            content_ideas: vec![
                "A beginner's guide to choosing the right provider".to_string(),
                "What to look for before you buy".to_string(),
            ],
            conversion_path: None,
        },
        Scenario {
            title: "Build trust with your audience".to_string(),
            customer_problem: "Visitors are unsure whether the business fits their needs"
                .to_string(),
            search_phrases: vec!["is it worth it".to_string(), "reviews".to_string()],
            seo_keywords: vec!["trust".to_string(), "results".to_string()],
            business_value: Some(BusinessValue {
                priority: Some(2),
                ..Default::default()
            }),
            content_ideas: vec![
                "Common questions customers ask, answered".to_string(),
                "Behind the scenes: how the work gets done".to_string(),
            ],
            conversion_path: None,
        },
    ]
}

/// Wait for the web-search enhancement flag with bounded exponential backoff.
/// Re-fetches the analysis per attempt; gives up after `poll_max_attempts`
/// and lets the caller proceed with partial business-value data.
pub fn ensure_enhanced(
    api: &ApiClient,
    url: &str,
    analysis: &mut WebsiteAnalysis,
    cfg: &AnalysisConfig,
) -> Vec<Diagnostic> {
    if analysis.web_search_status.enhancement_complete {
        return vec![];
    }

    let mut delay = Duration::from_millis(cfg.poll_base_ms);
    for _ in 0..cfg.poll_max_attempts {
        std::thread::sleep(delay);
        delay = delay.saturating_mul(2);

        if let Ok(fresh) = api.analyze_website(url) {
            let complete = fresh.web_search_status.enhancement_complete;
            *analysis = fresh;
            if complete {
                return vec![];
            }
        }
    }

    vec![Diagnostic::new(
        DiagnosticCode::W0102EnhancementIncomplete,
        "Web-search enhancement did not finish; topic data may be incomplete",
        url,
    )]
}

/// Uppercase the first character, keep the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_derives_name_from_domain_label() {
        let analysis = fallback_analysis("https://acme.com");
        assert_eq!(analysis.business_name, "Acme");
    }

    #[test]
    fn fallback_carries_unable_to_analyze_notice() {
        let analysis = fallback_analysis("https://acme.com");
        assert!(analysis.description.contains("unable to analyze"));
    }

    #[test]
    fn fallback_uses_default_brand_colors() {
        let analysis = fallback_analysis("https://acme.com");
        assert_eq!(analysis.brand_colors.primary, "#6B8CAE");
        assert_eq!(analysis.brand_colors.secondary, "#F4E5D3");
        assert_eq!(analysis.brand_colors.accent, "#8FBC8F");
    }

    #[test]
    fn fallback_skips_enhancement_wait() {
        let analysis = fallback_analysis("https://acme.com");
        assert!(analysis.web_search_status.enhancement_complete);
    }

    #[test]
    fn fallback_keeps_the_wizard_traversable() {
        let analysis = fallback_analysis("https://acme.com");
        assert_eq!(analysis.scenarios.len(), 2);
        assert_eq!(analysis.scenarios[0].priority(), Some(1));
        assert!(!analysis.scenarios[0].content_ideas.is_empty());
    }

    #[test]
    fn capitalize_handles_edge_cases() {
        assert_eq!(capitalize("acme"), "Acme");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("x"), "X");
    }
}
