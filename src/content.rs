//! Content generation: instruction assembly and the regeneration path.
//!
//! Generation must only be invoked with an account resolved (the gate check
//! happens in the command layer before any network call). Failure policy is
//! abort-and-report: the wizard rewinds to topic selection and never
//! substitutes fabricated article text.

use crate::api::{ApiClient, ApiError};
use crate::model::{ContentStrategy, Scenario, Topic, WebsiteAnalysis};

/// Instructions for first-time generation: scenario-driven when a strategy
/// was chosen, generic audience engagement otherwise
pub fn build_instructions(scenario: Option<&Scenario>) -> String {
    match scenario {
        Some(s) => {
            let mut parts = vec![format!(
                "Write for customers facing this problem: {}",
                s.customer_problem
            )];
            if !s.search_phrases.is_empty() {
                parts.push(format!(
                    "Use the language customers search with: {}",
                    s.search_phrases.join(", ")
                ));
            }
            if !s.seo_keywords.is_empty() {
                parts.push(format!(
                    "Work in these SEO keywords naturally: {}",
                    s.seo_keywords.join(", ")
                ));
            }
            if let Some(path) = &s.conversion_path {
                parts.push(format!("Guide readers toward: {path}"));
            }
            parts.join(" ")
        }
        None => {
            "Write an engaging article for the business's target audience, focused on \
             practical value and clear next steps."
                .to_string()
        }
    }
}

/// Instructions for regeneration: base instructions plus user feedback and
/// the content strategy tuple as labeled key:value pairs
pub fn regeneration_instructions(
    scenario: Option<&Scenario>,
    feedback: Option<&str>,
    strategy: &ContentStrategy,
) -> String {
    let mut out = build_instructions(scenario);
    if let Some(feedback) = feedback.filter(|f| !f.trim().is_empty()) {
        out.push_str(&format!(" Reader feedback to apply: {}", feedback.trim()));
    }
    out.push_str(&format!(
        " goal: {}, voice: {}, template: {}, length: {}",
        strategy.goal.as_ref(),
        strategy.voice.as_ref(),
        strategy.template.as_ref(),
        strategy.length.as_ref()
    ));
    out
}

/// Call the generation backend. Thin wrapper so the command layer owns the
/// snapshot/rewind policy around it.
pub fn generate(
    api: &ApiClient,
    topic: &Topic,
    analysis: &WebsiteAnalysis,
    instructions: &str,
) -> Result<String, ApiError> {
    api.generate_content(topic, analysis, instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentGoal, ContentLength, ContentTemplate, ContentVoice};

    fn scenario() -> Scenario {
        Scenario {
            title: "Anxious first-timers".to_string(),
            customer_problem: "They do not know where to start".to_string(),
            search_phrases: vec!["how do I begin".to_string()],
            seo_keywords: vec!["beginner guide".to_string()],
            conversion_path: Some("a free starter consultation".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn scenario_instructions_include_problem_and_keywords() {
        let out = build_instructions(Some(&scenario()));
        assert!(out.contains("They do not know where to start"));
        assert!(out.contains("how do I begin"));
        assert!(out.contains("beginner guide"));
        assert!(out.contains("a free starter consultation"));
    }

    #[test]
    fn generic_instructions_without_scenario() {
        let out = build_instructions(None);
        assert!(out.contains("target audience"));
    }

    #[test]
    fn regeneration_appends_feedback_and_strategy_tuple() {
        let strategy = ContentStrategy {
            goal: ContentGoal::Conversion,
            voice: ContentVoice::Friendly,
            template: ContentTemplate::Listicle,
            length: ContentLength::Deep,
        };
        let out = regeneration_instructions(None, Some("shorter intro"), &strategy);
        assert!(out.contains("Reader feedback to apply: shorter intro"));
        assert!(out.contains("goal: conversion"));
        assert!(out.contains("voice: friendly"));
        assert!(out.contains("template: listicle"));
        assert!(out.contains("length: deep"));
    }

    #[test]
    fn blank_feedback_is_dropped() {
        let strategy = ContentStrategy::default();
        let out = regeneration_instructions(None, Some("   "), &strategy);
        assert!(!out.contains("Reader feedback"));
    }
}
