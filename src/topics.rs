//! Topic generation.
//!
//! Policy differs from the analysis gate on purpose: a failed or empty
//! backend result falls back to the selected scenario's own content ideas
//! when it has any, and otherwise reports an explicit empty state. Topics
//! are never fabricated.

use crate::api::ApiClient;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::{Scenario, Topic, WebsiteAnalysis};

/// Where the topic list came from
#[derive(Debug)]
pub enum TopicsOutcome {
    /// Backend-generated, truncated to the display limit
    Generated(Vec<Topic>),
    /// Scenario content ideas used because the backend had nothing
    FromScenario(Vec<Topic>),
    /// Nothing to show; the wizard reports and stays put
    Unavailable,
}

/// Generate topic candidates. `limit` is the lead-generation display cap,
/// not a technical one.
pub fn generate(
    api: &ApiClient,
    analysis: &WebsiteAnalysis,
    scenario: Option<&Scenario>,
    limit: usize,
) -> (TopicsOutcome, Vec<Diagnostic>) {
    let backend = api.trending_topics(
        &analysis.business_type,
        &analysis.target_audience,
        &analysis.content_focus,
    );

    match backend {
        Ok(topics) if !topics.is_empty() => {
            (TopicsOutcome::Generated(truncate_topics(topics, limit)), vec![])
        }
        Ok(_) | Err(_) => match scenario.filter(|s| !s.content_ideas.is_empty()) {
            Some(s) => {
                let topics = truncate_topics(topics_from_scenario(s), limit);
                let diag = Diagnostic::new(
                    DiagnosticCode::W0105TopicsFromScenario,
                    "Topic service had no results; using strategy content ideas",
                    &s.title,
                );
                (TopicsOutcome::FromScenario(topics), vec![diag])
            }
            None => (TopicsOutcome::Unavailable, vec![]),
        },
    }
}

/// Keep at most `limit` topics, assigning ids to any the backend left blank
pub fn truncate_topics(mut topics: Vec<Topic>, limit: usize) -> Vec<Topic> {
    topics.truncate(limit);
    for (i, topic) in topics.iter_mut().enumerate() {
        if topic.id.is_empty() {
            topic.id = format!("t{}", i + 1);
        }
    }
    topics
}

/// Convert a scenario's content ideas into displayable topics
fn topics_from_scenario(scenario: &Scenario) -> Vec<Topic> {
    scenario
        .content_ideas
        .iter()
        .enumerate()
        .map(|(i, idea)| Topic {
            id: format!("scenario-{}", i + 1),
            title: idea.clone(),
            subheader: scenario.customer_problem.clone(),
            category: scenario.title.clone(),
            seo_benefit: scenario.seo_keywords.join(", "),
            image: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: &str) -> Topic {
        Topic {
            id: id.to_string(),
            title: format!("Topic {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn truncates_to_limit() {
        for (input_len, expected) in [(0usize, 0usize), (1, 1), (2, 2), (5, 2)] {
            let topics: Vec<Topic> = (0..input_len).map(|i| topic(&format!("t{i}"))).collect();
            assert_eq!(truncate_topics(topics, 2).len(), expected);
        }
    }

    #[test]
    fn assigns_ids_to_blank_topics() {
        let topics = vec![Topic::default(), Topic::default()];
        let truncated = truncate_topics(topics, 2);
        assert_eq!(truncated[0].id, "t1");
        assert_eq!(truncated[1].id, "t2");
    }

    #[test]
    fn keeps_backend_ids() {
        let topics = vec![topic("abc")];
        assert_eq!(truncate_topics(topics, 2)[0].id, "abc");
    }

    #[test]
    fn scenario_ideas_become_topics() {
        let scenario = Scenario {
            title: "Busy parents".to_string(),
            customer_problem: "No time to research".to_string(),
            seo_keywords: vec!["quick".to_string(), "guide".to_string()],
            content_ideas: vec!["Five-minute routines".to_string()],
            ..Default::default()
        };
        let topics = topics_from_scenario(&scenario);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].id, "scenario-1");
        assert_eq!(topics[0].title, "Five-minute routines");
        assert_eq!(topics[0].category, "Busy parents");
        assert_eq!(topics[0].seo_benefit, "quick, guide");
    }
}
