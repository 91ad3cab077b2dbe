//! Access gates: policy checkpoints between wizard steps.
//!
//! Two gate kinds exist: a lighter email gate covering premium strategy
//! viewing, and the full account gate covering topic selection and every
//! step after it. Demo mode disables both and synthesizes a fake account
//! where one is needed. No real payment or identity verification happens
//! anywhere behind these predicates.

use crate::model::{Account, Step};

/// Gate kinds, lighter to heavier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    /// Unlocks strategy viewing beyond the free tier
    Email,
    /// Required from topic selection onward
    Account,
}

/// Gate protecting a step, if any
pub fn gate_for_step(step: Step) -> Option<GateKind> {
    match step {
        Step::UrlEntry | Step::Analyzing | Step::TopicGeneration => None,
        Step::StrategySelection => Some(GateKind::Email),
        Step::ContentGeneration | Step::Editing | Step::Exporting => Some(GateKind::Account),
    }
}

/// Pure gate predicate over the wizard state
pub fn requires_gate(step: Step, has_account: bool, demo_mode: bool) -> bool {
    if demo_mode {
        return false;
    }
    match gate_for_step(step) {
        None => false,
        Some(_) => !has_account,
    }
}

/// Account to act as at a gated step, demo synthesis included.
/// `None` means the gate holds.
pub fn resolve_account(
    account: Option<&Account>,
    step: Step,
    demo_mode: bool,
) -> Option<Account> {
    if let Some(account) = account {
        return Some(account.clone());
    }
    if demo_mode && gate_for_step(step).is_some() {
        return Some(Account::demo());
    }
    None
}

/// How many strategies to render: `None` means all of them
pub fn strategy_visible_limit(
    free_limit: usize,
    premium_unlocked: bool,
    demo_mode: bool,
) -> Option<usize> {
    if premium_unlocked || demo_mode {
        None
    } else {
        Some(free_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn early_steps_are_ungated() {
        assert!(!requires_gate(Step::UrlEntry, false, false));
        assert!(!requires_gate(Step::Analyzing, false, false));
        assert!(!requires_gate(Step::TopicGeneration, false, false));
    }

    #[test]
    fn content_steps_require_account() {
        assert!(requires_gate(Step::ContentGeneration, false, false));
        assert!(requires_gate(Step::Editing, false, false));
        assert!(requires_gate(Step::Exporting, false, false));
    }

    #[test]
    fn account_satisfies_every_gate() {
        assert!(!requires_gate(Step::ContentGeneration, true, false));
        assert!(!requires_gate(Step::StrategySelection, true, false));
    }

    #[test]
    fn demo_mode_disables_all_gates() {
        assert!(!requires_gate(Step::ContentGeneration, false, true));
        assert!(!requires_gate(Step::Editing, false, true));
        assert!(!requires_gate(Step::StrategySelection, false, true));
    }

    #[test]
    fn demo_mode_synthesizes_demo_account() {
        let account = resolve_account(None, Step::ContentGeneration, true);
        assert_eq!(
            account.map(|a| a.email),
            Some("demo@example.com".to_string())
        );
    }

    #[test]
    fn gate_holds_without_account_or_demo() {
        assert!(resolve_account(None, Step::ContentGeneration, false).is_none());
    }

    #[test]
    fn visible_limit_lifts_for_premium_or_demo() {
        assert_eq!(strategy_visible_limit(2, false, false), Some(2));
        assert_eq!(strategy_visible_limit(2, true, false), None);
        assert_eq!(strategy_visible_limit(2, false, true), None);
    }
}
