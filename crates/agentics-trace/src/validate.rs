//! Structural validation of assembled span trees.
//!
//! Checks the Core -> Repo -> Agent shape in a single pass and reports
//! every violation found, not just the first. Purely structural: statuses,
//! timestamps, and agent-level children are never inspected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::span::{ExecutionSpan, SpanTier};

/// Outcome of a structural validation pass.
///
/// `valid` is true iff `failures` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub failures: Vec<String>,
}

impl ValidationReport {
    fn from_failures(failures: Vec<String>) -> Self {
        Self {
            valid: failures.is_empty(),
            failures,
        }
    }
}

fn format_parent(parent: Option<Uuid>) -> String {
    match parent {
        Some(id) => id.to_string(),
        None => "none".to_string(),
    }
}

/// Validate the tree rooted at `core_span` against the required shape.
///
/// Rules, each violation recorded independently:
/// 1. the root's tier must be `core`;
/// 2. the root must have at least one repo-level child;
/// 3. every non-repo direct child of the root is a separate failure;
/// 4. every repo child's `parent_span_id` must equal the root's `span_id`;
/// 5. every repo child must have at least one agent-level child;
/// 6. every agent child's `parent_span_id` must equal its repo's `span_id`.
///
/// Rules 2 and 3 are complementary, never merged: rule 2 fires only when
/// the repo-child count is zero, so a core span with one valid repo child
/// and one stray non-repo child fails rule 3 alone.
pub fn validate(core_span: &ExecutionSpan) -> ValidationReport {
    let mut failures = Vec::new();

    if core_span.tier != SpanTier::Core {
        failures.push(format!(
            "Root span '{}' has tier '{}', expected 'core'",
            core_span.name, core_span.tier
        ));
    }

    let repo_count = core_span
        .children
        .iter()
        .filter(|c| c.tier == SpanTier::Repo)
        .count();
    if repo_count == 0 {
        failures.push(format!(
            "Core span '{}' has zero repo-level child spans",
            core_span.name
        ));
    }

    for child in &core_span.children {
        if child.tier != SpanTier::Repo {
            failures.push(format!(
                "Core span '{}' has direct child '{}' with tier '{}', expected 'repo'",
                core_span.name, child.name, child.tier
            ));
        }
    }

    for repo in core_span.children.iter().filter(|c| c.tier == SpanTier::Repo) {
        if repo.parent_span_id != Some(core_span.span_id) {
            failures.push(format!(
                "Repo span '{}' records parent_span_id {}, expected core span_id {}",
                repo.name,
                format_parent(repo.parent_span_id),
                core_span.span_id
            ));
        }

        let agent_count = repo
            .children
            .iter()
            .filter(|c| c.tier == SpanTier::Agent)
            .count();
        if agent_count == 0 {
            failures.push(format!(
                "Repo span '{}' ({}) has zero agent-level child spans",
                repo.name, repo.span_id
            ));
        }

        for agent in repo.children.iter().filter(|c| c.tier == SpanTier::Agent) {
            if agent.parent_span_id != Some(repo.span_id) {
                failures.push(format!(
                    "Agent span '{}' records parent_span_id {}, expected repo span_id {}",
                    agent.name,
                    format_parent(agent.parent_span_id),
                    repo.span_id
                ));
            }
        }
    }

    ValidationReport::from_failures(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn well_formed_tree() -> ExecutionSpan {
        let mut core = ExecutionSpan::new_core("interface-core", None);
        let mut repo = ExecutionSpan::new_repo("LLM-Inference-Gateway", core.span_id);
        let agent = ExecutionSpan::new_agent("inference-gateway:infer", repo.span_id);
        repo.add_child(agent);
        core.add_child(repo);
        core
    }

    #[test]
    fn test_well_formed_tree_is_valid() {
        let report = validate(&well_formed_tree());
        assert!(report.valid);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_non_core_root_names_actual_tier() {
        let repo = ExecutionSpan::new_repo("LLM-Inference-Gateway", Uuid::new_v4());
        let report = validate(&repo);

        assert!(!report.valid);
        assert!(report.failures.iter().any(|f| f.contains("tier 'repo'")));
    }

    #[test]
    fn test_zero_repo_children_is_reported() {
        let core = ExecutionSpan::new_core("interface-core", None);
        let report = validate(&core);

        assert!(!report.valid);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("zero repo-level child spans"));
    }

    #[test]
    fn test_stray_non_repo_child_is_its_own_failure() {
        let mut core = well_formed_tree();
        // Agent attached directly under core: rule 3 fires, rule 2 does not
        // because a valid repo child exists.
        let stray = ExecutionSpan::new_agent("stray-agent", core.span_id);
        core.add_child(stray);

        let report = validate(&core);
        assert!(!report.valid);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("stray-agent"));
        assert!(report.failures[0].contains("tier 'agent'"));
        assert!(!report.failures[0].contains("zero repo-level"));
    }

    #[test]
    fn test_repo_parent_mismatch_names_both_identifiers() {
        let mut core = ExecutionSpan::new_core("interface-core", None);
        let wrong_parent = Uuid::new_v4();
        let mut repo = ExecutionSpan::new_repo("LLM-Config-Manager", wrong_parent);
        repo.add_child(ExecutionSpan::new_agent("config-manager:get", repo.span_id));
        core.add_child(repo);

        let report = validate(&core);
        assert!(!report.valid);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains(&wrong_parent.to_string()));
        assert!(report.failures[0].contains(&core.span_id.to_string()));
    }

    #[test]
    fn test_zero_agent_children_names_offending_repo() {
        let mut core = ExecutionSpan::new_core("interface-core", None);
        let repo = ExecutionSpan::new_repo("LLM-Inference-Gateway", core.span_id);
        core.add_child(repo);

        let report = validate(&core);
        assert!(!report.valid);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("LLM-Inference-Gateway"));
        assert!(report.failures[0].contains("zero agent-level child spans"));
    }

    #[test]
    fn test_multiple_empty_repos_are_all_reported() {
        let mut core = ExecutionSpan::new_core("interface-core", None);
        core.add_child(ExecutionSpan::new_repo("LLM-Inference-Gateway", core.span_id));
        core.add_child(ExecutionSpan::new_repo("LLM-Provider-Router", core.span_id));

        let report = validate(&core);
        assert!(!report.valid);
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures[0].contains("LLM-Inference-Gateway"));
        assert!(report.failures[1].contains("LLM-Provider-Router"));
    }

    #[test]
    fn test_agent_parent_mismatch_is_reported() {
        let mut core = ExecutionSpan::new_core("interface-core", None);
        let mut repo = ExecutionSpan::new_repo("LLM-Inference-Gateway", core.span_id);
        let detached = ExecutionSpan::new_agent("inference-gateway:infer", Uuid::new_v4());
        repo.add_child(detached);
        let repo_span_id = repo.span_id;
        core.add_child(repo);

        let report = validate(&core);
        assert!(!report.valid);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("inference-gateway:infer"));
        assert!(report.failures[0].contains(&repo_span_id.to_string()));
    }

    #[test]
    fn test_all_violations_collected_in_one_pass() {
        // Non-core root with a stray child and an empty repo: three
        // distinct failures from a single validate call.
        let mut root = ExecutionSpan::new_agent("not-a-core", Uuid::new_v4());
        root.add_child(ExecutionSpan::new_repo("LLM-Inference-Gateway", root.span_id));
        root.add_child(ExecutionSpan::new_agent("stray", root.span_id));

        let report = validate(&root);
        assert!(!report.valid);
        assert_eq!(report.failures.len(), 3);
    }

    #[test]
    fn test_validator_ignores_statuses_and_agent_children() {
        // Pending statuses everywhere: still structurally valid.
        let report = validate(&well_formed_tree());
        assert!(report.valid);
    }
}
