use crate::config::{BranchMapping, EnvironmentConfig, PolicyConfig, PolicySettings};
use crate::domain::{matches_pattern, BranchInfo, Decision, FALLBACK_ENVIRONMENT};

use super::warning::PolicyWarning;

/// Action whose presence in a mapping turns deployment on.
pub const DEPLOY_ACTION: &str = "deploy";

/// Action appended when the configuration requires tests.
pub const TEST_ACTION: &str = "test";

/// Resolves the deployment decision for a classified branch.
///
/// Stages, in order:
/// 1. pick the highest-priority matching mapping (first one wins on ties),
///    or fall back to the development environment
/// 2. overlay the resolved environment's variables and approval flag
/// 3. apply the global policies (blocked patterns, required tests, code review)
///
/// Never fails. A mapping that points at a missing environment just skips stage 2.
pub fn evaluate(branch: &BranchInfo, config: &PolicyConfig) -> Decision {
    let mut decision = Decision::for_branch(branch);

    match find_best_mapping(&branch.short_name, &config.branch_mappings) {
        Some(mapping) => {
            tracing::debug!(
                branch = %branch.short_name,
                pattern = %mapping.pattern,
                priority = mapping.priority,
                environment = %mapping.environment,
                "selected branch mapping"
            );
            decision.environment = mapping.environment.clone();
            decision.actions = mapping.actions.clone();
            decision.should_deploy =
                should_deploy(&mapping.actions, &branch.short_name, &config.policies);
        }
        None => {
            tracing::debug!(branch = %branch.short_name, "no branch mapping matched");
            decision.environment = FALLBACK_ENVIRONMENT.to_string();
            decision.should_deploy = false;
            decision.warnings.push(
                PolicyWarning::NoMatchingMapping {
                    fallback: FALLBACK_ENVIRONMENT.to_string(),
                }
                .to_string(),
            );
        }
    }

    if let Some(environment) = config.environments.get(&decision.environment) {
        apply_environment(&mut decision, branch, environment);
    }

    apply_policies(&mut decision, branch, &config.policies);

    decision
}

/// Highest-priority mapping whose pattern matches, first one on ties.
pub fn find_best_mapping<'a>(
    branch_name: &str,
    mappings: &'a [BranchMapping],
) -> Option<&'a BranchMapping> {
    let mut best: Option<&BranchMapping> = None;

    for mapping in mappings {
        if !matches_pattern(branch_name, &mapping.pattern) {
            continue;
        }
        if best.map_or(true, |current| mapping.priority > current.priority) {
            best = Some(mapping);
        }
    }

    best
}

fn should_deploy(actions: &[String], branch_name: &str, policies: &PolicySettings) -> bool {
    actions.iter().any(|action| action == DEPLOY_ACTION)
        || policies
            .auto_deploy_branches
            .iter()
            .any(|auto| auto == branch_name)
}

/// An empty allow-list admits every branch.
pub fn is_branch_allowed(branch_name: &str, allowed_patterns: &[String]) -> bool {
    allowed_patterns.is_empty()
        || allowed_patterns
            .iter()
            .any(|pattern| matches_pattern(branch_name, pattern))
}

fn apply_environment(decision: &mut Decision, branch: &BranchInfo, environment: &EnvironmentConfig) {
    decision.requires_approval = environment.requires_approval;
    decision.variables.extend(
        environment
            .variables
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );

    if !is_branch_allowed(&branch.short_name, &environment.allowed_branches) {
        decision.warnings.push(
            PolicyWarning::BranchNotAllowed {
                branch: branch.short_name.clone(),
                environment: decision.environment.clone(),
            }
            .to_string(),
        );
    }
}

fn apply_policies(decision: &mut Decision, branch: &BranchInfo, policies: &PolicySettings) {
    for pattern in &policies.blocked_branch_patterns {
        if matches_pattern(&branch.short_name, pattern) {
            tracing::debug!(branch = %branch.short_name, pattern = %pattern, "branch is blocked");
            decision.should_deploy = false;
            decision.warnings.push(
                PolicyWarning::BlockedPattern {
                    pattern: pattern.clone(),
                }
                .to_string(),
            );
        }
    }

    if policies.require_tests && !decision.has_action(TEST_ACTION) {
        decision.actions.push(TEST_ACTION.to_string());
    }

    if policies.require_code_review && branch.is_protected {
        decision.requires_approval = true;
    }
}
