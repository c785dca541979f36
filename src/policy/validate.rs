use std::collections::HashSet;

use serde::Serialize;

use crate::config::PolicyConfig;

/// Outcome of [`validate_policy`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyValidation {
    pub valid: bool,
    pub problems: Vec<String>,
}

/// Checks a configuration for structural problems.
///
/// Advisory only: the configuration is never modified, and `evaluate` still
/// works on an invalid one.
pub fn validate_policy(config: &PolicyConfig) -> PolicyValidation {
    let mut problems = Vec::new();

    if config.environments.is_empty() {
        problems.push("No environments defined".to_string());
    }

    if config.branch_mappings.is_empty() {
        problems.push("No branch mappings defined".to_string());
    }

    let mut seen = HashSet::new();
    for mapping in &config.branch_mappings {
        if !seen.insert(mapping.priority) {
            problems.push(format!("Duplicate priority found: {}", mapping.priority));
        }
    }

    PolicyValidation {
        valid: problems.is_empty(),
        problems,
    }
}
