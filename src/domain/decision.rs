use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::branch::{BranchInfo, BranchType};

/// Environment used when no branch mapping matches
pub const FALLBACK_ENVIRONMENT: &str = "development";

/// Deployment recommendation for a single branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub branch_name: String,
    pub branch_type: BranchType,
    pub environment: String,
    pub should_deploy: bool,
    pub requires_approval: bool,
    pub actions: Vec<String>,
    pub variables: BTreeMap<String, String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Decision {
    /// Blank decision for a branch, before any mapping or policy is applied
    pub fn for_branch(branch: &BranchInfo) -> Self {
        Decision {
            branch_name: branch.short_name.clone(),
            branch_type: branch.branch_type,
            environment: FALLBACK_ENVIRONMENT.to_string(),
            should_deploy: false,
            requires_approval: false,
            actions: Vec::new(),
            variables: BTreeMap::new(),
            warnings: Vec::new(),
            metadata: branch.metadata.clone(),
        }
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
