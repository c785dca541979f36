use std::fmt;

/// Advisory conditions raised while resolving a decision.
/// These never abort evaluation; they end up in `Decision::warnings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyWarning {
    /// No branch mapping matched, the fallback environment was used
    NoMatchingMapping { fallback: String },
    /// The resolved environment's allow-list does not cover the branch
    BranchNotAllowed { branch: String, environment: String },
    /// The branch matches a globally blocked pattern
    BlockedPattern { pattern: String },
}

impl fmt::Display for PolicyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyWarning::NoMatchingMapping { fallback } => {
                write!(
                    f,
                    "No matching branch mapping found, using {} environment",
                    fallback
                )
            }
            PolicyWarning::BranchNotAllowed {
                branch,
                environment,
            } => {
                write!(
                    f,
                    "Branch {} may not be allowed to deploy to {}",
                    branch, environment
                )
            }
            PolicyWarning::BlockedPattern { pattern } => {
                write!(f, "Branch matches blocked pattern: {}", pattern)
            }
        }
    }
}
