//! Main workflow orchestration logic
//!
//! Wires the branch name provider, the configuration loader and the pure
//! classification/policy core together, independent of clap, so the
//! workflow can be called programmatically.

use std::path::PathBuf;

use crate::config::{self, ConfigSource, PolicyConfig};
use crate::domain::{classify, BranchInfo, Decision};
use crate::error::{BranchCiError, Result};
use crate::git::BranchSource;
use crate::policy::{evaluate, validate_policy, PolicyValidation};

/// Arguments for the analysis workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeArgs {
    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Repository path, also the fallback config search root
    pub repo_path: PathBuf,

    /// Branch to evaluate instead of the checked-out one
    pub branch: Option<String>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        AnalyzeArgs {
            config_path: None,
            repo_path: PathBuf::from("."),
            branch: None,
        }
    }
}

/// Result of a successful analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// The classified branch
    pub branch: BranchInfo,

    /// The resolved decision
    pub decision: Decision,

    /// Advisory validation of the configuration that was used
    pub validation: PolicyValidation,

    /// Where the configuration came from
    pub config_source: ConfigSource,
}

/// Loads the configuration for `args`, searching the repository root
/// reported by `source` before `args.repo_path`.
pub fn load_policy<S: BranchSource>(
    args: &AnalyzeArgs,
    source: Option<&S>,
) -> Result<(PolicyConfig, ConfigSource)> {
    let search_root = source
        .and_then(|s| s.root())
        .unwrap_or_else(|| args.repo_path.clone());
    config::load_config(args.config_path.as_deref(), &search_root)
}

/// Main analysis workflow
///
/// 1. Resolve the branch name (explicit, or from the source; with neither, fail)
/// 2. Load the configuration
/// 3. Validate it (advisory, problems are logged)
/// 4. Classify the branch and evaluate the policy
///
/// # Returns
///
/// The analysis, or the first fatal provider/config error
pub fn run_analysis<S: BranchSource>(
    args: &AnalyzeArgs,
    source: Option<&S>,
) -> Result<AnalysisResult> {
    let branch_name = match (&args.branch, source) {
        (Some(branch), _) => branch.clone(),
        (None, Some(source)) => source.current_branch()?,
        (None, None) => {
            return Err(BranchCiError::no_repository(format!(
                "{}: no repository and no branch given",
                args.repo_path.display()
            )))
        }
    };

    let (config, config_source) = load_policy(args, source)?;
    let validation = validate_policy(&config);
    for problem in &validation.problems {
        tracing::warn!(problem = %problem, "policy configuration problem");
    }

    let branch = classify(&branch_name);
    let decision = evaluate(&branch, &config);
    tracing::debug!(
        branch = %branch.short_name,
        branch_type = %branch.branch_type,
        environment = %decision.environment,
        should_deploy = decision.should_deploy,
        "evaluated branch"
    );

    Ok(AnalysisResult {
        branch,
        decision,
        validation,
        config_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use tempfile::TempDir;

    fn args_in(dir: &TempDir) -> AnalyzeArgs {
        AnalyzeArgs {
            repo_path: dir.path().to_path_buf(),
            ..AnalyzeArgs::default()
        }
    }

    #[test]
    fn test_uses_source_branch() {
        let dir = TempDir::new().unwrap();
        let source = MockRepository::on_branch("staging").with_root(dir.path());
        let result = run_analysis(&args_in(&dir), Some(&source)).unwrap();
        assert_eq!(result.decision.environment, "staging");
        assert!(result.branch.is_protected);
    }

    #[test]
    fn test_explicit_branch_skips_source() {
        let dir = TempDir::new().unwrap();
        let args = AnalyzeArgs {
            branch: Some("hotfix/urgent".to_string()),
            ..args_in(&dir)
        };
        // A source without HEAD would fail if it were consulted
        let source = MockRepository::new().with_root(dir.path());
        let result = run_analysis(&args, Some(&source)).unwrap();
        assert_eq!(result.branch.short_name, "hotfix/urgent");
        assert_eq!(result.decision.environment, "staging");
    }

    #[test]
    fn test_missing_head_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = run_analysis(&args_in(&dir), Some(&MockRepository::new())).unwrap_err();
        assert!(matches!(err, BranchCiError::NoHead(_)));
        assert!(err.is_repository_error());
    }

    #[test]
    fn test_explicit_branch_without_repository() {
        let dir = TempDir::new().unwrap();
        let args = AnalyzeArgs {
            branch: Some("main".to_string()),
            ..args_in(&dir)
        };
        let result = run_analysis(&args, None::<&MockRepository>).unwrap();
        assert_eq!(result.decision.environment, "production");
    }

    #[test]
    fn test_no_branch_and_no_repository_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = run_analysis(&args_in(&dir), None::<&MockRepository>).unwrap_err();
        assert!(matches!(err, BranchCiError::NoRepository(_)));
    }

    #[test]
    fn test_config_found_under_repository_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".branchci.toml"),
            r#"
[environments.qa]
name = "qa"

[[branch_mappings]]
pattern = "main"
environment = "qa"
actions = ["deploy"]
priority = 1
"#,
        )
        .unwrap();

        let source = MockRepository::on_branch("main").with_root(dir.path());
        let result = run_analysis(&AnalyzeArgs::default(), Some(&source)).unwrap();
        assert_eq!(result.decision.environment, "qa");
        assert!(result.validation.valid);
        assert_eq!(
            result.config_source,
            ConfigSource::File(dir.path().join(".branchci.toml"))
        );
    }

    #[test]
    fn test_unreadable_explicit_config_is_fatal() {
        let dir = TempDir::new().unwrap();
        let args = AnalyzeArgs {
            config_path: Some(dir.path().join("missing.toml")),
            ..args_in(&dir)
        };
        let err = run_analysis(&args, Some(&MockRepository::on_branch("main"))).unwrap_err();
        assert!(matches!(err, BranchCiError::Config(_)));
        assert!(!err.is_repository_error());
    }
}
