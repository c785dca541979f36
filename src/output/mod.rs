//! Decision rendering.
//!
//! Every format is a pure function of the decision except the two GitHub
//! Actions formats, which append to the files named by `$GITHUB_ENV` and
//! `$GITHUB_OUTPUT`.

pub mod github;
pub mod human;

use std::fmt;

use crate::domain::Decision;
use crate::error::{BranchCiError, Result};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Env,
    GithubEnv,
    GithubOutput,
    Human,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Env => "env",
            OutputFormat::GithubEnv => "github-env",
            OutputFormat::GithubOutput => "github-output",
            OutputFormat::Human => "human",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a decision in the requested format.
///
/// # Returns
/// * `Ok(String)` - Text for stdout (for the GitHub formats, a confirmation line)
/// * `Err` - Serialization failed, or a GitHub file could not be written
pub fn format_decision(decision: &Decision, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format_json(decision),
        OutputFormat::Yaml => format_yaml(decision),
        OutputFormat::Env => Ok(format_env(decision)),
        OutputFormat::GithubEnv => github::write_github_env(decision),
        OutputFormat::GithubOutput => github::write_github_output(decision),
        OutputFormat::Human => Ok(human::format_human(decision)),
    }
}

pub fn format_json(decision: &Decision) -> Result<String> {
    serde_json::to_string_pretty(decision)
        .map_err(|e| BranchCiError::output(format!("failed to marshal JSON: {}", e)))
}

pub fn format_yaml(decision: &Decision) -> Result<String> {
    serde_yaml::to_string(decision)
        .map_err(|e| BranchCiError::output(format!("failed to marshal YAML: {}", e)))
}

/// `KEY=VALUE` lines; variables follow in key order.
pub fn format_env(decision: &Decision) -> String {
    let mut lines = vec![
        format!("BRANCH_NAME={}", decision.branch_name),
        format!("BRANCH_TYPE={}", decision.branch_type),
        format!("ENVIRONMENT={}", decision.environment),
        format!("SHOULD_DEPLOY={}", decision.should_deploy),
        format!("REQUIRES_APPROVAL={}", decision.requires_approval),
    ];

    if !decision.actions.is_empty() {
        lines.push(format!("ACTIONS={}", decision.actions.join(",")));
    }

    for (key, value) in &decision.variables {
        lines.push(format!("{}={}", key, value));
    }

    lines.join("\n")
}
