use std::env;
use std::fs::OpenOptions;
use std::io::Write;

use crate::domain::Decision;
use crate::error::{BranchCiError, Result};

use super::format_env;

pub const GITHUB_ENV_VAR: &str = "GITHUB_ENV";
pub const GITHUB_OUTPUT_VAR: &str = "GITHUB_OUTPUT";

/// Append the `env` rendering to the file named by `$GITHUB_ENV`.
pub fn write_github_env(decision: &Decision) -> Result<String> {
    append_to_env_file(GITHUB_ENV_VAR, &format!("{}\n", format_env(decision)))?;
    Ok(format!("Environment variables written to ${}", GITHUB_ENV_VAR))
}

/// Append step outputs to the file named by `$GITHUB_OUTPUT`.
pub fn write_github_output(decision: &Decision) -> Result<String> {
    append_to_env_file(GITHUB_OUTPUT_VAR, &format!("{}\n", format_outputs(decision)))?;
    Ok(format!("Output variables written to ${}", GITHUB_OUTPUT_VAR))
}

/// Lowercase `key=value` lines for `$GITHUB_OUTPUT`
pub fn format_outputs(decision: &Decision) -> String {
    [
        format!("branch_name={}", decision.branch_name),
        format!("branch_type={}", decision.branch_type),
        format!("environment={}", decision.environment),
        format!("should_deploy={}", decision.should_deploy),
        format!("requires_approval={}", decision.requires_approval),
        format!("actions={}", decision.actions.join(",")),
    ]
    .join("\n")
}

fn append_to_env_file(var: &str, content: &str) -> Result<()> {
    let path = env::var(var)
        .ok()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| BranchCiError::output(format!("{} not set", var)))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| BranchCiError::output(format!("failed to open {} file: {}", var, e)))?;

    file.write_all(content.as_bytes())
        .map_err(|e| BranchCiError::output(format!("failed to write to {}: {}", var, e)))?;

    tracing::debug!(path = %path, var, "appended decision to GitHub Actions file");
    Ok(())
}
