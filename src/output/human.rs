use console::style;

use crate::domain::Decision;

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(style(title).bold().to_string());
    lines.push("=".repeat(title.chars().count()));
}

/// Sectioned, human-readable report; empty sections are left out.
pub fn format_human(decision: &Decision) -> String {
    let mut lines = Vec::new();

    heading(&mut lines, "Branch Analysis");
    lines.push(format!("Branch:      {}", decision.branch_name));
    lines.push(format!("Type:        {}", decision.branch_type));
    lines.push(format!("Environment: {}", decision.environment));
    lines.push(String::new());

    heading(&mut lines, "CI/CD Decision");
    if decision.should_deploy {
        lines.push(format!("{} Should Deploy: Yes", style("✓").green()));
    } else {
        lines.push(format!("{} Should Deploy: No", style("✗").red()));
    }

    if decision.requires_approval {
        lines.push(format!("{} Requires Approval: Yes", style("⚠").yellow()));
    } else {
        lines.push(format!("{} Requires Approval: No", style("✓").green()));
    }

    if !decision.actions.is_empty() {
        lines.push(format!("Actions:     {}", decision.actions.join(", ")));
    }

    if !decision.variables.is_empty() {
        lines.push(String::new());
        heading(&mut lines, "Variables");
        for (key, value) in &decision.variables {
            lines.push(format!("{}={}", key, value));
        }
    }

    if decision.has_warnings() {
        lines.push(String::new());
        heading(&mut lines, "Warnings");
        for warning in &decision.warnings {
            lines.push(format!("- {}", warning));
        }
    }

    if !decision.metadata.is_empty() {
        lines.push(String::new());
        heading(&mut lines, "Metadata");
        for (key, value) in &decision.metadata {
            lines.push(format!("{}: {}", key, value));
        }
    }

    lines.join("\n")
}
