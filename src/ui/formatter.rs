//! Pure formatting functions for terminal status output.
//!
//! Decision rendering lives in [`crate::output`]; this module only covers the
//! CLI's own status lines, which always go to stderr so stdout stays clean
//! for machine-readable output.

use crate::policy::PolicyValidation;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("\x1b[33m→\x1b[0m {}", message);
}

/// Format and print a warning with a yellow icon.
pub fn display_warning(message: &str) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", message);
}

/// Lines describing a validation result, without color.
pub fn validation_lines(validation: &PolicyValidation) -> Vec<String> {
    if validation.valid {
        return vec!["Configuration is valid".to_string()];
    }

    let mut lines = vec![format!(
        "Configuration has {} problem(s):",
        validation.problems.len()
    )];
    lines.extend(validation.problems.iter().map(|p| format!("  - {}", p)));
    lines
}

/// Display the result of validating a configuration.
///
/// # Arguments
/// * `validation` - Result of `validate_policy`
pub fn display_validation(validation: &PolicyValidation) {
    let lines = validation_lines(validation);
    if validation.valid {
        display_success(&lines[0]);
    } else {
        display_error(&lines[0]);
        for line in &lines[1..] {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_lines_valid() {
        let validation = PolicyValidation {
            valid: true,
            problems: Vec::new(),
        };
        assert_eq!(validation_lines(&validation), vec!["Configuration is valid"]);
    }

    #[test]
    fn test_validation_lines_invalid() {
        let validation = PolicyValidation {
            valid: false,
            problems: vec!["No environments defined".to_string()],
        };
        assert_eq!(
            validation_lines(&validation),
            vec![
                "Configuration has 1 problem(s):",
                "  - No environments defined"
            ]
        );
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stderr
        display_status("test status");
        display_warning("test warning");
    }
}
