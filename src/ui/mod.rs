//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_status, display_success, display_validation, display_warning,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Displays the given prompt and accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter.
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, or "n"/"no")
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_action_from(prompt, &mut stdin.lock(), &mut io::stderr())
}

/// [`confirm_action`] over arbitrary reader/writer, for testing.
pub fn confirm_action_from<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "\n{} (y/N): ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let response = line.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> bool {
        let mut output = Vec::new();
        confirm_action_from("Overwrite?", &mut Cursor::new(input), &mut output).unwrap()
    }

    #[test]
    fn test_confirm_accepts_yes() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        assert!(!answer("\n"));
        assert!(!answer("n\n"));
        assert!(!answer(""));
    }

    #[test]
    fn test_confirm_writes_prompt() {
        let mut output = Vec::new();
        confirm_action_from("Overwrite?", &mut Cursor::new("y\n"), &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("Overwrite? (y/N): "));
    }
}
