use thiserror::Error;

/// Unified error type for branch-aware-ci operations
#[derive(Error, Debug)]
pub enum BranchCiError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Not a git repository: {0}")]
    NoRepository(String),

    #[error("Cannot resolve HEAD: {0}")]
    NoHead(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in branch-aware-ci
pub type Result<T> = std::result::Result<T, BranchCiError>;

impl BranchCiError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BranchCiError::Config(msg.into())
    }

    /// Create a pattern error with context
    pub fn pattern(msg: impl Into<String>) -> Self {
        BranchCiError::Pattern(msg.into())
    }

    /// Create an output error with context
    pub fn output(msg: impl Into<String>) -> Self {
        BranchCiError::Output(msg.into())
    }

    /// Create a missing-repository error with context
    pub fn no_repository(msg: impl Into<String>) -> Self {
        BranchCiError::NoRepository(msg.into())
    }

    /// Create an unresolvable-HEAD error with context
    pub fn no_head(msg: impl Into<String>) -> Self {
        BranchCiError::NoHead(msg.into())
    }

    /// Whether the error came from the branch name provider.
    pub fn is_repository_error(&self) -> bool {
        matches!(
            self,
            BranchCiError::Git(_) | BranchCiError::NoRepository(_) | BranchCiError::NoHead(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BranchCiError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BranchCiError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (BranchCiError::config("x"), "Configuration error"),
            (BranchCiError::pattern("x"), "Invalid pattern"),
            (BranchCiError::output("x"), "Output error"),
            (BranchCiError::no_repository("x"), "Not a git repository"),
            (BranchCiError::no_head("x"), "Cannot resolve HEAD"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_repository_errors_are_distinguishable() {
        assert!(BranchCiError::no_repository("/tmp").is_repository_error());
        assert!(BranchCiError::no_head("unborn").is_repository_error());
        assert!(!BranchCiError::config("bad toml").is_repository_error());
        assert!(!BranchCiError::output("GITHUB_ENV not set").is_repository_error());
    }

    #[test]
    fn test_error_special_characters_in_messages() {
        let special_chars = vec![
            "pattern with [unclosed",
            "message with\nnewline",
            "message with 'quotes'",
            "message with \\ backslash",
        ];

        for msg in special_chars {
            let err = BranchCiError::pattern(msg);
            assert!(err.to_string().contains(msg));
        }
    }
}
