use crate::error::{BranchCiError, Result};
use crate::git::BranchSource;
use std::path::PathBuf;

/// Mock branch source for testing without a real repository
pub struct MockRepository {
    branch: Option<String>,
    root: Option<PathBuf>,
}

impl MockRepository {
    /// Create a mock with no `HEAD`; `current_branch` fails with `NoHead`
    pub fn new() -> Self {
        MockRepository {
            branch: None,
            root: None,
        }
    }

    /// Create a mock checked out on `branch`
    pub fn on_branch(branch: impl Into<String>) -> Self {
        MockRepository {
            branch: Some(branch.into()),
            root: None,
        }
    }

    /// Set the working tree root reported by the mock
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchSource for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| BranchCiError::no_head("mock repository has no HEAD"))
    }

    fn root(&self) -> Option<PathBuf> {
        self.root.clone()
    }
}
