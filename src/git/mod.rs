//! Branch name provider
//!
//! This module provides a trait-based abstraction over reading the current
//! branch, so the analysis workflow can run against a real repository or an
//! in-memory stand-in.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: reads `HEAD` through the `git2` crate
//! - [mock::MockRepository]: a fixed answer for testing
//!
//! ```rust
//! # use branch_aware_ci::git::BranchSource;
//! # fn example<S: BranchSource>(source: &S) -> Result<(), Box<dyn std::error::Error>> {
//! let branch = source.current_branch()?;
//! println!("On branch {}", branch);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::PathBuf;

/// Source of the branch name to evaluate
///
/// ## Error Handling
///
/// Failures are fatal to the analysis and are not retried. Implementations
/// report a missing repository as [crate::error::BranchCiError::NoRepository]
/// and an unresolvable `HEAD` as [crate::error::BranchCiError::NoHead].
pub trait BranchSource {
    /// Short name of the checked-out branch (e.g. "main", "feature/x").
    ///
    /// A detached `HEAD` is reported as the literal "HEAD".
    fn current_branch(&self) -> Result<String>;

    /// Root of the working tree, used as the config search root.
    fn root(&self) -> Option<PathBuf> {
        None
    }
}
