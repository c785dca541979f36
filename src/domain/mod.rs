//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod decision;
pub mod pattern;

pub use branch::{classify, BranchInfo, BranchType};
pub use decision::{Decision, FALLBACK_ENVIRONMENT};
pub use pattern::{matches_pattern, BranchPattern};
