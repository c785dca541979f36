pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod output;
pub mod policy;
pub mod telemetry;
pub mod ui;

pub use domain::{classify, BranchInfo, BranchType, Decision};
pub use error::{BranchCiError, Result};
pub use policy::{evaluate, validate_policy, PolicyValidation};
