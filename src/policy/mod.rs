//! Policy resolution - turns a classified branch plus a policy
//! configuration into a deployment decision.
//!
//! Everything here is a pure function of its inputs: no I/O, no shared
//! state, safe to call from any number of threads at once.

pub mod engine;
pub mod validate;
pub mod warning;

pub use engine::{evaluate, find_best_mapping, is_branch_allowed, DEPLOY_ACTION, TEST_ACTION};
pub use validate::{validate_policy, PolicyValidation};
pub use warning::PolicyWarning;
