//! Command-line workflow, kept free of argument parsing.

pub mod orchestration;

pub use orchestration::{run_analysis, AnalysisResult, AnalyzeArgs};
