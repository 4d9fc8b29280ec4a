//! CLI command handlers

pub mod analyze;

pub use analyze::{AnalyzeArgs, InputSource, handle_analyze};
