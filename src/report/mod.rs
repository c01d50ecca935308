//! Report generation for evaluation runs.
//!
//! This module renders an evaluation report to Markdown or JSON.

pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report};
