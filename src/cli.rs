//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Sumfold - deferred element-wise summation over numeric sequences
///
/// Fold any number of equal-length sequences into one lazy sum that is
/// computed in a single pass on first read. Markdown/JSON reports.
///
/// Examples:
///   sumfold --input plan.json
///   sumfold --demo
///   sumfold --input plan.json --format json --output result.json
///   sumfold --input plan.json --dry-run
///   sumfold --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to a JSON summation plan
    ///
    /// The plan lists the terms to fold: arrays of integers (leaf
    /// sequences) or `{"sum": [...]}` objects (nested sums). Not
    /// required when using --demo or --init-config.
    #[arg(short, long, value_name = "FILE", env = "SUMFOLD_INPUT")]
    pub input: Option<PathBuf>,

    /// Run the built-in demonstration scenario
    ///
    /// Folds six sequences of 0..=200 and evaluates the result,
    /// showing that the summation pass runs exactly once.
    #[arg(long, conflicts_with = "input")]
    pub demo: bool,

    /// Output file path for the report
    #[arg(short, long, default_value = "sumfold_report.md", value_name = "FILE")]
    pub output: PathBuf,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .sumfold.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: build and validate the graph without evaluating it
    ///
    /// Shows the operand count and sequence length and exits.
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .sumfold.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.input.is_none() && !self.demo {
            return Err("Either --input or --demo must be given".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Plan file does not exist: {}", input.display()));
            }
            if !input.is_file() {
                return Err(format!("Plan path is not a file: {}", input.display()));
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Describe the plan source for report metadata.
    pub fn plan_source(&self) -> String {
        match self.input {
            Some(ref path) => path.display().to_string(),
            None => "demo".to_string(),
        }
    }
}
