//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.sumfold.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Demo scenario settings.
    #[serde(default)]
    pub demo: DemoConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "sumfold_report.md".to_string()
}

/// Settings for the built-in demonstration scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Number of sequences to fold.
    #[serde(default = "default_demo_sequences")]
    pub sequences: usize,

    /// Each sequence holds the values 0..=max_value.
    #[serde(default = "default_demo_max_value")]
    pub max_value: i64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sequences: default_demo_sequences(),
            max_value: default_demo_max_value(),
        }
    }
}

fn default_demo_sequences() -> usize {
    6
}

fn default_demo_max_value() -> i64 {
    200
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".sumfold.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Output path - the CLI default only applies when the config
        // did not set one.
        let cli_output = args.output.display().to_string();
        if cli_output != default_output() {
            self.general.output = cli_output;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "sumfold_report.md");
        assert_eq!(config.demo.sequences, 6);
        assert_eq!(config.demo.max_value, 200);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "custom_report.md"
verbose = true

[demo]
sequences = 3
max_value = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "custom_report.md");
        assert!(config.general.verbose);
        assert_eq!(config.demo.sequences, 3);
        assert_eq!(config.demo.max_value, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.general.output, "sumfold_report.md");
        assert_eq!(config.demo.sequences, 6);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[demo]\nsequences = 2\nmax_value = 5").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.demo.sequences, 2);
        assert_eq!(config.demo.max_value, 5);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[demo]"));
    }
}
