//! Configuration loading and parsing

use anyhow::{Context, Result};
use bench_report_parser::{DuplicatePolicy, ParserConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Report file read when neither the command line nor the config names one
pub const DEFAULT_INPUT: &str = "test_results.txt";

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parsing: ParserConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default = "default_input")]
    pub file: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { file: default_input() }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write here instead of stdout
    pub file: Option<PathBuf>,
    /// Decimal places in text output
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            file: None,
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    3
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
}

impl AppConfig {
    /// Apply command-line overrides on top of the file configuration
    pub fn with_overrides(
        mut self,
        input: Option<PathBuf>,
        format: Option<OutputFormat>,
        output: Option<PathBuf>,
        duplicates: Option<DuplicatePolicy>,
        strict: bool,
    ) -> Self {
        if let Some(input) = input {
            self.input.file = input;
        }
        if let Some(format) = format {
            self.output.format = format;
        }
        if output.is_some() {
            self.output.file = output;
        }
        if let Some(policy) = duplicates {
            self.parsing.duplicate_setups = policy;
        }
        if strict {
            self.parsing.require_all_categories = true;
        }
        self
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            file = "results/run1.txt"

            [output]
            format = "json"
            precision = 2

            [parsing]
            duplicate_setups = "merge"
            require_all_categories = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.file, PathBuf::from("results/run1.txt"));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.precision, 2);
        assert!(config.output.file.is_none());
        assert_eq!(config.parsing.duplicate_setups, DuplicatePolicy::Merge);
        assert!(config.parsing.require_all_categories);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.input.file, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.output.format, OutputFormat::Txt);
        assert_eq!(config.output.precision, 3);
        assert_eq!(config.parsing, ParserConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default().with_overrides(
            Some(PathBuf::from("other.txt")),
            Some(OutputFormat::Json),
            None,
            Some(DuplicatePolicy::Overwrite),
            true,
        );
        assert_eq!(config.input.file, PathBuf::from("other.txt"));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.parsing.duplicate_setups, DuplicatePolicy::Overwrite);
        assert!(config.parsing.require_all_categories);
    }

    #[test]
    fn test_load_config_errors() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[output]\nformat = \"html\"\n").unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
