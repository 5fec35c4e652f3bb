//! YAML configuration for the `cmdline-parse` front end.
//!
//! Every section is optional; missing fields fall back to their defaults.
//! Command-line options override values read from the file.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! output:
//!   format: json
//!   pretty: true
//! batch:
//!   jobs: 4
//!   skip_comments: true
//!   strict: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use cmdline_core::OutputFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// How parse results are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when `--format` is not given.
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// Settings for the `batch` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of parallel parse jobs.
    pub jobs: usize,
    /// Skip lines whose first non-blank character is `#`.
    pub skip_comments: bool,
    /// Exit with an error when any line fails to parse.
    pub strict: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: 4,
            skip_comments: true,
            strict: false,
        }
    }
}

/// Top-level front end configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            output: OutputConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read, or
    /// [`ConfigError::YamlError`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be written, or
    /// [`ConfigError::YamlError`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
