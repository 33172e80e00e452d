//! Tool configuration
//!
//! Loaded from the JSON file named by `-config <file>`. Every field is
//! optional; without a file the defaults apply.
//!
//! ```json
//! {
//!   "example_database": "computing.txt",
//!   "log_level": "warn",
//!   "tag_indent": 1,
//!   "value_indent": 5
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::storage::Layout;

use super::errors::{CliError, CliResult};

/// Largest accepted indentation for tag and value lines
const MAX_INDENT: usize = 16;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// File written when a tool runs with no arguments
    #[serde(default = "default_example_database")]
    pub example_database: String,

    /// Minimum log severity written to stderr
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Spaces before each tag line
    #[serde(default = "default_tag_indent")]
    pub tag_indent: usize,

    /// Spaces before each value line
    #[serde(default = "default_value_indent")]
    pub value_indent: usize,
}

fn default_example_database() -> String {
    "computing.txt".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_tag_indent() -> usize {
    1
}
fn default_value_indent() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            example_database: default_example_database(),
            log_level: default_log_level(),
            tag_indent: default_tag_indent(),
            value_indent: default_value_indent(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.example_database.trim().is_empty() {
            return Err(CliError::config_error("example_database must not be empty"));
        }

        self.severity()?;

        if self.tag_indent > MAX_INDENT || self.value_indent > MAX_INDENT {
            return Err(CliError::config_error(format!(
                "tag_indent and value_indent must be at most {}",
                MAX_INDENT
            )));
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(CliError::config_error)
    }

    /// Indentation for serialized records
    pub fn layout(&self) -> Layout {
        Layout {
            tag_indent: self.tag_indent,
            value_indent: self.value_indent,
        }
    }

    /// Path of the example database
    pub fn example_path(&self) -> PathBuf {
        PathBuf::from(&self.example_database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.example_database, "computing.txt");
        assert_eq!(config.severity().unwrap(), Severity::Warn);
        assert_eq!(config.layout(), Layout::default());
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("studentdb.json");
        fs::write(&path, r#"{"log_level": "info", "value_indent": 2}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.severity().unwrap(), Severity::Info);
        assert_eq!(config.value_indent, 2);
        assert_eq!(config.tag_indent, 1);
        assert_eq!(config.example_database, "computing.txt");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("studentdb.json");
        fs::write(&path, r#"{"log_level": "loud"}"#).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "STUDENTDB_CONFIG_ERROR");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("studentdb.json");
        fs::write(&path, r#"{"colour": "blue"}"#).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_indent_limit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("studentdb.json");
        fs::write(&path, r#"{"tag_indent": 40}"#).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::load(Path::new("/nonexistent/studentdb.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
        assert!(Config::load_or_default(None).is_ok());
    }
}
