//! Structural options for parsing configuration text.
//!
//! Options can be built in code or loaded from a TOML, YAML or JSON file.
//! The format is detected by file extension, and falls back to trying JSON,
//! YAML, then TOML when the extension is unknown.
//!
//! # Examples
//!
//! ```
//! use netcfg::options::{parse_options_toml, Dialect};
//!
//! let options = parse_options_toml("indent = 2\ndialect = \"path-addressed\"").unwrap();
//! assert_eq!(options.indent, 2);
//! assert_eq!(options.dialect, Dialect::PathAddressed);
//! assert_eq!(options.comment_tokens, vec!["#", "!"]);
//! ```

use crate::error::{ConfigError, OptionsError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Comment prefixes used when none are configured.
pub const DEFAULT_COMMENT_TOKENS: &[&str] = &["#", "!"];

/// Output conventions of the configuration being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Indented blocks; diffs can be expanded to parents or whole blocks.
    #[default]
    Generic,
    /// Every statement is addressed by its full path (`set a b c`).
    #[serde(alias = "junos")]
    PathAddressed,
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "block" => Ok(Dialect::Generic),
            "path-addressed" | "junos" => Ok(Dialect::PathAddressed),
            other => Err(ConfigError::invalid_argument(format!(
                "unknown dialect: {}",
                other
            ))),
        }
    }
}

/// Parameters that control how text is turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOptions {
    /// Number of columns making up one nesting level
    pub indent: usize,
    /// Output conventions for rendering and diff expansion
    pub dialect: Dialect,
    /// Lines starting with any of these (after stripping) are skipped
    pub comment_tokens: Vec<String>,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            indent: 1,
            dialect: Dialect::Generic,
            comment_tokens: DEFAULT_COMMENT_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl ConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn comment_tokens<S: Into<String>>(mut self, tokens: impl IntoIterator<Item = S>) -> Self {
        self.comment_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }
}

/// Loads options from a file.
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist (`OptionsError::FileNotFound`)
/// - The file cannot be read (`OptionsError::ReadError`)
/// - The file contents are invalid for the detected format
/// - The format cannot be determined (`OptionsError::UnknownFormat`)
pub fn load_options(path: &Path) -> Result<ConfigOptions, OptionsError> {
    let shown = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(OptionsError::file_not_found(shown));
    }

    let content = fs::read_to_string(path).map_err(|e| OptionsError::read_error(&shown, e))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase());

    tracing::debug!(path = %shown, format = ?extension, "loading options");

    match extension.as_deref() {
        Some("toml") => {
            parse_options_toml(&content).map_err(|e| OptionsError::toml_error(shown, e))
        }
        Some("yaml") | Some("yml") => {
            parse_options_yaml(&content).map_err(|e| OptionsError::yaml_error(shown, e))
        }
        Some("json") => {
            parse_options_json(&content).map_err(|e| OptionsError::json_error(shown, e))
        }
        _ => parse_options_json(&content)
            .ok()
            .or_else(|| parse_options_yaml(&content).ok())
            .or_else(|| parse_options_toml(&content).ok())
            .ok_or_else(|| OptionsError::unknown_format(shown)),
    }
}

pub fn parse_options_json(content: &str) -> Result<ConfigOptions, serde_json::Error> {
    serde_json::from_str(content)
}

pub fn parse_options_yaml(content: &str) -> Result<ConfigOptions, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

pub fn parse_options_toml(content: &str) -> Result<ConfigOptions, toml::de::Error> {
    toml::from_str(content)
}
