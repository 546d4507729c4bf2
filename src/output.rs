//! Rendering of configuration lines and formatting of results.
//!
//! [`dumps`] turns a sequence of lines back into configuration text in one
//! of three modes. [`format_lines`] wraps a rendering for presentation
//! (terminal with colors, JSON, plain text).
//!
//! # Examples
//!
//! ```
//! use netcfg::{dumps, NetworkConfig, RenderMode};
//!
//! let config = NetworkConfig::from_text("interface Ethernet1\n  shutdown", 2);
//!
//! assert_eq!(dumps(config.items(), RenderMode::Block), "interface Ethernet1\n  shutdown");
//! assert_eq!(dumps(config.items(), RenderMode::Commands), "interface Ethernet1\nshutdown");
//! assert_eq!(dumps(config.items(), RenderMode::Lines), "interface Ethernet1\ninterface Ethernet1 shutdown");
//! ```

use crate::error::{ConfigError, OutputError};
use crate::line::{ConfigLine, LineId};
use crate::tree::NetworkConfig;
use colored::*;
use serde::Serialize;
use std::borrow::Cow;
use std::str::FromStr;

/// How a line is turned back into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// The raw line, original indentation and punctuation included
    #[default]
    Block,
    /// The bare statement text
    Commands,
    /// Ancestor texts and the statement joined by spaces
    Lines,
}

impl FromStr for RenderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(RenderMode::Block),
            "commands" => Ok(RenderMode::Commands),
            "lines" => Ok(RenderMode::Lines),
            other => Err(ConfigError::invalid_argument(format!(
                "unknown render mode: {}",
                other
            ))),
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the lines
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Render mode used for the text formats
    pub mode: RenderMode,
    /// Append a summary line after the rendering
    pub summary: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Block,
            summary: true,
        }
    }
}

/// Renders lines as text, one line per entry, joined by newlines.
///
/// No deduplication is performed; expand the lines first (for example with
/// [`NetworkConfig::expand_with_ancestors`]) to get parent-inclusive output.
pub fn dumps<'a, I>(lines: I, mode: RenderMode) -> String
where
    I: IntoIterator<Item = &'a ConfigLine>,
{
    lines
        .into_iter()
        .map(|line| render_line(line, mode))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(line: &ConfigLine, mode: RenderMode) -> Cow<'_, str> {
    match mode {
        RenderMode::Block => Cow::Borrowed(line.raw()),
        RenderMode::Commands => Cow::Borrowed(line.text()),
        RenderMode::Lines => Cow::Owned(line.path().join(" ")),
    }
}

/// Formats a set of lines from `config` according to the format and options.
///
/// # Arguments
///
/// * `config` - The configuration the ids belong to
/// * `ids` - The lines to show, in display order
/// * `format` - The output format (Terminal, JSON, or Plain)
/// * `options` - Formatting options
///
/// # Returns
///
/// Returns the formatted string on success, or an OutputError on failure.
///
/// # Examples
///
/// ```
/// use netcfg::{format_lines, NetworkConfig, OutputFormat, OutputOptions};
///
/// let config = NetworkConfig::from_text("hostname r1", 1);
/// let output = format_lines(&config, &config.ids(), &OutputFormat::Plain, &OutputOptions::default()).unwrap();
/// assert_eq!(output, "hostname r1\n\nSummary: 1 line");
/// ```
pub fn format_lines(
    config: &NetworkConfig,
    ids: &[LineId],
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    let lines = config.lines(ids);
    match format {
        OutputFormat::Terminal => Ok(format_terminal(&lines, options)),
        OutputFormat::Json => format_json(&lines),
        OutputFormat::Plain => Ok(format_plain(&lines, options)),
    }
}

/// Formats lines for terminal output, each rendered line in green.
fn format_terminal(lines: &[&ConfigLine], options: &OutputOptions) -> String {
    if lines.is_empty() {
        return "No changes detected.".dimmed().to_string();
    }

    let mut output = String::new();
    for line in lines {
        output.push_str(&render_line(line, options.mode).green().to_string());
        output.push('\n');
    }

    if options.summary {
        output.push('\n');
        output.push_str(&format_summary(lines.len()).bold().to_string());
    }

    output
}

fn format_plain(lines: &[&ConfigLine], options: &OutputOptions) -> String {
    if lines.is_empty() {
        return "No changes detected.".to_string();
    }

    let mut output = dumps(lines.iter().copied(), options.mode);

    if options.summary {
        output.push_str("\n\n");
        output.push_str(&format_summary(lines.len()));
    }

    output
}

#[derive(Serialize)]
struct LineView<'a> {
    text: &'a str,
    parents: &'a [String],
    raw: &'a str,
}

#[derive(Serialize)]
struct LinesView<'a> {
    lines: Vec<LineView<'a>>,
    count: usize,
}

/// Formats lines as JSON: `{"lines": [{text, parents, raw}], "count": n}`.
fn format_json(lines: &[&ConfigLine]) -> Result<String, OutputError> {
    let view = LinesView {
        lines: lines
            .iter()
            .map(|line| LineView {
                text: line.text(),
                parents: line.ancestry(),
                raw: line.raw(),
            })
            .collect(),
        count: lines.len(),
    };

    serde_json::to_string_pretty(&view)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn format_summary(count: usize) -> String {
    if count == 1 {
        "Summary: 1 line".to_string()
    } else {
        format!("Summary: {} lines", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NetworkConfig {
        NetworkConfig::from_text("system {\n    host-name r1;\n}", 4)
    }

    #[test]
    fn test_render_mode_from_str() {
        assert_eq!("lines".parse::<RenderMode>().unwrap(), RenderMode::Lines);
        assert!("set".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_render_line_modes() {
        let config = sample();
        let host = &config.items()[1];
        assert_eq!(render_line(host, RenderMode::Block), "    host-name r1;");
        assert_eq!(render_line(host, RenderMode::Commands), "host-name r1");
        assert_eq!(render_line(host, RenderMode::Lines), "system host-name r1");
    }

    #[test]
    fn test_dumps_does_not_dedupe() {
        let config = sample();
        let host = &config.items()[1];
        assert_eq!(
            dumps([host, host], RenderMode::Commands),
            "host-name r1\nhost-name r1"
        );
    }

    #[test]
    fn test_format_summary() {
        assert_eq!(format_summary(1), "Summary: 1 line");
        assert_eq!(format_summary(4), "Summary: 4 lines");
    }

    #[test]
    fn test_format_plain_empty() {
        let output = format_plain(&[], &OutputOptions::default());
        assert_eq!(output, "No changes detected.");
    }

    #[test]
    fn test_format_plain_without_summary() {
        let config = sample();
        let lines: Vec<&ConfigLine> = config.items().iter().collect();
        let options = OutputOptions {
            mode: RenderMode::Lines,
            summary: false,
        };
        assert_eq!(format_plain(&lines, &options), "system\nsystem host-name r1");
    }

    #[test]
    fn test_format_json() {
        let config = sample();
        let lines: Vec<&ConfigLine> = config.items().iter().collect();
        let output = format_json(&lines).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["lines"][1]["text"], "host-name r1");
        assert_eq!(value["lines"][1]["parents"][0], "system");
        assert_eq!(value["lines"][0]["raw"], "system {");
    }

    #[test]
    fn test_format_terminal_contains_lines() {
        let config = sample();
        let lines: Vec<&ConfigLine> = config.items().iter().collect();
        let output = format_terminal(&lines, &OutputOptions::default());
        assert!(output.contains("host-name r1"));
        assert!(output.contains("Summary: 2 lines"));
    }
}
