//! Parsing of indentation-structured configuration text.
//!
//! Each kept physical line becomes one [`ConfigLine`]. Nesting is derived
//! from the column of the first non-blank character, measured in units of
//! the indent width. Structural punctuation (`{`, `}`, `;`) is dropped from
//! the statement text, so brace-style and indent-only dialects parse the
//! same way.
//!
//! # Examples
//!
//! ```
//! use netcfg::parser::parse;
//!
//! let text = "interface Ethernet1\n  description uplink\n  shutdown";
//! let lines = parse(text, 2, &["!"]);
//!
//! assert_eq!(lines.len(), 3);
//! assert_eq!(lines[0].children().len(), 2);
//! assert_eq!(lines[2].ancestry(), ["interface Ethernet1"]);
//! ```

use crate::line::{ConfigLine, LineId};
use crate::options::DEFAULT_COMMENT_TOKENS;

/// Parses configuration text into lines linked by indentation.
///
/// The returned lines are in input order and each line's [`LineId`] is its
/// index in the returned vector.
///
/// # Arguments
///
/// * `contents` - The configuration text
/// * `indent` - Columns per nesting level (0 is treated as 1)
/// * `comment_tokens` - Prefixes marking comment lines; the defaults (`#`, `!`)
///   are used when empty
///
/// # Returns
///
/// Returns every kept line. Blank lines, lines made only of punctuation and
/// comment lines are skipped.
///
/// A line indented more than one level deeper than the currently open
/// block is kept with the whole open block as its parents, but it is not
/// attached as a child and never becomes a parent itself.
pub fn parse<S: AsRef<str>>(contents: &str, indent: usize, comment_tokens: &[S]) -> Vec<ConfigLine> {
    let indent = indent.max(1);
    let mut lines: Vec<ConfigLine> = Vec::new();
    let mut ancestors: Vec<LineId> = Vec::new();

    for raw in contents.split('\n') {
        let text = strip_punctuation(raw);

        if text.is_empty() || ignore_line(&text, comment_tokens) {
            continue;
        }

        let id = LineId(lines.len());
        let mut line = ConfigLine::new(id, text, raw);
        let level = leading_whitespace(raw) / indent;

        if level == 0 {
            ancestors.clear();
            ancestors.push(id);
        } else {
            let depth = level.min(ancestors.len());
            line.parents = ancestors[..depth].to_vec();
            line.ancestry = line
                .parents
                .iter()
                .map(|p| lines[p.0].text.clone())
                .collect();

            if level > ancestors.len() {
                tracing::trace!(
                    line = id.0,
                    level,
                    open = ancestors.len(),
                    "indentation skips a level, keeping line unattached"
                );
            } else {
                ancestors.truncate(level);
                lines[ancestors[level - 1].0].children.push(id);
                ancestors.push(id);
            }
        }

        lines.push(line);
    }

    tracing::debug!(lines = lines.len(), indent, "parsed configuration");

    lines
}

/// Returns true if `text` starts with one of the comment tokens.
///
/// An empty token list means the default tokens (`#`, `!`).
pub fn ignore_line<S: AsRef<str>>(text: &str, tokens: &[S]) -> bool {
    if tokens.is_empty() {
        DEFAULT_COMMENT_TOKENS.iter().any(|t| text.starts_with(t))
    } else {
        tokens.iter().any(|t| text.starts_with(t.as_ref()))
    }
}

/// Removes structural punctuation anywhere in the line and trims it.
fn strip_punctuation(line: &str) -> String {
    line.chars()
        .filter(|c| !matches!(c, '{' | '}' | ';'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Column of the first non-whitespace character.
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
