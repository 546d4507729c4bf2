//! The configuration tree: an arena of lines plus the structural options
//! used to build it.

use crate::line::{ConfigLine, LineId};
use crate::options::{ConfigOptions, Dialect};
use crate::output::{dumps, RenderMode};
use crate::parser::parse;
use std::fmt;
use std::ops::Index;

/// A parsed configuration.
///
/// Lines are stored in first-seen order, which is also the iteration order
/// used for rendering and diffing. Lines added later are appended at the end.
#[derive(Debug, Clone, Default)]
pub struct NetworkConfig {
    lines: Vec<ConfigLine>,
    options: ConfigOptions,
}

impl NetworkConfig {
    /// Creates an empty configuration. An indent of 0 is treated as 1.
    pub fn new(options: ConfigOptions) -> Self {
        let options = ConfigOptions {
            indent: options.indent.max(1),
            ..options
        };
        Self {
            lines: Vec::new(),
            options,
        }
    }

    /// Parses `contents` with the given options.
    pub fn parse(contents: &str, options: ConfigOptions) -> Self {
        let mut config = Self::new(options);
        config.load(contents);
        config
    }

    /// Parses `contents` with default options and the given indent width.
    pub fn from_text(contents: &str, indent: usize) -> Self {
        Self::parse(contents, ConfigOptions::default().indent(indent))
    }

    /// Replaces every line with the result of parsing `contents`.
    pub fn load(&mut self, contents: &str) {
        self.lines = parse(
            contents,
            self.options.indent,
            &self.options.comment_tokens,
        );
    }

    /// All lines in iteration order.
    pub fn items(&self) -> &[ConfigLine] {
        &self.lines
    }

    pub fn ids(&self) -> Vec<LineId> {
        self.lines.iter().map(|l| l.id).collect()
    }

    pub fn get(&self, id: LineId) -> Option<&ConfigLine> {
        self.lines.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn indent(&self) -> usize {
        self.options.indent
    }

    pub fn dialect(&self) -> Dialect {
        self.options.dialect
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// Resolves ids to lines, skipping ids that do not belong to this tree.
    pub fn lines(&self, ids: &[LineId]) -> Vec<&ConfigLine> {
        ids.iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Renders the given lines in the requested mode.
    pub fn render(&self, ids: &[LineId], mode: RenderMode) -> String {
        dumps(self.lines(ids), mode)
    }

    /// Appends a new line whose parents are `parents`, without attaching it
    /// to any parent's children.
    pub(crate) fn push(&mut self, text: &str, raw: String, parents: Vec<LineId>) -> LineId {
        let id = LineId(self.lines.len());
        let mut line = ConfigLine::new(id, text, raw);
        line.ancestry = parents.iter().map(|p| self[*p].text.clone()).collect();
        line.parents = parents;
        self.lines.push(line);
        id
    }

    pub(crate) fn attach(&mut self, parent: LineId, child: LineId) {
        self.lines[parent.0].children.push(child);
    }

    pub(crate) fn line_mut(&mut self, id: LineId) -> &mut ConfigLine {
        &mut self.lines[id.0]
    }

    /// Brings the cached ancestry of every descendant of `changed` in line
    /// with its current text.
    pub(crate) fn refresh_ancestry(&mut self, changed: LineId) {
        let text = self.lines[changed.0].text.clone();
        for line in &mut self.lines {
            if let Some(pos) = line.parents.iter().position(|p| *p == changed) {
                line.ancestry[pos] = text.clone();
            }
        }
    }
}

impl Index<LineId> for NetworkConfig {
    type Output = ConfigLine;

    fn index(&self, id: LineId) -> &ConfigLine {
        &self.lines[id.0]
    }
}

/// Renders every line with its ancestors: as indented blocks for the generic
/// dialect, as fully qualified lines for the path-addressed one.
impl fmt::Display for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expanded = self.expand_with_ancestors(&self.ids());
        let mode = match self.options.dialect {
            Dialect::Generic => RenderMode::Block,
            Dialect::PathAddressed => RenderMode::Lines,
        };
        f.write_str(&self.render(&expanded, mode))
    }
}
