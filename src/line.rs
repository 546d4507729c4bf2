//! The line model: one configuration statement and its place in the hierarchy.
//!
//! Lines never own each other. Every line lives in the arena of a
//! [`NetworkConfig`](crate::NetworkConfig) and refers to its parents and
//! children through [`LineId`] indices into that arena.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Index of a line inside the arena of the configuration that produced it.
///
/// Ids are only meaningful for the configuration they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub(crate) usize);

impl LineId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the line in its configuration's iteration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single configuration statement.
///
/// Identity is `text` plus the texts of every ancestor. The raw line and the
/// children do not take part in comparisons, so two lines from different
/// configurations compare equal when they sit at the same hierarchical path.
#[derive(Debug, Clone)]
pub struct ConfigLine {
    pub(crate) id: LineId,
    pub(crate) text: String,
    pub(crate) raw: String,
    pub(crate) parents: Vec<LineId>,
    pub(crate) children: Vec<LineId>,
    /// Texts of `parents`, root-most first. Kept aligned with `parents`.
    pub(crate) ancestry: Vec<String>,
}

impl ConfigLine {
    pub(crate) fn new(id: LineId, text: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            raw: raw.into(),
            parents: Vec::new(),
            children: Vec::new(),
            ancestry: Vec::new(),
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    /// The statement with `{`, `}` and `;` removed and whitespace trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line exactly as it appeared in the input, indentation included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Ancestors from the top-level statement down to the immediate parent.
    pub fn parents(&self) -> &[LineId] {
        &self.parents
    }

    pub fn children(&self) -> &[LineId] {
        &self.children
    }

    /// Texts of the ancestors, aligned with [`ConfigLine::parents`].
    pub fn ancestry(&self) -> &[String] {
        &self.ancestry
    }

    pub fn is_top_level(&self) -> bool {
        self.parents.is_empty()
    }

    /// The full hierarchical path of this line: ancestor texts, then its own text.
    pub fn path(&self) -> Vec<&str> {
        self.ancestry
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.text.as_str()))
            .collect()
    }

    /// The line in fully qualified `set` form, independent of indentation.
    ///
    /// ```
    /// use netcfg::NetworkConfig;
    ///
    /// let config = NetworkConfig::from_text("interfaces {\n    ge-0/0/0 {\n        disable;\n", 4);
    /// let disable = &config.items()[2];
    /// assert_eq!(disable.qualified_line(), "set interfaces ge-0/0/0 disable");
    /// ```
    pub fn qualified_line(&self) -> String {
        let mut words = vec!["set"];
        words.extend(self.path());
        words.join(" ")
    }
}

impl PartialEq for ConfigLine {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.ancestry == other.ancestry
    }
}

impl Eq for ConfigLine {}

impl Hash for ConfigLine {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.ancestry.hash(state);
    }
}

impl fmt::Display for ConfigLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
