//! In-place edits: adding statements and replacing statement text.
//!
//! Raw text of every inserted or edited line is rebuilt with spaces so that
//! rendering the configuration as blocks keeps a consistent hierarchy.

use crate::error::ConfigError;
use crate::line::LineId;
use crate::tree::NetworkConfig;
use regex::{Regex, RegexBuilder};

/// Options for [`NetworkConfig::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOptions {
    /// Add the replacement under the parent path when nothing matches
    pub add_if_missing: bool,
    /// Match patterns against the stripped text instead of the raw line
    pub ignore_whitespace: bool,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            add_if_missing: false,
            ignore_whitespace: true,
        }
    }
}

impl NetworkConfig {
    /// Adds statements as siblings under `parents`.
    ///
    /// With an empty `parents` path each statement is appended as a top-level
    /// line unless an equal line already exists. Otherwise every missing
    /// element of the path is created (indented by its depth), and each
    /// statement not already present as a child of the last element is
    /// appended under it.
    ///
    /// Returns the ids of the lines that were created, in creation order.
    /// Adding the same statements twice creates nothing the second time.
    ///
    /// ```
    /// use netcfg::{NetworkConfig, RenderMode};
    ///
    /// let mut config = NetworkConfig::from_text("interface Ethernet1\n  shutdown", 2);
    /// config.add(&["shutdown"], &["interface Ethernet3"]);
    ///
    /// assert_eq!(
    ///     config.render(&config.ids(), RenderMode::Block),
    ///     "interface Ethernet1\n  shutdown\ninterface Ethernet3\n  shutdown"
    /// );
    /// ```
    pub fn add(&mut self, lines: &[&str], parents: &[&str]) -> Vec<LineId> {
        let mut created = Vec::new();

        if parents.is_empty() {
            for line in lines {
                let exists = self
                    .items()
                    .iter()
                    .any(|item| item.is_top_level() && item.text() == *line);
                if !exists {
                    created.push(self.push(line, line.to_string(), Vec::new()));
                }
            }
            return created;
        }

        let indent = self.indent();
        let mut ancestors: Vec<LineId> = Vec::new();

        for (index, parent) in parents.iter().enumerate() {
            let id = match self.find(&parents[..=index]) {
                Some(id) => id,
                None => {
                    let raw = indented(parent, index * indent);
                    let id = self.push(parent, raw, ancestors.clone());
                    if let Some(last) = ancestors.last() {
                        self.attach(*last, id);
                    }
                    created.push(id);
                    id
                }
            };
            ancestors.push(id);
        }

        let Some(&owner) = ancestors.last() else {
            return created;
        };

        for line in lines {
            let exists = self[owner]
                .children()
                .iter()
                .any(|child| self[*child].text() == *line);
            if exists {
                continue;
            }
            let raw = indented(line, parents.len() * indent);
            let id = self.push(line, raw, ancestors.clone());
            self.attach(owner, id);
            created.push(id);
        }

        tracing::debug!(
            parents = ?parents,
            created = created.len(),
            "added configuration lines"
        );

        created
    }

    /// Replaces the text of the first line matching any of `patterns`.
    ///
    /// Patterns are case-insensitive regular expressions searched anywhere in
    /// the line's text (or in its raw line when `ignore_whitespace` is false).
    /// Only lines whose ancestors are exactly `parents` and whose text is not
    /// already `replacement` are candidates. The matched line keeps its
    /// indentation; lines below it follow the new text.
    ///
    /// When nothing matches and `add_if_missing` is set, `replacement` is
    /// added under `parents` instead.
    ///
    /// Returns `true` if the configuration changed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if a pattern does not compile.
    pub fn replace(
        &mut self,
        patterns: &[&str],
        replacement: &str,
        parents: &[&str],
        options: ReplaceOptions,
    ) -> Result<bool, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ConfigError::invalid_pattern(*p, e))
            })
            .collect::<Result<Vec<Regex>, _>>()?;

        let matched = self.items().iter().find(|item| {
            let haystack = if options.ignore_whitespace {
                item.text()
            } else {
                item.raw()
            };
            item.text() != replacement
                && item.ancestry() == parents
                && patterns.iter().any(|re| re.is_match(haystack))
        });

        match matched.map(|item| item.id()) {
            Some(id) => {
                let line = self.line_mut(id);
                let width = line.raw.chars().take_while(|c| c.is_whitespace()).count();
                line.text = replacement.to_string();
                line.raw = indented(replacement, width);
                self.refresh_ancestry(id);
                tracing::debug!(line = id.index(), replacement, "replaced configuration line");
                Ok(true)
            }
            None if options.add_if_missing => Ok(!self.add(&[replacement], parents).is_empty()),
            None => Ok(false),
        }
    }
}

fn indented(text: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width), text)
}
