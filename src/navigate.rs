//! Path lookup, tree expansion and regex search over a configuration.
//!
//! Paths are slices of statement texts from the top-level statement down to
//! the target, e.g. `["interface Ethernet1", "description foo"]`.
//!
//! # Examples
//!
//! ```
//! use netcfg::NetworkConfig;
//!
//! let config = NetworkConfig::from_text(
//!     "interface Ethernet1\n  description foo\n  ip address 1.2.3.4/24\ninterface Ethernet2\n  shutdown",
//!     2,
//! );
//!
//! let id = config.find(&["interface Ethernet1", "description foo"]).unwrap();
//! assert_eq!(config[id].ancestry(), ["interface Ethernet1"]);
//!
//! let section = config.section(&["interface Ethernet1"]).unwrap();
//! assert_eq!(section.len(), 3);
//! ```

use crate::error::ConfigError;
use crate::line::LineId;
use crate::output::RenderMode;
use crate::tree::NetworkConfig;
use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Result of a successful [`NetworkConfig::search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    /// The pattern has no capture groups: the whole matched text.
    Match(String),
    /// The pattern has capture groups.
    Groups {
        /// Distinct values of the groups that are not also a named group's value
        unnamed: Vec<String>,
        /// Named groups and their values (`None` when the group did not participate)
        named: BTreeMap<String, Option<String>>,
    },
}

/// One item returned by [`NetworkConfig::find_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FoundMatch {
    /// Whole match (no groups) or the text of the single group.
    Text(String),
    /// The texts of every group, when the pattern has more than one.
    Groups(Vec<String>),
}

impl NetworkConfig {
    /// Finds the first line at `path`, in iteration order.
    ///
    /// Returns `None` when nothing matches or the path is empty.
    pub fn find(&self, path: &[&str]) -> Option<LineId> {
        let (last, prefix) = path.split_last()?;
        self.items()
            .iter()
            .find(|line| line.text() == *last && line.ancestry() == prefix)
            .map(|line| line.id())
    }

    /// Returns the line at `path` followed by its whole subtree, depth-first.
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidArgument` - the path is empty
    /// * `ConfigError::NotFound` - nothing exists at the path
    pub fn section(&self, path: &[&str]) -> Result<Vec<LineId>, ConfigError> {
        if path.is_empty() {
            return Err(ConfigError::invalid_argument("section path must not be empty"));
        }
        let id = self.find(path).ok_or_else(|| ConfigError::not_found(path))?;

        let mut section = Vec::new();
        let mut visited = HashSet::new();
        self.expand_section(id, &mut section, &mut visited);
        Ok(section)
    }

    fn expand_section(&self, id: LineId, out: &mut Vec<LineId>, visited: &mut HashSet<LineId>) {
        let Some(line) = self.get(id) else {
            return;
        };
        if !visited.insert(id) {
            return;
        }
        out.push(id);
        for child in line.children() {
            self.expand_section(*child, out, visited);
        }
    }

    /// Puts each line's ancestors in front of it.
    ///
    /// Every line appears at most once. Ancestors are emitted root first the
    /// first time any descendant needs them; input order decides the rest.
    /// Ids that do not belong to this configuration are skipped.
    pub fn expand_with_ancestors(&self, ids: &[LineId]) -> Vec<LineId> {
        let mut visited = HashSet::new();
        let mut expanded = Vec::new();

        for id in ids {
            let Some(line) = self.get(*id) else {
                continue;
            };
            for parent in line.parents() {
                if visited.insert(*parent) {
                    expanded.push(*parent);
                }
            }
            if visited.insert(*id) {
                expanded.push(*id);
            }
        }

        expanded
    }

    /// Returns each line followed by its full subtree, visiting every line once.
    ///
    /// Ids that do not belong to this configuration are skipped.
    pub fn expand_block(&self, ids: &[LineId]) -> Vec<LineId> {
        let mut visited = HashSet::new();
        let mut expanded = Vec::new();
        for id in ids {
            self.expand_section(*id, &mut expanded, &mut visited);
        }
        expanded
    }

    /// Searches for `pattern` anchored at the start of a line.
    ///
    /// With a non-empty `scope`, only the texts of the direct children of the
    /// line at that path are searched; a missing or childless scope yields
    /// `None`. Otherwise the full rendering of the configuration is searched.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if the pattern does not compile.
    pub fn search(
        &self,
        pattern: &str,
        scope: &[&str],
    ) -> Result<Option<SearchResult>, ConfigError> {
        let regex = RegexBuilder::new(&format!("^(?:{})", pattern))
            .multi_line(true)
            .build()
            .map_err(|e| ConfigError::invalid_pattern(pattern, e))?;

        let data = if scope.is_empty() {
            self.to_string()
        } else {
            let parent = match self.find(scope) {
                Some(id) if !self[id].children().is_empty() => id,
                _ => return Ok(None),
            };
            self.render(self[parent].children(), RenderMode::Commands)
        };

        Ok(regex
            .captures(&data)
            .map(|caps| search_result(&regex, &caps)))
    }

    /// Returns every non-overlapping match of `pattern` in the full rendering.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if the pattern does not compile.
    pub fn find_all(&self, pattern: &str) -> Result<Vec<FoundMatch>, ConfigError> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::invalid_pattern(pattern, e))?;
        let data = self.to_string();

        let found = match regex.captures_len() {
            1 => regex
                .find_iter(&data)
                .map(|m| FoundMatch::Text(m.as_str().to_string()))
                .collect(),
            2 => regex
                .captures_iter(&data)
                .map(|caps| FoundMatch::Text(group_text(&caps, 1)))
                .collect(),
            n => regex
                .captures_iter(&data)
                .map(|caps| FoundMatch::Groups((1..n).map(|i| group_text(&caps, i)).collect()))
                .collect(),
        };

        Ok(found)
    }
}

fn group_text(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn search_result(regex: &Regex, caps: &Captures<'_>) -> SearchResult {
    if regex.captures_len() == 1 {
        return SearchResult::Match(caps[0].to_string());
    }

    let named: BTreeMap<String, Option<String>> = regex
        .capture_names()
        .flatten()
        .map(|name| (name.to_string(), caps.name(name).map(|m| m.as_str().to_string())))
        .collect();
    let named_values: HashSet<&str> = named.values().flatten().map(String::as_str).collect();

    let mut unnamed: Vec<String> = Vec::new();
    for value in caps.iter().skip(1).flatten().map(|m| m.as_str()) {
        if !named_values.contains(value) && !unnamed.iter().any(|u| u == value) {
            unnamed.push(value.to_string());
        }
    }

    SearchResult::Groups { unnamed, named }
}
