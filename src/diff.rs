//! Structural diff between two configurations.
//!
//! Every comparison returns lines of the candidate (`self`) configuration,
//! in its iteration order. Lines are compared by identity: their text plus
//! the texts of all their ancestors.
//!
//! # Examples
//!
//! ```
//! use netcfg::{MatchPolicy, NetworkConfig, RenderMode, ReplacePolicy};
//!
//! let running = NetworkConfig::from_text("interface Ethernet1\n  shutdown", 2);
//! let candidate = NetworkConfig::from_text("interface Ethernet1\n  no shutdown", 2);
//!
//! let updates = candidate.difference(&running, MatchPolicy::Line, ReplacePolicy::Line);
//! assert_eq!(
//!     candidate.render(&updates, RenderMode::Block),
//!     "interface Ethernet1\n  no shutdown"
//! );
//! ```

use crate::error::ConfigError;
use crate::line::{ConfigLine, LineId};
use crate::options::Dialect;
use crate::tree::NetworkConfig;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How lines of the two configurations are matched against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// A line differs if no equal line exists anywhere in the other config
    #[default]
    Line,
    /// A line differs if the other config has no equal line at the same position
    Strict,
    /// Any difference at all makes the whole config the diff
    Exact,
}

/// How the raw set of differing lines is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacePolicy {
    /// Each differing line, preceded by its ancestors
    #[default]
    Line,
    /// The full blocks the differing lines belong to
    Block,
}

impl FromStr for MatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(MatchPolicy::Line),
            "strict" => Ok(MatchPolicy::Strict),
            "exact" => Ok(MatchPolicy::Exact),
            other => Err(ConfigError::invalid_argument(format!(
                "invalid value for match: {}",
                other
            ))),
        }
    }
}

impl FromStr for ReplacePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ReplacePolicy::Line),
            "block" => Ok(ReplacePolicy::Block),
            other => Err(ConfigError::invalid_argument(format!(
                "invalid value for replace: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchPolicy::Line => "line",
            MatchPolicy::Strict => "strict",
            MatchPolicy::Exact => "exact",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ReplacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplacePolicy::Line => "line",
            ReplacePolicy::Block => "block",
        };
        f.write_str(name)
    }
}

impl NetworkConfig {
    /// Lines of `self` that have no equal line anywhere in `other`.
    ///
    /// Membership is order-insensitive; the result keeps `self`'s order.
    pub fn diff_line(&self, other: &NetworkConfig) -> Vec<LineId> {
        let theirs: HashSet<&ConfigLine> = other.items().iter().collect();
        self.items()
            .iter()
            .filter(|line| !theirs.contains(line))
            .map(|line| line.id())
            .collect()
    }

    /// Lines of `self` whose counterpart at the same position in `other` is
    /// missing or different.
    ///
    /// This is a positional comparison, not an alignment: a single insertion
    /// shifts every following line and reports all of them.
    pub fn diff_strict(&self, other: &NetworkConfig) -> Vec<LineId> {
        self.items()
            .iter()
            .enumerate()
            .filter(|(index, line)| other.items().get(*index) != Some(*line))
            .map(|(_, line)| line.id())
            .collect()
    }

    /// Either nothing (both configs are equal line for line) or every line of
    /// `self`.
    pub fn diff_exact(&self, other: &NetworkConfig) -> Vec<LineId> {
        let equal = self.len() == other.len()
            && self
                .items()
                .iter()
                .zip(other.items())
                .all(|(ours, theirs)| ours == theirs);

        if equal {
            Vec::new()
        } else {
            self.ids()
        }
    }

    /// Computes the lines of `self` that must be applied to reach it from `other`.
    ///
    /// # Arguments
    ///
    /// * `other` - The configuration to compare against (e.g. the running config)
    /// * `match_policy` - How lines are matched between the two
    /// * `replace_policy` - How differing lines are expanded
    ///
    /// # Returns
    ///
    /// For the path-addressed dialect the raw differing lines. Otherwise, with
    /// `ReplacePolicy::Line`, each differing line preceded by its ancestors;
    /// with `ReplacePolicy::Block`, the full blocks of every ancestor referenced
    /// by a differing line (top-level lines count as their own block).
    pub fn difference(
        &self,
        other: &NetworkConfig,
        match_policy: MatchPolicy,
        replace_policy: ReplacePolicy,
    ) -> Vec<LineId> {
        let updates = match match_policy {
            MatchPolicy::Line => self.diff_line(other),
            MatchPolicy::Strict => self.diff_strict(other),
            MatchPolicy::Exact => self.diff_exact(other),
        };

        tracing::debug!(
            policy = %match_policy,
            replace = %replace_policy,
            updates = updates.len(),
            "computed configuration diff"
        );

        if self.dialect() == Dialect::PathAddressed {
            return updates;
        }

        match replace_policy {
            ReplacePolicy::Line => self.expand_with_ancestors(&updates),
            ReplacePolicy::Block => {
                let mut seen = HashSet::new();
                let mut roots = Vec::new();
                for id in &updates {
                    let Some(line) = self.get(*id) else {
                        continue;
                    };
                    if line.is_top_level() {
                        if seen.insert(*id) {
                            roots.push(*id);
                        }
                    } else {
                        for parent in line.parents() {
                            if seen.insert(*parent) {
                                roots.push(*parent);
                            }
                        }
                    }
                }
                self.expand_block(&roots)
            }
        }
    }

    /// Same as [`NetworkConfig::difference`] with policies given by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` for an unknown policy name.
    pub fn difference_by_name(
        &self,
        other: &NetworkConfig,
        match_policy: &str,
        replace_policy: &str,
    ) -> Result<Vec<LineId>, ConfigError> {
        Ok(self.difference(other, match_policy.parse()?, replace_policy.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<MatchPolicy>().unwrap(), MatchPolicy::Strict);
        assert_eq!("block".parse::<ReplacePolicy>().unwrap(), ReplacePolicy::Block);
        assert!(matches!(
            "fuzzy".parse::<MatchPolicy>(),
            Err(ConfigError::InvalidArgument { .. })
        ));
        assert!("tree".parse::<ReplacePolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in [MatchPolicy::Line, MatchPolicy::Strict, MatchPolicy::Exact] {
            assert_eq!(policy.to_string().parse::<MatchPolicy>().unwrap(), policy);
        }
        for policy in [ReplacePolicy::Line, ReplacePolicy::Block] {
            assert_eq!(policy.to_string().parse::<ReplacePolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_identical_configs_have_no_diff() {
        let text = "hostname r1\ninterface Ethernet1\n shutdown";
        let a = NetworkConfig::from_text(text, 1);
        let b = NetworkConfig::from_text(text, 1);
        assert!(a.diff_line(&b).is_empty());
        assert!(a.diff_strict(&b).is_empty());
        assert!(a.diff_exact(&b).is_empty());
    }

    #[test]
    fn test_equality_ignores_indentation_style() {
        let a = NetworkConfig::from_text("system {\n    host-name r1;\n}", 4);
        let b = NetworkConfig::from_text("system\n  host-name r1", 2);
        assert!(a.diff_line(&b).is_empty());
    }
}
