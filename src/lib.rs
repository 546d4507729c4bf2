//! NETCFG - Hierarchical parser and differ for network device configuration.
//!
//! This library turns indentation-structured configuration text (as printed
//! by network device command-line interfaces) into a tree of statements,
//! and provides rendering, path lookup, structural diffing and in-place
//! editing on top of that tree.
//!
//! # Example
//!
//! ```
//! use netcfg::{MatchPolicy, NetworkConfig, RenderMode, ReplacePolicy};
//!
//! let running = NetworkConfig::from_text(
//!     "interface Ethernet1\n  description foo\n  ip address 1.2.3.4/24",
//!     2,
//! );
//!
//! let mut candidate = running.clone();
//! candidate.add(&["shutdown"], &["interface Ethernet1"]);
//!
//! let updates = candidate.difference(&running, MatchPolicy::Line, ReplacePolicy::Line);
//! assert_eq!(
//!     candidate.render(&updates, RenderMode::Block),
//!     "interface Ethernet1\n  shutdown"
//! );
//! ```

pub mod diff;
pub mod error;
pub mod line;
pub mod mutate;
pub mod navigate;
pub mod options;
pub mod output;
pub mod parser;
pub mod tree;

// Re-export commonly used types for convenience
pub use diff::{MatchPolicy, ReplacePolicy};
pub use error::{ConfigError, NetcfgError, OptionsError, OutputError};
pub use line::{ConfigLine, LineId};
pub use mutate::ReplaceOptions;
pub use navigate::{FoundMatch, SearchResult};
pub use options::{load_options, ConfigOptions, Dialect};
pub use output::{dumps, format_lines, OutputFormat, OutputOptions, RenderMode};
pub use parser::{ignore_line, parse};
pub use tree::NetworkConfig;
