//! NETCFG command-line interface.
//!
//! This is the main entry point for the netcfg CLI tool. It uses clap for
//! argument parsing, reads configuration files from disk and wires them
//! through the library to diff, render, slice and search them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use netcfg::{
    format_lines, load_options, ConfigOptions, Dialect, MatchPolicy, NetworkConfig, OutputFormat,
    OutputOptions, RenderMode, ReplacePolicy, SearchResult,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::Level;

/// NETCFG - Hierarchical diff tool for network device configuration
///
/// Parses indentation-structured configuration (IOS, EOS, NX-OS style blocks
/// or brace-delimited JunOS style) and compares, renders or searches it.
#[derive(Parser)]
#[command(name = "netcfg")]
#[command(version)]
#[command(about = "Hierarchical diff tool for network device configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Columns per nesting level
    #[arg(short, long, global = true)]
    indent: Option<usize>,

    /// Configuration dialect
    #[arg(short, long, value_enum, global = true)]
    dialect: Option<DialectArg>,

    /// Comment prefix (repeatable, replaces the defaults)
    #[arg(long = "comment", value_name = "TOKEN", global = true)]
    comment_tokens: Vec<String>,

    /// Options file (TOML, YAML or JSON)
    #[arg(long, value_name = "FILE", global = true)]
    options: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal", global = true)]
    format: OutputFormatArg,

    /// How lines are rendered
    #[arg(short, long, value_enum, default_value = "block", global = true)]
    mode: RenderModeArg,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress summary)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show the lines of CANDIDATE that are missing from RUNNING
    Diff {
        /// Desired configuration
        #[arg(value_name = "CANDIDATE")]
        candidate: PathBuf,

        /// Current configuration
        #[arg(value_name = "RUNNING")]
        running: PathBuf,

        /// How lines are matched
        #[arg(long = "match", value_enum, default_value = "line")]
        match_policy: MatchArg,

        /// How differing lines are expanded
        #[arg(long, value_enum, default_value = "line")]
        replace: ReplaceArg,
    },

    /// Re-render a configuration file
    Show {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the section at PATH
    Section {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Statements from the top level down to the section
        #[arg(value_name = "PATH", required = true)]
        path: Vec<String>,
    },

    /// Search for a pattern anchored at line starts
    Search {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Only search the children of this path
        #[arg(long, value_name = "STATEMENT", num_args = 1..)]
        scope: Vec<String>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum RenderModeArg {
    /// Original lines with indentation
    Block,
    /// Bare statements
    Commands,
    /// Statements prefixed by their parents
    Lines,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum DialectArg {
    Generic,
    PathAddressed,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum MatchArg {
    Line,
    Strict,
    Exact,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ReplaceArg {
    Line,
    Block,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

impl From<RenderModeArg> for RenderMode {
    fn from(arg: RenderModeArg) -> Self {
        match arg {
            RenderModeArg::Block => RenderMode::Block,
            RenderModeArg::Commands => RenderMode::Commands,
            RenderModeArg::Lines => RenderMode::Lines,
        }
    }
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Generic => Dialect::Generic,
            DialectArg::PathAddressed => Dialect::PathAddressed,
        }
    }
}

impl From<MatchArg> for MatchPolicy {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Line => MatchPolicy::Line,
            MatchArg::Strict => MatchPolicy::Strict,
            MatchArg::Exact => MatchPolicy::Exact,
        }
    }
}

impl From<ReplaceArg> for ReplacePolicy {
    fn from(arg: ReplaceArg) -> Self {
        match arg {
            ReplaceArg::Line => ReplacePolicy::Line,
            ReplaceArg::Block => ReplacePolicy::Block,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let options = resolve_options(&cli)?;
    let output_format: OutputFormat = cli.format.into();
    let output_options = OutputOptions {
        mode: cli.mode.into(),
        summary: !cli.quiet,
    };

    match &cli.command {
        Command::Diff {
            candidate,
            running,
            match_policy,
            replace,
        } => {
            let candidate = read_config(candidate, &options)?;
            let running = read_config(running, &options)?;

            let updates =
                candidate.difference(&running, (*match_policy).into(), (*replace).into());

            let output = format_lines(&candidate, &updates, &output_format, &output_options)
                .context("Failed to format diff output")?;
            println!("{}", output);

            Ok(if updates.is_empty() { 0 } else { 1 })
        }
        Command::Show { file } => {
            let config = read_config(file, &options)?;
            let output = format_lines(&config, &config.ids(), &output_format, &output_options)
                .context("Failed to format configuration")?;
            println!("{}", output);
            Ok(0)
        }
        Command::Section { file, path } => {
            let config = read_config(file, &options)?;
            let path: Vec<&str> = path.iter().map(String::as_str).collect();
            let section = config.section(&path)?;
            let output = format_lines(&config, &section, &output_format, &output_options)
                .context("Failed to format section")?;
            println!("{}", output);
            Ok(0)
        }
        Command::Search {
            file,
            pattern,
            scope,
        } => {
            let config = read_config(file, &options)?;
            let scope: Vec<&str> = scope.iter().map(String::as_str).collect();

            let Some(result) = config.search(pattern, &scope)? else {
                if !cli.quiet {
                    eprintln!("No match.");
                }
                return Ok(1);
            };

            if output_format == OutputFormat::Json {
                let json = serde_json::to_string_pretty(&result)
                    .context("Failed to serialize search result")?;
                println!("{}", json);
            } else {
                println!("{}", format_search_result(&result));
            }
            Ok(0)
        }
    }
}

/// Merges the options file (if any) with command-line overrides.
fn resolve_options(cli: &Cli) -> Result<ConfigOptions> {
    let mut options = match &cli.options {
        Some(path) => load_options(path)
            .with_context(|| format!("Failed to load options: {}", path.display()))?,
        None => ConfigOptions::default(),
    };

    if let Some(indent) = cli.indent {
        options.indent = indent;
    }
    if let Some(dialect) = cli.dialect {
        options.dialect = dialect.into();
    }
    if !cli.comment_tokens.is_empty() {
        options.comment_tokens = cli.comment_tokens.clone();
    }

    tracing::debug!(?options, "resolved options");
    Ok(options)
}

fn read_config(path: &Path, options: &ConfigOptions) -> Result<NetworkConfig> {
    tracing::debug!(path = %path.display(), "parsing configuration");
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration: {}", path.display()))?;
    Ok(NetworkConfig::parse(&contents, options.clone()))
}

fn format_search_result(result: &SearchResult) -> String {
    match result {
        SearchResult::Match(text) => text.clone(),
        SearchResult::Groups { unnamed, named } => {
            let mut lines: Vec<String> = unnamed.clone();
            for (name, value) in named {
                lines.push(format!("{}={}", name, value.as_deref().unwrap_or("")));
            }
            lines.join("\n")
        }
    }
}
