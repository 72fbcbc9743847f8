//! CLI command definitions

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// What `list` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListTarget {
    Scenarios,
    Tools,
}

/// CLI arguments for rtcli
#[derive(Parser, Debug)]
#[command(name = "rtcli")]
#[command(author, version, about = "Red Team CLI Orchestrator")]
#[command(long_about = r#"
Red Team CLI Orchestrator launches the security tools listed in the tool
catalog, either one at a time or as scenarios: ordered phases that are all
attempted even when an earlier one fails.

Every invocation is logged to <log-dir>/<tool>_<YYYYmmdd_HHMMSS>.log while
its output is also printed to the console.

Files:
  ./tool_db.json                  Tool catalog (required)
  ~/.redteam-cli-config.json      Saved scenarios and settings

Examples:
  rtcli list
  rtcli scenario run penetration-test --target 192.168.1.1
  rtcli tool run nmap -target 10.0.0.5
  rtcli scenario add-phase recon nmap -- -sV -p 1-1024 {target}
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Target host/IP for operations, substituted for {target}
    #[arg(long, global = true, value_name = "HOST", default_value = "")]
    pub target: String,

    /// Metasploit module name, substituted for {module}
    #[arg(long, global = true, value_name = "MODULE", default_value = "")]
    pub module: String,

    /// Path to the tool catalog
    #[arg(long, global = true, value_name = "PATH")]
    pub tool_db: Option<PathBuf>,

    /// Path to the user configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for per-invocation log files
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Kill a tool that runs longer than this (0 = no limit)
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List available scenarios and tools
    List {
        #[arg(value_enum)]
        what: Option<ListTarget>,
    },
    /// Run, check or edit scenarios
    Scenario {
        #[command(subcommand)]
        action: Option<ScenarioAction>,
    },
    /// Run a single tool with its catalog arguments
    Tool {
        #[command(subcommand)]
        action: Option<ToolAction>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ScenarioAction {
    /// Run every phase of a scenario in order
    Run { name: String },
    /// Report which phases' tools are missing, without running anything
    Check { name: String },
    /// Create an empty scenario
    Create { name: String },
    /// Append a phase; arguments after `--` form its template
    AddPhase {
        scenario: String,
        tool: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ToolAction {
    /// Run a tool
    Run { name: String },
}

/// How the binary should react to a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// `--help` / `--version`: let clap print it and exit successfully
    Display,
    /// Unknown or incomplete command: print usage and exit successfully
    ShowUsage,
    /// A required argument is missing or a flag value is invalid
    Fatal,
}

/// Classify a clap error kind.
pub fn classify_parse_error(kind: ErrorKind) -> ParseFailure {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ParseFailure::Display,
        ErrorKind::MissingRequiredArgument | ErrorKind::ValueValidation => ParseFailure::Fatal,
        _ => ParseFailure::ShowUsage,
    }
}

const LEGACY_FLAGS: [&str; 2] = ["target", "module"];

/// Rewrite the single-dash `-target`/`-module` spellings to their long form.
///
/// Everything after a bare `--` is left alone so phase templates can contain
/// those strings.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if after_separator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                after_separator = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_legacy_flag(rest) => {
                    OsString::from(format!("--{}", rest))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_legacy_flag(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    LEGACY_FLAGS.contains(&name)
}
