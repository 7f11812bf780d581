//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for gdbexport using clap.
//! Options use the single-dash form: `-c=<path>`, `-t=<names>`, `-d`, `-m`,
//! `-f=<path>`, and `-h`, `-?` or `-help`.

pub mod commands;

use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Usage example appended to argument errors
pub const USAGE_EXAMPLE: &str = "usage example: gdbexport -c=db.toml -t=T.TAB1,T.TAB2";

/// gdbexport - export geodatabase feature classes to an XML workspace document
#[derive(Parser, Debug)]
#[command(name = "gdbexport")]
#[command(version, about, long_about = None)]
#[command(author = "gdbexport Contributors")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Source connection descriptor file (db.toml)
    #[arg(short = 'c', value_name = "PATH")]
    pub connection: Option<String>,

    /// Feature class names, comma separated (T.TAB1,T.TAB2)
    #[arg(short = 't', value_name = "NAMES")]
    pub tables: Option<String>,

    /// Export data, not only schema
    #[arg(short = 'd')]
    pub data: bool,

    /// Export metadata
    #[arg(short = 'm')]
    pub metadata: bool,

    /// Output file name (gdbexp.xml by default)
    #[arg(short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Path to configuration file (gdbexport.toml if present)
    #[arg(long, env = "GDBEXPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity: trace, debug, info, warn, error, off, or 0-5
    #[arg(short = 'v', long, env = "GDBEXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Show usage help
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::SetTrue)]
    pub help: bool,
}

impl Cli {
    /// Parse the process arguments
    ///
    /// # Errors
    ///
    /// Returns clap's error for unknown options or missing option values.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse_from(normalize_args(std::env::args_os()))
    }

    /// Whether usage must be shown instead of running an export
    pub fn wants_usage(&self) -> bool {
        self.help || is_blank(&self.connection) || is_blank(&self.tables)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Rewrite `-help` to `--help`
///
/// clap reads a single-dash word as a cluster of short flags.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if arg == "-help" {
                OsString::from("--help")
            } else {
                arg
            }
        })
        .collect()
}

/// Rendered option descriptions
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}
