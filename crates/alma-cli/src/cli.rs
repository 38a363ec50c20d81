//! CLI argument definitions for the ALMA lookup.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use alma_ingest::{DEFAULT_CHILD_COLUMN, DEFAULT_PARENT_COLUMN, TableOptions};
use alma_model::IdPolicy;
use alma_cli::session::{DEFAULT_TABLE_PATH, ListSpec, SessionConfig};

#[derive(Parser)]
#[command(
    name = "alma",
    version,
    about = "ALMA parent/child lookup",
    long_about = "Look up the parents and children of ALMA catalog records.\n\n\
                  Reads a CSV/TSV export of the CHILD/PARENT relationship table, where\n\
                  PARENT may hold several IDs joined by '|||'."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub table: TableArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Where the relationship data comes from and how it is read.
#[derive(Args)]
pub struct TableArgs {
    /// Relationship table (CSV, or TSV by extension).
    #[arg(
        short = 't',
        long = "table",
        value_name = "PATH",
        default_value = DEFAULT_TABLE_PATH,
        global = true
    )]
    pub table: PathBuf,

    /// Name of the child ID column.
    #[arg(long = "child-column", default_value = DEFAULT_CHILD_COLUMN, global = true)]
    pub child_column: String,

    /// Name of the parent IDs column.
    #[arg(long = "parent-column", default_value = DEFAULT_PARENT_COLUMN, global = true)]
    pub parent_column: String,

    /// Field delimiter: a single character, or "tab".
    #[arg(long = "delimiter", value_parser = parse_delimiter, global = true)]
    pub delimiter: Option<u8>,

    /// Strip spreadsheet artifacts from IDs (leading apostrophe, inner
    /// spaces, directional marks) in the table and in queries.
    #[arg(long = "clean-ids", global = true)]
    pub clean_ids: bool,

    /// ID list for membership checks, as NAME=PATH (repeatable).
    #[arg(long = "list", value_name = "NAME=PATH", global = true)]
    pub lists: Vec<ListSpec>,
}

impl TableArgs {
    pub fn session_config(&self) -> SessionConfig {
        let policy = if self.clean_ids {
            IdPolicy::Clean
        } else {
            IdPolicy::Exact
        };
        SessionConfig {
            table_path: self.table.clone(),
            table: TableOptions::default()
                .with_columns(self.child_column.clone(), self.parent_column.clone())
                .with_delimiter(self.delimiter)
                .with_id_policy(policy),
            lists: self.lists.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Look up the parents and children of one or more ALMA IDs.
    Lookup(LookupArgs),

    /// Interactive session: read ALMA IDs from stdin, one per line.
    Session,

    /// Classify a file of ALMA IDs by hierarchy role and list membership.
    Classify(ClassifyArgs),

    /// Show load diagnostics for the relationship table.
    Stats,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// ALMA IDs to look up.
    #[arg(value_name = "ALMA_ID", required = true)]
    pub ids: Vec<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Write <ID>_parents.txt and <ID>_children.txt into this directory.
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Text file with one ALMA ID per line ('#' starts a comment).
    #[arg(value_name = "IDS_FILE")]
    pub input: PathBuf,

    /// Take every run of 8+ digits on a line as an ID instead of the whole line.
    #[arg(long = "digits")]
    pub digits: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Write one .txt file per group into this directory.
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
    Plain,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Ok(b'\t');
    }
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be a single ASCII character or 'tab', got '{value}'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter("||").is_err());
    }

    #[test]
    fn test_global_table_args() {
        let cli = Cli::parse_from([
            "alma",
            "lookup",
            "1001",
            "--table",
            "rel.tsv",
            "--clean-ids",
            "--list",
            "GENIZA=g.list",
        ]);
        let config = cli.table.session_config();
        assert_eq!(config.table_path, PathBuf::from("rel.tsv"));
        assert_eq!(config.table.id_policy, IdPolicy::Clean);
        assert_eq!(config.table.child_column, "CHILD");
        assert_eq!(config.lists.len(), 1);
        assert_eq!(config.lists[0].name, "GENIZA");
    }
}
