//! ALMA parent/child lookup CLI.

use clap::{ColorChoice, Parser};
use alma_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_classify, run_lookup, run_session, run_stats};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = cli.table.session_config();
    let result = match &cli.command {
        Command::Lookup(args) => run_lookup(config, args),
        Command::Session => run_session(config),
        Command::Classify(args) => run_classify(config, args),
        Command::Stats => run_stats(config),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Logging setup from the CLI flags. `--log-level` and `-v`/`-q` both
/// disable `RUST_LOG`; file output gets timestamps and no colors.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let to_file = cli.log_file.is_some();
    let mut config = LogConfig::default()
        .with_level(level)
        .with_format(format)
        .with_timestamps(to_file)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = cli.log_level.is_none() && !cli.verbosity.is_present();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => !to_file && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_log_file_gets_timestamps() {
        let cli = Cli::parse_from(["alma", "stats", "--log-file", "alma.log", "-v"]);
        let config = log_config_from_cli(&cli);
        assert_eq!(config.log_file, Some(PathBuf::from("alma.log")));
        assert!(config.with_timestamps);
        assert_eq!(config.level_filter, LevelFilter::INFO);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_log_level_overrides_verbosity() {
        let cli = Cli::parse_from(["alma", "stats", "--log-level", "trace", "-q"]);
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::TRACE);
        assert!(config.log_file.is_none());
        assert!(!config.with_timestamps);
    }

    #[test]
    fn test_defaults_defer_to_rust_log() {
        let cli = Cli::parse_from(["alma", "stats", "--log-format", "json"]);
        let config = log_config_from_cli(&cli);
        assert!(config.use_env_filter);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert_eq!(config.format, LogFormat::Json);
    }
}
