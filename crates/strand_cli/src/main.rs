//! Strand CLI: reports over placed-and-routed FPGA checkpoints.
//!
//! Provides `strand summary` for cell and net counts, `strand report` for the
//! per-cell report of block RAMs (or any configured cell types), `strand trace`
//! for the physical route of a single net, and `strand mappings` for the bels
//! each library cell can be placed on.

#![warn(missing_docs)]

mod load;
mod mappings;
mod report;
mod summary;
mod trace;

use std::process;

use clap::{Parser, Subcommand};

/// Strand: placed-and-routed design reports.
#[derive(Parser, Debug)]
#[command(name = "strand", version, about = "Strand FPGA design reports")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `strand.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print cell and net counts.
    Summary(SummaryArgs),
    /// Print the summary followed by the report of selected cells.
    Report(ReportArgs),
    /// Print the physical route of one net.
    Trace(TraceArgs),
    /// List which bels the library cells can be placed on.
    Mappings(MappingsArgs),
}

/// Arguments for the `strand summary` subcommand.
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Checkpoint file (`.json` or `.json.gz`).
    pub checkpoint: String,
}

/// Arguments for the `strand report` subcommand.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Checkpoint file (`.json` or `.json.gz`).
    pub checkpoint: String,

    /// Cell type prefixes to report (replaces `report.cell_types`).
    #[arg(long = "cell-type")]
    pub cell_types: Vec<String>,

    /// Do not print cell pin to bel pin mappings.
    #[arg(long)]
    pub no_pin_mappings: bool,

    /// Do not print the routes of connected nets.
    #[arg(long)]
    pub no_routes: bool,
}

/// Arguments for the `strand trace` subcommand.
#[derive(Parser, Debug)]
pub struct TraceArgs {
    /// Checkpoint file (`.json` or `.json.gz`).
    pub checkpoint: String,

    /// Name of the net to trace.
    pub net: String,
}

/// Arguments for the `strand mappings` subcommand.
#[derive(Parser, Debug)]
pub struct MappingsArgs {
    /// Checkpoint file (`.json` or `.json.gz`).
    pub checkpoint: String,

    /// Maximum number of library cells to list (overrides `mappings.limit`).
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Summary(ref args) => summary::run(args, &global),
        Command::Report(ref args) => report::run(args, &global),
        Command::Trace(ref args) => trace::run(args, &global),
        Command::Mappings(ref args) => mappings::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Routes library log records to stderr; `RUST_LOG` still overrides.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_summary() {
        let cli = Cli::parse_from(["strand", "summary", "top.json.gz"]);
        match cli.command {
            Command::Summary(ref args) => assert_eq!(args.checkpoint, "top.json.gz"),
            _ => panic!("expected Summary command"),
        }
    }

    #[test]
    fn parse_report_default() {
        let cli = Cli::parse_from(["strand", "report", "top.json"]);
        match cli.command {
            Command::Report(ref args) => {
                assert_eq!(args.checkpoint, "top.json");
                assert!(args.cell_types.is_empty());
                assert!(!args.no_pin_mappings);
                assert!(!args.no_routes);
            }
            _ => panic!("expected Report command"),
        }
    }

    #[test]
    fn parse_report_with_args() {
        let cli = Cli::parse_from([
            "strand",
            "report",
            "top.json",
            "--cell-type",
            "RAMB36",
            "--cell-type",
            "DSP48",
            "--no-pin-mappings",
            "--no-routes",
        ]);
        match cli.command {
            Command::Report(ref args) => {
                assert_eq!(args.cell_types, vec!["RAMB36", "DSP48"]);
                assert!(args.no_pin_mappings);
                assert!(args.no_routes);
            }
            _ => panic!("expected Report command"),
        }
    }

    #[test]
    fn parse_trace() {
        let cli = Cli::parse_from(["strand", "trace", "top.json", "addr[0]"]);
        match cli.command {
            Command::Trace(ref args) => {
                assert_eq!(args.checkpoint, "top.json");
                assert_eq!(args.net, "addr[0]");
            }
            _ => panic!("expected Trace command"),
        }
    }

    #[test]
    fn parse_trace_requires_net() {
        assert!(Cli::try_parse_from(["strand", "trace", "top.json"]).is_err());
    }

    #[test]
    fn parse_mappings_limit() {
        let cli = Cli::parse_from(["strand", "mappings", "top.json", "--limit", "5"]);
        match cli.command {
            Command::Mappings(ref args) => assert_eq!(args.limit, Some(5)),
            _ => panic!("expected Mappings command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["strand", "--quiet", "summary", "top.json"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["strand", "summary", "top.json", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["strand", "--config", "/path/to/strand.toml", "summary", "a.json"]);
        assert_eq!(cli.config.as_deref(), Some("/path/to/strand.toml"));
    }
}
