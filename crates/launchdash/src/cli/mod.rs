//! Command-line interface for launchdash.
//!
//! This module provides the CLI structure and command handlers for the
//! `launchdash` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, OutputFormat, PieCommand, ScatterCommand, ServeCommand, SitesCommand,
    SummaryCommand,
};

/// launchdash - Explore historical launch outcomes
///
/// Serves an interactive dashboard with a success pie chart and a
/// payload-versus-outcome scatter plot, or prints the same charts from the
/// command line.
#[derive(Debug, Parser)]
#[command(name = "launchdash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the launch data CSV (overrides configuration)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the dashboard over HTTP
    Serve(ServeCommand),

    /// List the launch sites offered in the dropdown
    Sites(SitesCommand),

    /// Show statistics about the launch data
    Summary(SummaryCommand),

    /// Print the success pie chart
    Pie(PieCommand),

    /// Print the payload versus outcome scatter chart
    Scatter(ScatterCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
