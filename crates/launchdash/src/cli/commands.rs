//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::record::{PayloadRange, SiteSelection, ALL_SITES};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Host to bind to (overrides configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Sites command arguments.
#[derive(Debug, Args)]
pub struct SitesCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Pie chart command arguments.
#[derive(Debug, Args)]
pub struct PieCommand {
    /// Launch site, or ALL for every site
    #[arg(short, long, default_value = ALL_SITES)]
    pub site: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Scatter chart command arguments.
#[derive(Debug, Args)]
pub struct ScatterCommand {
    /// Launch site, or ALL for every site
    #[arg(short, long, default_value = ALL_SITES)]
    pub site: String,

    /// Lower payload bound in kg (defaults to the lightest payload)
    #[arg(long, allow_negative_numbers = true)]
    pub low: Option<f64>,

    /// Upper payload bound in kg (defaults to the heaviest payload)
    #[arg(long, allow_negative_numbers = true)]
    pub high: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for chart commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Chart specification as JSON
    Json,
    /// Plotly figure as JSON
    Plotly,
}

impl PieCommand {
    /// The selected site.
    #[must_use]
    pub fn selection(&self) -> SiteSelection {
        SiteSelection::parse(&self.site)
    }
}

impl ScatterCommand {
    /// The selected site.
    #[must_use]
    pub fn selection(&self) -> SiteSelection {
        SiteSelection::parse(&self.site)
    }

    /// The payload range, filling unset bounds from `fallback`.
    #[must_use]
    pub fn range(&self, fallback: PayloadRange) -> PayloadRange {
        PayloadRange::new(
            self.low.unwrap_or(fallback.low),
            self.high.unwrap_or(fallback.high),
        )
    }
}
