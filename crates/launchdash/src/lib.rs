//! `launchdash` - An interactive dashboard for historical launch outcomes
//!
//! This library loads launch records from a CSV file into an immutable table
//! and derives chart specifications from it: a pie chart of successes per
//! site (or of outcomes at one site) and a scatter plot of payload mass
//! against outcome. The `server` module exposes both over HTTP.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod record;
pub mod server;
pub mod table;

pub use aggregate::{payload_outcome_scatter, site_outcome_pie};
pub use chart::{ChartSpec, PieChart, PieSlice, ScatterChart, ScatterPoint, ScatterSeries};
pub use config::Config;
pub use error::{Error, Result};
pub use layout::DashboardLayout;
pub use logging::init_logging;
pub use record::{LaunchRecord, Outcome, PayloadRange, SiteSelection, ALL_SITES};
pub use server::DashboardServer;
pub use table::{LaunchTable, TableSummary};
