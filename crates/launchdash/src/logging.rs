//! Logging configuration for launchdash.
//!
//! This module provides initialization and configuration for the tracing-based
//! logging system used throughout launchdash, including the HTTP request
//! spans emitted by `tower-http`.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above).
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// The default filter directive for this verbosity.
    #[must_use]
    pub fn default_filter(&self) -> String {
        let level = self.to_level_filter();
        format!("launchdash={level},tower_http={level}")
    }
}

/// Initialize the logging system.
///
/// This should be called once at application startup. The logging level can be
/// controlled via:
/// 1. The `verbosity` parameter
/// 2. The `RUST_LOG` environment variable (takes precedence)
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// # Examples
///
/// ```no_run
/// use launchdash::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    // Ignore the error if a subscriber is already installed
    let _ = subscriber.try_init();
}

/// Initialize logging for tests.
///
/// Only warnings and errors are shown by default to keep test output clean.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
