//! Logging configuration for donorlink.
//!
//! Diagnostics go through `tracing` and are written to stderr, leaving
//! stdout to search results, details and JSON output.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much diagnostic output to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Lifecycle messages: loads, seeding, saves, degraded mode.
    #[default]
    Normal,
    /// Adds per-step and per-search detail.
    Verbose,
    /// Everything, including per-field validation.
    Trace,
}

impl Verbosity {
    /// Verbosity for a `-q` flag and a count of `-v` flags; quiet wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// Most detailed level shown.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    #[must_use]
    pub fn directive(self) -> String {
        format!("donorlink={}", self.level())
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides `verbosity` when set. At [`Verbosity::Normal`] and
/// below, lines omit the module target.
///
/// # Examples
///
/// ```no_run
/// use donorlink::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    let show_target = verbosity.level() >= Level::DEBUG;

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(show_target),
    );

    // Already installed: keep the first one
    let _ = subscriber.try_init();
}

/// Install a warn-level subscriber that writes through the test harness.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(2, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(7, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
    }

    #[test]
    fn test_level_ordering() {
        assert_eq!(Verbosity::Quiet.level(), Level::ERROR);
        assert_eq!(Verbosity::default().level(), Level::INFO);
        assert!(Verbosity::Trace.level() > Verbosity::Verbose.level());
    }

    #[test]
    fn test_directive() {
        assert_eq!(Verbosity::Verbose.directive(), "donorlink=DEBUG");
    }

    #[test]
    fn test_init_logging_twice() {
        init_test_logging();
        init_logging(Verbosity::Trace);
        init_logging(Verbosity::Quiet);
    }
}
