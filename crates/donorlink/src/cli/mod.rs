//! Command-line interface for donorlink.
//!
//! This module provides the CLI structure for the `donorlink` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    ConfigCommand, KindArg, OutputFormat, RegisterCommand, SearchCommand, StatusCommand,
};

/// donorlink - Register organ donors and find matching donors
///
/// Living donors and families of deceased donors register through a
/// step-by-step form. Searches match donors by organ, blood type and
/// location, and plot them on a map.
#[derive(Debug, Parser)]
#[command(name = "donorlink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

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
    /// Search for donors offering an organ
    Search(SearchCommand),

    /// Register a living or deceased donor
    Register(RegisterCommand),

    /// Show every detail of one donor
    Show {
        /// Donor identity, as printed by search
        id: String,
    },

    /// Show store location and donor counts
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
