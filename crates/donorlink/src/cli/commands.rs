//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::record::{BloodType, RecordKind};
use crate::search::SearchCriteria;

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Organ or tissue the donor must offer (e.g. "kidney")
    #[arg(short, long)]
    pub organ: String,

    /// Only donors of this blood type (e.g. "O-")
    #[arg(short, long)]
    pub blood_type: Option<BloodType>,

    /// Only donors whose "city, state, country" contains this text
    #[arg(short, long)]
    pub location: Option<String>,

    /// Search radius in kilometres
    #[arg(short, long, value_name = "KM")]
    pub radius: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl SearchCommand {
    /// Search criteria described by the arguments.
    #[must_use]
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            organ: self.organ.clone(),
            blood_type: self.blood_type,
            location: self.location.clone(),
            radius_km: self.radius,
        }
    }
}

/// Register command arguments.
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Kind of donor to register
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Form field as name=value; repeat a name for several checked boxes
    #[arg(short = 'F', long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// JSON object of form fields, applied before --field values
    #[arg(long, value_name = "FILE")]
    pub form: Option<PathBuf>,

    /// Start from the values saved by an earlier unfinished registration
    #[arg(long)]
    pub resume: bool,

    /// Output the saved identity as JSON
    #[arg(short, long)]
    pub json: bool,
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

/// Donor kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// A living donor
    Living,
    /// A deceased donor, registered by next of kin
    Deceased,
}

impl From<KindArg> for RecordKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Living => Self::Living,
            KindArg::Deceased => Self::Deceased,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

fn parse_field(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{arg}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_arg_conversion() {
        assert_eq!(RecordKind::from(KindArg::Living), RecordKind::Living);
        assert_eq!(RecordKind::from(KindArg::Deceased), RecordKind::Deceased);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("donorName=Jane Doe"),
            Ok(("donorName".to_string(), "Jane Doe".to_string()))
        );
        assert_eq!(
            parse_field("coordinates=40.1, -73.2"),
            Ok(("coordinates".to_string(), "40.1, -73.2".to_string()))
        );
        assert_eq!(parse_field("district="), Ok(("district".to_string(), String::new())));
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_search_command_criteria() {
        let cmd = SearchCommand {
            organ: "kidney".to_string(),
            blood_type: Some(BloodType::ONegative),
            location: Some("texas".to_string()),
            radius: Some(50),
            format: OutputFormat::Table,
        };
        let criteria = cmd.criteria();
        assert_eq!(criteria.organ, "kidney");
        assert_eq!(criteria.blood_type, Some(BloodType::ONegative));
        assert_eq!(criteria.location.as_deref(), Some("texas"));
        assert_eq!(criteria.radius_km, Some(50));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
