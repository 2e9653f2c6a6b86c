//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wardstat::TableKind;

use crate::labels::Locale;

/// wardstat: descriptive statistics and recommendations for hospital data
#[derive(Parser)]
#[command(name = "wardstat")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load, clean and analyze all four tables and print the report
    Report {
        /// Directory holding Patients.csv, Staff.csv, Operations.csv and Finance.csv
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,

        /// Patient table (overrides the data directory)
        #[arg(long)]
        patients: Option<PathBuf>,

        /// Staff table (overrides the data directory)
        #[arg(long)]
        staff: Option<PathBuf>,

        /// Operations table (overrides the data directory)
        #[arg(long)]
        operations: Option<PathBuf>,

        /// Finance table (overrides the data directory)
        #[arg(long)]
        finance: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Language for headings and recommendations
        #[arg(short, long, default_value = "en")]
        locale: Locale,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },

    /// Load and clean a single table and show what cleaning did
    Inspect {
        /// Table to inspect (patients, staff, operations, finance)
        #[arg(value_name = "TABLE")]
        table: TableKind,

        /// Directory holding the table under its conventional name
        #[arg(short, long, default_value = ".", conflicts_with = "file")]
        data_dir: PathBuf,

        /// Explicit path to the table
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// List every changed cell and removed row
        #[arg(long)]
        audit: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_report_overrides() {
        let cli = Cli::parse_from([
            "wardstat",
            "report",
            "--data-dir",
            "data",
            "--finance",
            "other/Money.csv",
            "--locale",
            "ar",
            "--no-charts",
        ]);
        match cli.command {
            Commands::Report {
                data_dir,
                finance,
                patients,
                locale,
                no_charts,
                json,
                ..
            } => {
                assert_eq!(data_dir, PathBuf::from("data"));
                assert_eq!(finance, Some(PathBuf::from("other/Money.csv")));
                assert_eq!(patients, None);
                assert_eq!(locale, Locale::Ar);
                assert!(no_charts);
                assert!(!json);
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_inspect_parses_table_kind() {
        let cli = Cli::parse_from(["wardstat", "-v", "inspect", "ops", "--audit"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Inspect { table, audit, .. } => {
                assert_eq!(table, TableKind::Operations);
                assert!(audit);
            }
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn test_unknown_table_rejected() {
        assert!(Cli::try_parse_from(["wardstat", "inspect", "wards"]).is_err());
    }
}
