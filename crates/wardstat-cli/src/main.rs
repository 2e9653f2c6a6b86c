//! wardstat CLI - hospital data report.

mod cli;
mod commands;
mod labels;
mod render;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Report {
            data_dir,
            patients,
            staff,
            operations,
            finance,
            config,
            locale,
            json,
            no_charts,
        } => {
            let paths = commands::report::dataset_paths(
                &data_dir,
                [patients, staff, operations, finance],
            );
            commands::report::run(paths, config, locale, json, no_charts)
        }

        Commands::Inspect {
            table,
            data_dir,
            file,
            config,
            audit,
        } => {
            let path = file.unwrap_or_else(|| data_dir.join(table.default_file_name()));
            commands::inspect::run(table, path, config, audit, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
