//! Example: Run the hospital report over a data directory.
//!
//! Usage:
//!   cargo run --example report -- <data_dir>
//!
//! The directory must hold Patients.csv, Staff.csv, Operations.csv and
//! Finance.csv.

use std::env;
use std::path::Path;

use wardstat::{DatasetPaths, Hospital, RecordingRenderer, Recommendation};

fn main() -> wardstat::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example report -- <data_dir>");
        std::process::exit(1);
    }

    let dir = Path::new(&args[1]);
    if !dir.is_dir() {
        eprintln!("Error: Directory not found: {}", dir.display());
        std::process::exit(1);
    }

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Hospital report: {}", dir.display());
    println!("{}", separator);
    println!();

    let mut charts = RecordingRenderer::default();
    let report = Hospital::new().report_with(&DatasetPaths::in_dir(dir), &mut charts)?;

    println!("## Sources");
    for source in &report.sources {
        println!("  {:16} {:>6} rows  {}", source.file, source.row_count, source.hash);
    }
    println!();

    println!("## Cleaning");
    for cleaning in &report.cleaning {
        println!(
            "  {:12} kept {}/{} rows, filled {}, coerced {}",
            cleaning.table.to_string(),
            cleaning.rows_kept,
            cleaning.rows_loaded,
            cleaning.values_filled,
            cleaning.values_coerced_to_missing
        );
    }
    println!();

    println!("## Diagnoses");
    for (diagnosis, count) in &report.patients.diagnosis_counts {
        println!("  {:20} {}", diagnosis, count);
    }
    println!();

    println!("## Workload");
    for (department, attended) in &report.staff.workload {
        println!("  {:20} {}", department, attended);
    }
    println!();

    println!("## Recommendations");
    for rec in &report.recommendations {
        match rec {
            Recommendation::IncreaseStaffing { department } => {
                println!("  - more staff for {}", department.as_deref().unwrap_or("(none)"))
            }
            Recommendation::ImproveOperations { types } => {
                println!("  - improve operations: {}", types.join(", "))
            }
            Recommendation::ReviewLowProfit { departments } => {
                println!("  - review profits: {}", departments.join(", "))
            }
            Recommendation::MonitorLengthOfStay => println!("  - monitor length of stay"),
        }
    }
    println!();

    println!("{} charts collected", charts.charts.len());
    println!("{}", separator);

    Ok(())
}
