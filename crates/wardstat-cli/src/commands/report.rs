//! Report command - run the full pipeline and print the results.

use std::path::{Path, PathBuf};

use colored::Colorize;
use wardstat::{ChartRenderer, DatasetPaths, Hospital, Report, TableKind};

use super::{load_config, print_table};
use crate::labels::Locale;
use crate::render::TerminalRenderer;

/// Conventional file names under `data_dir`, with per-table overrides in
/// pipeline order.
pub fn dataset_paths(data_dir: &Path, overrides: [Option<PathBuf>; 4]) -> DatasetPaths {
    let mut paths = DatasetPaths::in_dir(data_dir);
    for (kind, path) in TableKind::ALL.into_iter().zip(overrides) {
        if let Some(path) = path {
            paths.set(kind, path);
        }
    }
    paths
}

pub fn run(
    paths: DatasetPaths,
    config: Option<PathBuf>,
    locale: Locale,
    json_output: bool,
    no_charts: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let hospital = Hospital::with_config(config);

    let report = hospital.report(&paths)?;

    if json_output {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let mut renderer = if no_charts {
        None
    } else {
        Some(TerminalRenderer::new(hospital.config().chart.clone()))
    };
    print_report(&report, locale, renderer.as_mut())
}

/// Print each analyzer's section followed by its chart.
fn print_report(
    report: &Report,
    locale: Locale,
    mut renderer: Option<&mut TerminalRenderer>,
) -> Result<(), Box<dyn std::error::Error>> {
    let labels = locale.labels();
    let charts = report.charts();
    let mut show = |i: usize| -> Result<(), Box<dyn std::error::Error>> {
        if let Some(r) = renderer.as_deref_mut() {
            println!();
            r.render(charts[i])?;
        }
        Ok(())
    };

    heading(labels.diagnosis_counts);
    for (diagnosis, count) in &report.patients.diagnosis_counts {
        println!("  {:<24} {}", diagnosis, count);
    }
    show(0)?;

    heading(labels.mean_length_of_stay);
    for (diagnosis, stay) in &report.patients.mean_length_of_stay {
        match stay {
            Some(days) => println!("  {:<24} {:.2}", diagnosis, days),
            None => println!("  {:<24} -", diagnosis),
        }
    }

    heading(labels.workload);
    for (department, attended) in &report.staff.workload {
        println!("  {:<24} {}", department, attended);
    }
    show(1)?;

    heading(labels.needs_improvement);
    print_table(&report.operations.needs_improvement);
    show(2)?;

    heading(labels.low_profit);
    print_table(&report.finance.low_profit);
    show(3)?;

    heading(labels.recommendations);
    for rec in &report.recommendations {
        println!("{}", locale.recommendation(rec));
    }

    Ok(())
}

fn heading(text: &str) {
    println!();
    println!("{}", text.yellow().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_single_tables() {
        let paths = dataset_paths(
            Path::new("data"),
            [None, Some(PathBuf::from("elsewhere/people.csv")), None, None],
        );
        assert_eq!(paths.patients, PathBuf::from("data/Patients.csv"));
        assert_eq!(paths.staff, PathBuf::from("elsewhere/people.csv"));
        assert_eq!(paths.finance, PathBuf::from("data/Finance.csv"));
    }
}
