//! CLI command implementations.

pub mod inspect;
pub mod report;

use std::path::PathBuf;

use wardstat::ReportConfig;

/// Configuration from `--config`, or the defaults.
pub(crate) fn load_config(path: Option<PathBuf>) -> Result<ReportConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            log::debug!("reading configuration from {}", path.display());
            Ok(ReportConfig::from_file(&path)?)
        }
        None => Ok(ReportConfig::default()),
    }
}

/// Print a table with its headers, missing cells shown as `-`.
pub(crate) fn print_table(table: &wardstat::DataTable) {
    if table.row_count() == 0 {
        println!("  (empty)");
        return;
    }

    let widths: Vec<usize> = (0..table.column_count())
        .map(|c| {
            table
                .column_values(c)
                .map(|v| cell(v).chars().count())
                .chain(std::iter::once(table.headers[c].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = w))
        .collect();
    println!("  {}", header.join("  "));

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", cell(v), w = w))
            .collect();
        println!("  {}", cells.join("  ").trim_end());
    }
}

fn cell(value: &wardstat::Value) -> String {
    if value.is_missing() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
