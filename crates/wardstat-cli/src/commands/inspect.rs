//! Inspect command - load and clean one table and show what changed.

use std::path::PathBuf;

use colored::Colorize;
use wardstat::{Hospital, TableKind};

use super::{load_config, print_table};

pub fn run(
    table: TableKind,
    file: PathBuf,
    config: Option<PathBuf>,
    audit: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = load_config(config)?;
    let (loaded, cleaning) = Hospital::with_config(config).inspect(table, &file)?;

    println!(
        "{} {} {}",
        "Inspecting".cyan().bold(),
        table.to_string().white().bold(),
        file.display().to_string().white()
    );
    println!();

    let source = &loaded.source;
    println!("{}", "Source:".yellow().bold());
    println!("  Format:  {}", source.format);
    println!("  Size:    {} bytes", source.size_bytes);
    println!("  Hash:    {}", source.hash.dimmed());
    println!("  Columns: {}", loaded.table.headers.join(", "));
    println!();

    let removed = cleaning.rows_loaded - cleaning.rows_kept;
    println!("{}", "Cleaning:".yellow().bold());
    println!("  Rows loaded:          {}", cleaning.rows_loaded);
    println!(
        "  Duplicates removed:   {}",
        if removed > 0 {
            removed.to_string().yellow()
        } else {
            removed.to_string().green()
        }
    );
    println!("  Cells filled:         {}", cleaning.values_filled);
    println!(
        "  Cells made missing:   {}",
        if cleaning.values_coerced_to_missing > 0 {
            cleaning.values_coerced_to_missing.to_string().red()
        } else {
            cleaning.values_coerced_to_missing.to_string().green()
        }
    );

    let missing: Vec<&str> = table
        .required_columns()
        .iter()
        .copied()
        .filter(|c| loaded.table.column_index(c).is_none())
        .collect();
    if !missing.is_empty() {
        println!();
        println!(
            "{} {}",
            "Missing required columns:".red().bold(),
            missing.join(", ")
        );
    }

    if audit {
        println!();
        println!("{}", "Audit:".yellow().bold());
        for change in &cleaning.transforms.changes {
            if change.row_audits.is_empty() {
                continue;
            }
            println!("  {} {}", "●".cyan(), change.description);
            for row in &change.row_audits {
                println!(
                    "    row {:>5}  {:<20} {:?} -> {:?}  {}",
                    row.row,
                    row.column,
                    row.original_value,
                    row.new_value,
                    row.reason.dimmed()
                );
            }
        }
    }

    if verbose {
        println!();
        println!("{}", "Cleaned table:".yellow().bold());
        print_table(&loaded.table);
    }

    Ok(())
}
