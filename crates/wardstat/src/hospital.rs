//! Main `Hospital` struct and public API.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::analysis::{FinanceAnalysis, OperationsAnalysis, PatientAnalysis, StaffAnalysis};
use crate::chart::{Chart, ChartRenderer};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::input::{DataTable, DatasetPaths, Parser, SourceMetadata};
use crate::recommend::{Recommendation, recommend};
use crate::schema::TableKind;
use crate::transform::{TransformEngine, TransformResult};

/// A loaded table with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub kind: TableKind,
    pub table: DataTable,
    pub source: SourceMetadata,
}

/// What cleaning did to one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableCleaning {
    pub table: TableKind,
    /// Rows as loaded.
    pub rows_loaded: usize,
    /// Rows after deduplication.
    pub rows_kept: usize,
    /// Cells filled from an earlier row.
    pub values_filled: usize,
    /// Cells that failed numeric parsing and became missing.
    pub values_coerced_to_missing: usize,
    /// Full audit trail.
    pub transforms: TransformResult,
}

impl TableCleaning {
    fn new(kind: TableKind, rows_loaded: usize, rows_kept: usize, transforms: TransformResult) -> Self {
        Self {
            table: kind,
            rows_loaded,
            rows_kept,
            values_filled: transforms.count_of("forward_fill"),
            values_coerced_to_missing: transforms.count_of("coerce_numeric"),
            transforms,
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Input files, in table order.
    pub sources: Vec<SourceMetadata>,
    /// Cleaning summary per table, in table order.
    pub cleaning: Vec<TableCleaning>,
    pub patients: PatientAnalysis,
    pub staff: StaffAnalysis,
    pub operations: OperationsAnalysis,
    pub finance: FinanceAnalysis,
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// The four charts, in analyzer order.
    pub fn charts(&self) -> [&Chart; 4] {
        [
            &self.patients.chart,
            &self.staff.chart,
            &self.operations.chart,
            &self.finance.chart,
        ]
    }

    /// Serialize the whole report.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The report generator.
pub struct Hospital {
    config: ReportConfig,
    parser: Parser,
    engine: TransformEngine,
}

impl Hospital {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: ReportConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self {
            config,
            parser,
            engine: TransformEngine::new(),
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Load one table from disk. The table is named after its kind.
    pub fn load(&self, kind: TableKind, path: impl AsRef<Path>) -> Result<LoadedTable> {
        let (mut table, source) = self.parser.parse_file(path)?;
        table.name = kind.name().to_string();
        info!(
            "loaded {} from {} ({} rows)",
            kind,
            source.file,
            table.row_count()
        );
        Ok(LoadedTable {
            kind,
            table,
            source,
        })
    }

    /// Normalize, deduplicate, fill and coerce a loaded table in place.
    pub fn clean(&self, loaded: &mut LoadedTable) -> Result<TableCleaning> {
        let rows_loaded = loaded.table.row_count();
        let transforms = self.engine.clean(loaded.kind, &mut loaded.table)?;
        Ok(TableCleaning::new(
            loaded.kind,
            rows_loaded,
            loaded.table.row_count(),
            transforms,
        ))
    }

    /// Load and clean one table.
    pub fn inspect(&self, kind: TableKind, path: impl AsRef<Path>) -> Result<(LoadedTable, TableCleaning)> {
        let mut loaded = self.load(kind, path)?;
        let cleaning = self.clean(&mut loaded)?;
        Ok((loaded, cleaning))
    }

    /// Run the whole pipeline.
    pub fn report(&self, paths: &DatasetPaths) -> Result<Report> {
        let mut patients = self.load(TableKind::Patients, &paths.patients)?;
        let mut staff = self.load(TableKind::Staff, &paths.staff)?;
        let mut operations = self.load(TableKind::Operations, &paths.operations)?;
        let mut finance = self.load(TableKind::Finance, &paths.finance)?;

        let cleaning = [&mut patients, &mut staff, &mut operations, &mut finance]
            .into_iter()
            .map(|loaded| self.clean(loaded))
            .collect::<Result<Vec<_>>>()?;

        let sources = [&patients, &staff, &operations, &finance]
            .iter()
            .map(|loaded| loaded.source.clone())
            .collect();

        let thresholds = &self.config.thresholds;
        let patients = PatientAnalysis::analyze(&patients.table)?;
        let staff = StaffAnalysis::analyze(&staff.table)?;
        let operations = OperationsAnalysis::analyze(&operations.table, thresholds.low_success_rate)?;
        let finance = FinanceAnalysis::analyze(&mut finance.table, thresholds.profit_cutoff)?;

        let recommendations = recommend(&staff, &operations, &finance)?;
        info!("report ready: {} recommendations", recommendations.len());

        Ok(Report {
            sources,
            cleaning,
            patients,
            staff,
            operations,
            finance,
            recommendations,
            generated_at: Utc::now(),
        })
    }

    /// Run the pipeline and hand each chart to `renderer`.
    ///
    /// Charts are rendered only once every analyzer has succeeded.
    pub fn report_with(
        &self,
        paths: &DatasetPaths,
        renderer: &mut dyn ChartRenderer,
    ) -> Result<Report> {
        let report = self.report(paths)?;
        for chart in report.charts() {
            renderer.render(chart)?;
        }
        Ok(report)
    }
}

impl Default for Hospital {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_names_table_by_kind() {
        let file = create_test_file("Diagnosis;Gender\nflu;M\n");
        let loaded = Hospital::new().load(TableKind::Patients, file.path()).unwrap();
        assert_eq!(loaded.table.name, "patients");
        assert_eq!(loaded.source.format, "csv-semicolon");
        assert!(loaded.source.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_inspect_staff_reports_cleaning() {
        let file = create_test_file(
            "Name;Role;Department;Patients Attended;Avg Treatment Success\n\
             Ann;Nurse;ER;10;0.9\n\
             Ann;Nurse;ER;10;0.9\n\
             Bob;Doctor;ICU;many;\n",
        );
        let (loaded, cleaning) = Hospital::new().inspect(TableKind::Staff, file.path()).unwrap();

        assert_eq!(cleaning.rows_loaded, 3);
        assert_eq!(cleaning.rows_kept, 2);
        assert_eq!(cleaning.values_filled, 0);
        assert_eq!(cleaning.values_coerced_to_missing, 1);
        assert_eq!(loaded.table.column_index("patients_attended"), Some(3));
    }
}
