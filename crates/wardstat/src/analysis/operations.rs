//! Operation success rates and the operations that need improvement.

use log::debug;
use serde::Serialize;

use super::stats::rows_below;
use crate::chart::{Aggregate, Chart, ChartBuilder};
use crate::error::Result;
use crate::input::DataTable;
use crate::schema::column::{DEPARTMENT, SUCCESS_RATE, TYPE};

/// Results of the operations analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct OperationsAnalysis {
    /// Success rate below which an operation needs improvement.
    pub threshold: f64,
    /// Rows with `success_rate < threshold`, original order and columns.
    pub needs_improvement: DataTable,
    /// Success rate by operation type, segmented by department.
    pub chart: Chart,
}

impl OperationsAnalysis {
    pub fn analyze(operations: &DataTable, threshold: f64) -> Result<Self> {
        let op_type = operations.require_column(TYPE)?;
        let rate = operations.require_column(SUCCESS_RATE)?;
        let department = operations.require_column(DEPARTMENT)?;
        let mut chart = ChartBuilder::new(
            "Operation success rate by type and department",
            Aggregate::Mean,
        )
        .labels(TYPE, SUCCESS_RATE);
        for row in &operations.rows {
            chart.observe(
                DataTable::cell(row, op_type),
                Some(DataTable::cell(row, department)),
                DataTable::cell(row, rate),
            );
        }

        let low = rows_below(operations.column_values(rate), threshold);
        debug!(
            "operations: {} of {} below success rate {}",
            low.len(),
            operations.row_count(),
            threshold
        );

        Ok(Self {
            threshold,
            needs_improvement: operations.select_rows(&low),
            chart: chart.build(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;

    fn operations(rates: &[Option<f64>]) -> DataTable {
        let mut table = DataTable::new(
            "operations",
            vec!["type".into(), "department".into(), "success_rate".into()],
            Vec::new(),
            b';',
        );
        for (i, rate) in rates.iter().enumerate() {
            table.rows.push(vec![
                Value::Text(format!("op{}", i)),
                Value::Text("Surgery".into()),
                rate.map_or(Value::Missing, Value::Number),
            ]);
        }
        table
    }

    #[test]
    fn test_strictly_below_threshold() {
        let table = operations(&[Some(0.95), Some(0.85), Some(0.9)]);
        let analysis = OperationsAnalysis::analyze(&table, 0.9).unwrap();

        assert_eq!(analysis.needs_improvement.row_count(), 1);
        assert_eq!(analysis.needs_improvement.rows[0], table.rows[1]);
        assert_eq!(analysis.needs_improvement.headers, table.headers);
    }

    #[test]
    fn test_missing_rate_excluded_and_order_kept() {
        let table = operations(&[Some(0.5), None, Some(0.1), Some(0.99)]);
        let analysis = OperationsAnalysis::analyze(&table, 0.9).unwrap();
        let types: Vec<_> = analysis
            .needs_improvement
            .column_values(0)
            .map(|v| v.to_string())
            .collect();
        assert_eq!(types, vec!["op0", "op2"]);
    }

    #[test]
    fn test_configured_threshold() {
        let table = operations(&[Some(0.95), Some(0.85)]);
        let analysis = OperationsAnalysis::analyze(&table, 0.99).unwrap();
        assert_eq!(analysis.needs_improvement.row_count(), 2);
    }
}
