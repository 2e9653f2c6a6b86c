//! Rule-based recommendations drawn from the analyzer outputs.

use serde::Serialize;

use crate::analysis::{FinanceAnalysis, OperationsAnalysis, StaffAnalysis};
use crate::error::Result;
use crate::input::DataTable;
use crate::schema::column::{DEPARTMENT, TYPE};

/// One recommendation line. Wording is left to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    /// Add staff to the department with the heaviest workload.
    IncreaseStaffing { department: Option<String> },
    /// Review protocols for operation types with a low success rate.
    ImproveOperations { types: Vec<String> },
    /// Cut costs or raise revenue in the least profitable departments.
    ReviewLowProfit { departments: Vec<String> },
    /// Keep an eye on long stays.
    MonitorLengthOfStay,
}

/// Build the four recommendations, in fixed order.
pub fn recommend(
    staff: &StaffAnalysis,
    operations: &OperationsAnalysis,
    finance: &FinanceAnalysis,
) -> Result<Vec<Recommendation>> {
    Ok(vec![
        Recommendation::IncreaseStaffing {
            department: staff.busiest_department().map(str::to_string),
        },
        Recommendation::ImproveOperations {
            types: column_text(&operations.needs_improvement, TYPE)?,
        },
        Recommendation::ReviewLowProfit {
            departments: column_text(&finance.low_profit, DEPARTMENT)?,
        },
        Recommendation::MonitorLengthOfStay,
    ])
}

/// Every cell of `column` as text, one per row, duplicates kept.
fn column_text(table: &DataTable, column: &str) -> Result<Vec<String>> {
    let idx = table.require_column(column)?;
    Ok(table.column_values(idx).map(|v| v.to_string()).collect())
}
