//! Profit per department and the least profitable records.

use log::debug;
use serde::Serialize;

use super::stats::{mean, rows_below};
use crate::chart::{Aggregate, Chart, ChartBuilder};
use crate::config::ProfitCutoff;
use crate::error::Result;
use crate::input::DataTable;
use crate::schema::column::{DEPARTMENT, EXPENSES, PROFIT, REVENUE};
use crate::transform::{TransformEngine, TransformOperation};

/// Results of the finance analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct FinanceAnalysis {
    /// Mean profit over records with both revenue and expenses.
    pub mean_profit: Option<f64>,
    /// Profit below which a record counts as low profit.
    pub cutoff: Option<f64>,
    /// Records with `profit < cutoff`, original order and columns.
    pub low_profit: DataTable,
    /// Profit per department.
    pub chart: Chart,
}

impl FinanceAnalysis {
    /// Analyze the finance table, appending its `profit` column first.
    pub fn analyze(finance: &mut DataTable, cutoff: ProfitCutoff) -> Result<Self> {
        TransformEngine::new().apply_operation(
            &TransformOperation::DeriveDifference {
                target: PROFIT.to_string(),
                minuend: REVENUE.to_string(),
                subtrahend: EXPENSES.to_string(),
            },
            finance,
        )?;
        let profit = finance.require_column(PROFIT)?;

        let department = finance.require_column(DEPARTMENT)?;
        let mut chart =
            ChartBuilder::new("Profits per division", Aggregate::Mean).labels(DEPARTMENT, PROFIT);
        for row in &finance.rows {
            chart.observe(DataTable::cell(row, department), None, DataTable::cell(row, profit));
        }

        let mean_profit = mean(finance.column_values(profit));
        let cutoff = match cutoff {
            ProfitCutoff::Mean => mean_profit,
            ProfitCutoff::Fixed(value) => Some(value),
        };
        let low = match cutoff {
            Some(c) => rows_below(finance.column_values(profit), c),
            None => Vec::new(),
        };

        debug!(
            "finance: mean profit {:?}, {} of {} records below cutoff",
            mean_profit,
            low.len(),
            finance.row_count()
        );

        Ok(Self {
            mean_profit,
            cutoff,
            low_profit: finance.select_rows(&low),
            chart: chart.build(),
        })
    }
}
