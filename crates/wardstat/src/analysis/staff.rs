//! Treatment success per employee and departmental workload.

use std::cmp::Ordering;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::stats::group_sum;
use crate::chart::{Aggregate, Chart, ChartBuilder};
use crate::error::Result;
use crate::input::DataTable;
use crate::schema::column::{AVG_TREATMENT_SUCCESS, DEPARTMENT, NAME, PATIENTS_ATTENDED, ROLE};

/// Results of the staff analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct StaffAnalysis {
    /// Patients attended per department, heaviest first.
    pub workload: IndexMap<String, f64>,
    /// Average treatment success per employee, segmented by role.
    pub chart: Chart,
}

impl StaffAnalysis {
    pub fn analyze(staff: &DataTable) -> Result<Self> {
        let name = staff.require_column(NAME)?;
        let success = staff.require_column(AVG_TREATMENT_SUCCESS)?;
        let role = staff.require_column(ROLE)?;
        let mut chart = ChartBuilder::new("Average treatment success per employee", Aggregate::Mean)
            .labels(NAME, AVG_TREATMENT_SUCCESS);
        for row in &staff.rows {
            chart.observe(
                DataTable::cell(row, name),
                Some(DataTable::cell(row, role)),
                DataTable::cell(row, success),
            );
        }

        let department = staff.require_column(DEPARTMENT)?;
        let attended = staff.require_column(PATIENTS_ATTENDED)?;
        let mut workload = group_sum(staff.column_values(department), staff.column_values(attended));
        // stable: equal sums keep first-seen department order, NaN sums go last
        workload.sort_by(|_, a, _, b| match (a.is_nan(), b.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => b.total_cmp(a),
        });

        debug!("staff: {} departments ranked by workload", workload.len());

        Ok(Self {
            workload,
            chart: chart.build(),
        })
    }

    /// Department at the top of the workload ranking.
    pub fn busiest_department(&self) -> Option<&str> {
        self.workload.keys().next().map(String::as_str)
    }
}
