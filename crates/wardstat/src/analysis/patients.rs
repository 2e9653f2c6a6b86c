//! Diagnosis frequencies and length of stay.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::stats::{group_mean, value_counts};
use crate::chart::{Aggregate, Chart, ChartBuilder};
use crate::error::Result;
use crate::input::DataTable;
use crate::schema::column::{DIAGNOSIS, GENDER, LENGTH_OF_STAY};

/// Results of the patient analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct PatientAnalysis {
    /// Patients per diagnosis, most frequent first.
    pub diagnosis_counts: IndexMap<String, usize>,
    /// Mean length of stay per diagnosis, in ascending diagnosis order.
    pub mean_length_of_stay: IndexMap<String, Option<f64>>,
    /// Diagnosis distribution segmented by gender.
    pub chart: Chart,
}

impl PatientAnalysis {
    pub fn analyze(patients: &DataTable) -> Result<Self> {
        let diagnosis = patients.require_column(DIAGNOSIS)?;
        let diagnosis_counts = value_counts(patients.column_values(diagnosis));

        let gender = patients.require_column(GENDER)?;
        let mut chart = ChartBuilder::new("Distribution of diseases by gender", Aggregate::Count)
            .labels(DIAGNOSIS, "count");
        for row in &patients.rows {
            let category = DataTable::cell(row, diagnosis);
            chart.observe(category, Some(DataTable::cell(row, gender)), category);
        }

        let stay = patients.require_column(LENGTH_OF_STAY)?;
        let mut mean_length_of_stay = group_mean(
            patients.column_values(diagnosis),
            patients.column_values(stay),
        );
        mean_length_of_stay.sort_keys();

        debug!(
            "patients: {} diagnoses over {} rows",
            diagnosis_counts.len(),
            patients.row_count()
        );

        Ok(Self {
            diagnosis_counts,
            mean_length_of_stay,
            chart: chart.build(),
        })
    }
}
