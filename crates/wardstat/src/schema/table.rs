//! The four hospital tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::column::*;

/// One of the four input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Patients,
    Staff,
    Operations,
    Finance,
}

impl TableKind {
    /// All kinds, in pipeline order.
    pub const ALL: [TableKind; 4] = [
        TableKind::Patients,
        TableKind::Staff,
        TableKind::Operations,
        TableKind::Finance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TableKind::Patients => "patients",
            TableKind::Staff => "staff",
            TableKind::Operations => "operations",
            TableKind::Finance => "finance",
        }
    }

    /// File name used when only a data directory is given.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            TableKind::Patients => "Patients.csv",
            TableKind::Staff => "Staff.csv",
            TableKind::Operations => "Operations.csv",
            TableKind::Finance => "Finance.csv",
        }
    }

    /// Columns coerced to numbers. Absent ones are skipped.
    pub fn numeric_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Patients => &[AGE, LENGTH_OF_STAY, BLOOD_PRESSURE, BLOOD_SUGAR, CHOLESTEROL],
            TableKind::Staff => &[PATIENTS_ATTENDED, AVG_TREATMENT_SUCCESS],
            TableKind::Operations => &[SUCCESS_RATE],
            TableKind::Finance => &[REVENUE, EXPENSES],
        }
    }

    /// Columns the analyzer for this table reads.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Patients => &[DIAGNOSIS, GENDER, LENGTH_OF_STAY],
            TableKind::Staff => &[NAME, ROLE, DEPARTMENT, AVG_TREATMENT_SUCCESS, PATIENTS_ATTENDED],
            TableKind::Operations => &[TYPE, DEPARTMENT, SUCCESS_RATE],
            TableKind::Finance => &[DEPARTMENT, REVENUE, EXPENSES],
        }
    }

    /// Only the patient table has its gaps forward-filled.
    pub fn forward_fills(&self) -> bool {
        matches!(self, TableKind::Patients)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patients" | "patient" => Ok(TableKind::Patients),
            "staff" => Ok(TableKind::Staff),
            "operations" | "operation" | "ops" => Ok(TableKind::Operations),
            "finance" | "finances" => Ok(TableKind::Finance),
            _ => Err(format!(
                "Unknown table: {}. Use: patients, staff, operations, or finance.",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_patients_forward_fill() {
        let filled: Vec<_> = TableKind::ALL.iter().filter(|k| k.forward_fills()).collect();
        assert_eq!(filled, vec![&TableKind::Patients]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Staff".parse::<TableKind>().unwrap(), TableKind::Staff);
        assert_eq!("ops".parse::<TableKind>().unwrap(), TableKind::Operations);
        assert!("wards".parse::<TableKind>().is_err());
    }

    #[test]
    fn test_numeric_columns_match_layout() {
        assert_eq!(TableKind::Operations.numeric_columns(), &["success_rate"]);
        assert_eq!(TableKind::Finance.numeric_columns(), &["revenue", "expenses"]);
        assert_eq!(TableKind::Patients.numeric_columns().len(), 5);
    }
}
