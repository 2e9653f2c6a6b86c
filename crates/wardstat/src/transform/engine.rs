//! Transformation engine that cleans tables in place.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::{debug, warn};

use crate::error::Result;
use crate::input::{DataTable, Value};
use crate::schema::TableKind;

use super::normalize::normalize_column_name;
use super::operations::{RowAudit, TransformChange, TransformOperation, TransformResult};
use crate::input::RowKey;

/// Engine for applying cleaning operations to a table.
pub struct TransformEngine;

impl TransformEngine {
    /// Create a new transform engine.
    pub fn new() -> Self {
        Self
    }

    /// Run the standard cleaning plan for `kind` over `data`.
    pub fn clean(&self, kind: TableKind, data: &mut DataTable) -> Result<TransformResult> {
        let result = self.apply(&TransformOperation::plan_for(kind), data)?;
        debug!(
            "cleaned {}: {} rows removed, {} values changed",
            kind, result.rows_removed, result.values_changed
        );
        Ok(result)
    }

    /// Apply operations in order.
    pub fn apply(
        &self,
        operations: &[TransformOperation],
        data: &mut DataTable,
    ) -> Result<TransformResult> {
        let mut result = TransformResult::new();
        for op in operations {
            let change = self.apply_operation(op, data)?;
            result.add_change(change);
        }
        Ok(result)
    }

    /// Apply a single operation to the data.
    pub fn apply_operation(
        &self,
        operation: &TransformOperation,
        data: &mut DataTable,
    ) -> Result<TransformChange> {
        // rows pushed directly onto `data.rows` may be short
        data.conform_rows();
        match operation {
            TransformOperation::NormalizeHeaders => Ok(self.apply_normalize_headers(operation, data)),
            TransformOperation::DropDuplicates => Ok(self.apply_drop_duplicates(operation, data)),
            TransformOperation::ForwardFill => Ok(self.apply_forward_fill(operation, data)),
            TransformOperation::CoerceNumeric { columns } => {
                Ok(self.apply_coerce_numeric(operation, columns, data))
            }
            TransformOperation::DeriveDifference {
                target,
                minuend,
                subtrahend,
            } => self.apply_derive_difference(operation, target, minuend, subtrahend, data),
        }
    }

    fn apply_normalize_headers(
        &self,
        operation: &TransformOperation,
        data: &mut DataTable,
    ) -> TransformChange {
        let mut change = TransformChange::new(operation, "");
        let mut renamed = Vec::new();

        for header in &mut data.headers {
            let normalized = normalize_column_name(header);
            if normalized != *header {
                renamed.push(format!("'{}' → '{}'", header.escape_debug(), normalized));
                *header = normalized;
            }
        }

        change.values_changed = renamed.len();
        if !renamed.is_empty() {
            let examples: Vec<_> = renamed.iter().take(3).cloned().collect();
            change.description = format!("Normalized {} column name(s): {}", renamed.len(), examples.join(", "));
        }
        change
    }

    fn apply_drop_duplicates(
        &self,
        operation: &TransformOperation,
        data: &mut DataTable,
    ) -> TransformChange {
        let mut change = TransformChange::new(operation, "");
        let separator = (data.delimiter as char).to_string();

        let mut keep = Vec::with_capacity(data.row_count());
        {
            let mut seen: HashMap<RowKey<'_>, usize> = HashMap::new();
            for (row_idx, row) in data.rows.iter().enumerate() {
                match seen.entry(RowKey::new(row)) {
                    Entry::Occupied(first) => {
                        keep.push(false);
                        change.row_audits.push(RowAudit {
                            row: row_idx,
                            column: String::new(),
                            original_value: join_row(row, &separator),
                            new_value: String::new(),
                            transform_type: operation.kind().to_string(),
                            reason: format!("Duplicate of row {}", first.get()),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(row_idx);
                        keep.push(true);
                    }
                }
            }
        }

        let mut flags = keep.into_iter();
        data.rows.retain(|_| flags.next().unwrap_or(true));

        change.rows_removed = change.row_audits.len();
        change.description = format!("Dropped {} duplicate row(s)", change.rows_removed);
        change
    }

    fn apply_forward_fill(
        &self,
        operation: &TransformOperation,
        data: &mut DataTable,
    ) -> TransformChange {
        let mut change = TransformChange::new(operation, "");

        for col_idx in 0..data.column_count() {
            let column = data.headers[col_idx].clone();
            let mut last: Option<(usize, Value)> = None;

            for (row_idx, row) in data.rows.iter_mut().enumerate() {
                let cell = &mut row[col_idx];
                if !cell.is_missing() {
                    last = Some((row_idx, cell.clone()));
                    continue;
                }
                if let Some((source_row, value)) = &last {
                    change.row_audits.push(RowAudit {
                        row: row_idx,
                        column: column.clone(),
                        original_value: String::new(),
                        new_value: value.to_string(),
                        transform_type: operation.kind().to_string(),
                        reason: format!("Filled from row {}", source_row),
                    });
                    *cell = value.clone();
                }
            }
        }

        change.values_changed = change.row_audits.len();
        change.description = format!("Forward-filled {} missing value(s)", change.values_changed);
        change
    }

    fn apply_coerce_numeric(
        &self,
        operation: &TransformOperation,
        columns: &[String],
        data: &mut DataTable,
    ) -> TransformChange {
        let mut change = TransformChange::new(operation, columns.join(","));
        let mut converted = 0;

        for column in columns {
            let Some(col_idx) = data.column_index(column) else {
                debug!("{}: numeric column '{}' absent, skipped", data.name, column);
                continue;
            };

            let mut column_converted = 0;
            let mut column_failed = 0;
            for (row_idx, row) in data.rows.iter_mut().enumerate() {
                let cell = &mut row[col_idx];
                let Value::Text(raw) = &*cell else {
                    continue;
                };
                match parse_number(raw) {
                    Some(n) => {
                        *cell = Value::Number(n);
                        column_converted += 1;
                    }
                    None => {
                        change.row_audits.push(RowAudit {
                            row: row_idx,
                            column: column.clone(),
                            original_value: raw.clone(),
                            new_value: String::new(),
                            transform_type: operation.kind().to_string(),
                            reason: format!("Converted '{}' to missing (not a number)", raw),
                        });
                        *cell = Value::Missing;
                        column_failed += 1;
                    }
                }
            }

            if column_failed > column_converted {
                warn!(
                    "{}.{}: {} of {} values were not numeric",
                    data.name,
                    column,
                    column_failed,
                    column_failed + column_converted
                );
            }
            converted += column_converted;
        }

        change.values_changed = change.row_audits.len();
        change.description = format!(
            "Coerced {} value(s) to numbers, {} unparsable set to missing",
            converted, change.values_changed
        );
        change
    }

    fn apply_derive_difference(
        &self,
        operation: &TransformOperation,
        target: &str,
        minuend: &str,
        subtrahend: &str,
        data: &mut DataTable,
    ) -> Result<TransformChange> {
        let left = data.require_column(minuend)?;
        let right = data.require_column(subtrahend)?;
        let existed = data.column_index(target).is_some();

        let values: Vec<Value> = data
            .rows
            .iter()
            .map(|row| match (row[left].as_number(), row[right].as_number()) {
                (Some(a), Some(b)) => Value::number(a - b),
                _ => Value::Missing,
            })
            .collect();
        let derived = values.iter().filter(|v| !v.is_missing()).count();
        data.put_column(target, values);

        let mut change = TransformChange::new(operation, target);
        change.values_changed = derived;
        change.columns_added = usize::from(!existed);
        Ok(change)
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a cell as a number. NaN counts as unparsable.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn join_row(row: &[Value], separator: &str) -> String {
    row.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patients() -> DataTable {
        DataTable::from_strings(
            "patients",
            &[" Diagnosis ", "Gender", "Length of\nStay", "Age"],
            &[
                vec!["flu", "M", "3", "40"],
                vec!["flu", "M", "3", "40"],
                vec!["cold", "", "", "abc"],
                vec!["", "F", "7", ""],
            ],
        )
    }

    #[test]
    fn test_clean_patients() {
        let mut table = patients();
        let result = TransformEngine::new()
            .clean(TableKind::Patients, &mut table)
            .unwrap();

        assert_eq!(table.headers, vec!["diagnosis", "gender", "length_ofstay", "age"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(result.rows_removed, 1);

        // gender and stay filled from the first row, diagnosis from "cold"
        assert_eq!(table.get(1, 1), Some(&Value::Text("M".into())));
        assert_eq!(table.get(2, 0), Some(&Value::Text("cold".into())));
        // "abc" survives the fill as text, then coercion marks it missing
        assert_eq!(table.get(1, 3), Some(&Value::Missing));
        // the fill copied "abc" into the last row before coercion
        assert_eq!(table.get(2, 3), Some(&Value::Missing));
        assert_eq!(result.count_of("coerce_numeric"), 2);
    }

    #[test]
    fn test_drop_duplicates_keeps_first() {
        let mut table = DataTable::from_strings(
            "t",
            &["a", "b"],
            &[vec!["1", "x"], vec!["2", "y"], vec!["1", "x"], vec!["", ""], vec!["", ""]],
        );
        let change = TransformEngine::new()
            .apply_operation(&TransformOperation::DropDuplicates, &mut table)
            .unwrap();

        assert_eq!(change.rows_removed, 2);
        assert_eq!(table.row_count(), 3);
        assert_eq!(change.row_audits[0].row, 2);
        assert_eq!(change.row_audits[0].reason, "Duplicate of row 0");
        assert_eq!(change.row_audits[0].original_value, "1;x");
    }

    #[test]
    fn test_forward_fill_leaves_leading_gap() {
        let mut table = DataTable::from_strings(
            "t",
            &["a", "b"],
            &[vec!["", "1"], vec!["x", ""], vec!["", ""]],
        );
        let change = TransformEngine::new()
            .apply_operation(&TransformOperation::ForwardFill, &mut table)
            .unwrap();

        assert_eq!(table.get(0, 0), Some(&Value::Missing));
        assert_eq!(table.get(2, 0), Some(&Value::Text("x".into())));
        assert_eq!(table.get(2, 1), Some(&Value::Text("1".into())));
        assert_eq!(change.values_changed, 3);
    }

    #[test]
    fn test_placeholder_text_is_not_filled() {
        let mut table = DataTable::from_strings(
            "patients",
            &["gender", "age"],
            &[vec!["M", "40"], vec!["-", "."], vec!["", " "]],
        );
        TransformEngine::new()
            .apply_operation(&TransformOperation::ForwardFill, &mut table)
            .unwrap();

        assert_eq!(table.get(1, 0), Some(&Value::Text("-".into())));
        assert_eq!(table.get(1, 1), Some(&Value::Text(".".into())));
        // only the empty cell is missing; it copies "-" rather than "M"
        assert_eq!(table.get(2, 0), Some(&Value::Text("-".into())));
        assert_eq!(table.get(2, 1), Some(&Value::Text(" ".into())));
    }

    #[test]
    fn test_coerce_skips_absent_columns() {
        let mut table = DataTable::from_strings("t", &["revenue"], &[vec!["12.5"], vec!["n/a"], vec!["1,5"]]);
        let op = TransformOperation::CoerceNumeric {
            columns: vec!["revenue".into(), "expenses".into()],
        };
        let change = TransformEngine::new().apply_operation(&op, &mut table).unwrap();

        assert_eq!(table.get(0, 0), Some(&Value::Number(12.5)));
        assert_eq!(table.get(1, 0), Some(&Value::Missing));
        assert_eq!(table.get(2, 0), Some(&Value::Missing));
        // "n/a" was already missing on load, only "1,5" failed to parse
        assert_eq!(change.values_changed, 1);
    }

    #[test]
    fn test_derive_difference() {
        let mut table = DataTable::from_strings(
            "finance",
            &["revenue", "expenses"],
            &[vec!["100", "40"], vec!["", "10"]],
        );
        let engine = TransformEngine::new();
        engine
            .apply_operation(
                &TransformOperation::CoerceNumeric {
                    columns: vec!["revenue".into(), "expenses".into()],
                },
                &mut table,
            )
            .unwrap();
        let op = TransformOperation::DeriveDifference {
            target: "profit".into(),
            minuend: "revenue".into(),
            subtrahend: "expenses".into(),
        };
        let change = engine.apply_operation(&op, &mut table).unwrap();

        assert_eq!(change.columns_added, 1);
        assert_eq!(table.get(0, 2), Some(&Value::Number(60.0)));
        assert_eq!(table.get(1, 2), Some(&Value::Missing));
    }

    #[test]
    fn test_derive_difference_requires_operands() {
        let mut table = DataTable::from_strings("finance", &["revenue"], &[vec!["1"]]);
        let op = TransformOperation::DeriveDifference {
            target: "profit".into(),
            minuend: "revenue".into(),
            subtrahend: "expenses".into(),
        };
        assert!(TransformEngine::new().apply_operation(&op, &mut table).is_err());
    }

    #[test]
    fn test_short_rows_pushed_after_construction() {
        let mut table = DataTable::from_strings("patients", &["a", "b"], &[vec!["x", "1"]]);
        table.rows.push(vec![Value::Missing]);
        let engine = TransformEngine::new();

        engine.apply_operation(&TransformOperation::ForwardFill, &mut table).unwrap();
        assert_eq!(table.get(1, 0), Some(&Value::Text("x".into())));
        assert_eq!(table.get(1, 1), Some(&Value::Text("1".into())));

        table.rows.push(vec![Value::Text("y".into())]);
        let op = TransformOperation::CoerceNumeric { columns: vec!["b".into()] };
        engine.apply_operation(&op, &mut table).unwrap();
        assert_eq!(table.get(2, 1), Some(&Value::Missing));
        assert_eq!(table.get(1, 1), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("0.85"), Some(0.85));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("twelve"), None);
    }
}
