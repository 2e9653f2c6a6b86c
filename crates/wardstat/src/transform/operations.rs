//! Cleaning operations and the audit trail they leave behind.

use serde::{Deserialize, Serialize};

use crate::schema::TableKind;

/// A transformation applied to a table in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOperation {
    /// Trim, underscore, strip newlines and lowercase every header.
    NormalizeHeaders,

    /// Remove rows identical to an earlier row.
    DropDuplicates,

    /// Carry the last non-missing value of each column down into gaps.
    ForwardFill,

    /// Parse cells as numbers; unparsable cells become missing.
    CoerceNumeric { columns: Vec<String> },

    /// Add (or overwrite) `target` as `minuend - subtrahend`.
    DeriveDifference {
        target: String,
        minuend: String,
        subtrahend: String,
    },
}

impl TransformOperation {
    /// The cleaning plan for one input table, in pipeline order.
    pub fn plan_for(kind: TableKind) -> Vec<TransformOperation> {
        let mut plan = vec![
            TransformOperation::NormalizeHeaders,
            TransformOperation::DropDuplicates,
        ];
        if kind.forward_fills() {
            plan.push(TransformOperation::ForwardFill);
        }
        plan.push(TransformOperation::CoerceNumeric {
            columns: kind.numeric_columns().iter().map(|c| c.to_string()).collect(),
        });
        plan
    }

    /// Short machine-friendly name.
    pub fn kind(&self) -> &'static str {
        match self {
            TransformOperation::NormalizeHeaders => "normalize_headers",
            TransformOperation::DropDuplicates => "drop_duplicates",
            TransformOperation::ForwardFill => "forward_fill",
            TransformOperation::CoerceNumeric { .. } => "coerce_numeric",
            TransformOperation::DeriveDifference { .. } => "derive_difference",
        }
    }

    /// Get a human-readable description of the operation.
    pub fn description(&self) -> String {
        match self {
            TransformOperation::NormalizeHeaders => "Normalize column names".to_string(),
            TransformOperation::DropDuplicates => "Drop duplicate rows".to_string(),
            TransformOperation::ForwardFill => "Forward-fill missing values".to_string(),
            TransformOperation::CoerceNumeric { columns } => {
                format!("Coerce {} to numbers", columns.join(", "))
            }
            TransformOperation::DeriveDifference {
                target,
                minuend,
                subtrahend,
            } => format!("Derive '{}' = '{}' - '{}'", target, minuend, subtrahend),
        }
    }
}

/// Result of applying a sequence of transformations to one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformResult {
    /// Number of operations applied.
    pub operations_applied: usize,

    /// Number of cells whose value changed.
    pub values_changed: usize,

    /// Number of rows dropped.
    pub rows_removed: usize,

    /// Number of columns added.
    pub columns_added: usize,

    /// Detailed changes for each operation.
    pub changes: Vec<TransformChange>,
}

/// A single change made during transformation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformChange {
    /// Operation that produced this change.
    pub transform_type: String,

    /// Description of the change.
    pub description: String,

    /// Column affected (empty for whole-row operations).
    pub column: String,

    /// Number of values changed.
    pub values_changed: usize,

    /// Number of rows removed.
    #[serde(default)]
    pub rows_removed: usize,

    /// Number of columns added.
    #[serde(default)]
    pub columns_added: usize,

    /// Per-cell audit information.
    pub row_audits: Vec<RowAudit>,
}

impl TransformChange {
    pub(crate) fn new(operation: &TransformOperation, column: impl Into<String>) -> Self {
        Self {
            transform_type: operation.kind().to_string(),
            description: operation.description(),
            column: column.into(),
            values_changed: 0,
            rows_removed: 0,
            columns_added: 0,
            row_audits: Vec::new(),
        }
    }
}

/// Audit information for a single cell or row change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowAudit {
    /// Row index (0-based, position in the table when the change was made).
    pub row: usize,

    /// Column that was changed (empty when a whole row was removed).
    pub column: String,

    /// Original value before transformation.
    pub original_value: String,

    /// New value after transformation.
    pub new_value: String,

    /// Type of transformation applied.
    pub transform_type: String,

    /// Reason for the change.
    pub reason: String,
}

impl TransformResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self {
            operations_applied: 0,
            values_changed: 0,
            rows_removed: 0,
            columns_added: 0,
            changes: Vec::new(),
        }
    }

    /// Add a change to the result.
    pub fn add_change(&mut self, change: TransformChange) {
        self.operations_applied += 1;
        self.values_changed += change.values_changed;
        self.rows_removed += change.rows_removed;
        self.columns_added += change.columns_added;
        self.changes.push(change);
    }

    /// Changes produced by one kind of operation.
    pub fn changes_of<'a>(&'a self, transform_type: &'a str) -> impl Iterator<Item = &'a TransformChange> {
        self.changes
            .iter()
            .filter(move |c| c.transform_type == transform_type)
    }

    /// Total values changed by one kind of operation.
    pub fn count_of(&self, transform_type: &str) -> usize {
        self.changes_of(transform_type).map(|c| c.values_changed).sum()
    }
}

impl Default for TransformResult {
    fn default() -> Self {
        Self::new()
    }
}
