//! Header normalization, deduplication, forward fill and numeric coercion.

mod engine;
mod normalize;
mod operations;

pub use engine::TransformEngine;
pub use normalize::normalize_column_name;
pub use operations::{RowAudit, TransformChange, TransformOperation, TransformResult};
