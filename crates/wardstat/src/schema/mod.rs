//! Table kinds and the column names the pipeline relies on.

pub mod column;
mod table;

pub use table::TableKind;
