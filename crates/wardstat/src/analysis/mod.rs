//! Per-table analyzers.
//!
//! Each analyzer is a single pass over one cleaned table. They are independent
//! of each other; the recommender combines their outputs.

mod finance;
mod operations;
mod patients;
mod staff;
pub mod stats;

pub use finance::FinanceAnalysis;
pub use operations::OperationsAnalysis;
pub use patients::PatientAnalysis;
pub use staff::StaffAnalysis;
