//! wardstat: descriptive statistics and recommendations for a hospital's
//! operational data.
//!
//! Four semicolon-delimited tables (patients, staff, operations, finance) are
//! loaded, their column names normalized, duplicate rows dropped, the patient
//! table forward-filled, and designated columns coerced to numbers. Four
//! analyzers then summarize the tables and a recommender turns their results
//! into a short action list.
//!
//! # Core Principles
//!
//! - **Single batch**: one run, fresh inputs, nothing written back
//! - **Degrade, don't abort**: an unparsable number becomes a missing cell
//! - **Structured output**: text and charts are left to the presentation layer
//!
//! # Example
//!
//! ```no_run
//! use wardstat::{DatasetPaths, Hospital, RecordingRenderer};
//!
//! let mut charts = RecordingRenderer::default();
//! let report = Hospital::new()
//!     .report_with(&DatasetPaths::in_dir("data"), &mut charts)
//!     .unwrap();
//!
//! println!("Busiest department: {:?}", report.staff.busiest_department());
//! println!("Charts: {}", charts.charts.len());
//! ```

pub mod analysis;
pub mod chart;
pub mod config;
pub mod error;
pub mod input;
pub mod recommend;
pub mod schema;
pub mod transform;

mod hospital;

pub use crate::hospital::{Hospital, LoadedTable, Report, TableCleaning};
pub use analysis::{FinanceAnalysis, OperationsAnalysis, PatientAnalysis, StaffAnalysis};
pub use chart::{Aggregate, Chart, ChartRenderer, ChartStyle, RecordingRenderer, Series, Theme};
pub use config::{ProfitCutoff, ReportConfig, Thresholds};
pub use error::{Result, WardstatError};
pub use input::{DataTable, DatasetPaths, ParserConfig, SourceMetadata, Value};
pub use recommend::Recommendation;
pub use schema::TableKind;
pub use transform::{RowAudit, TransformChange, TransformOperation, TransformResult};
