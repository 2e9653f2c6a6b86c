//! Report configuration and its TOML representation.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::ChartStyle;
use crate::error::{Result, WardstatError};
use crate::input::ParserConfig;

/// Default success rate below which an operation needs improvement.
pub const DEFAULT_LOW_SUCCESS_RATE: f64 = 0.9;

/// Where the low-profit line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCutoff", into = "RawCutoff")]
pub enum ProfitCutoff {
    /// Mean profit over the whole finance table.
    #[default]
    Mean,
    /// A fixed amount.
    Fixed(f64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawCutoff {
    Keyword(String),
    Amount(f64),
}

impl TryFrom<RawCutoff> for ProfitCutoff {
    type Error = String;

    fn try_from(raw: RawCutoff) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawCutoff::Keyword(k) if k.eq_ignore_ascii_case("mean") => Ok(ProfitCutoff::Mean),
            RawCutoff::Keyword(k) => Err(format!(
                "unknown profit cutoff '{}', use \"mean\" or a number",
                k
            )),
            RawCutoff::Amount(v) => Ok(ProfitCutoff::Fixed(v)),
        }
    }
}

impl From<ProfitCutoff> for RawCutoff {
    fn from(cutoff: ProfitCutoff) -> Self {
        match cutoff {
            ProfitCutoff::Mean => RawCutoff::Keyword("mean".to_string()),
            ProfitCutoff::Fixed(v) => RawCutoff::Amount(v),
        }
    }
}

impl fmt::Display for ProfitCutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitCutoff::Mean => write!(f, "mean"),
            ProfitCutoff::Fixed(v) => write!(f, "{}", v),
        }
    }
}

/// Thresholds used by the operations and finance analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Operations with a success rate strictly below this need improvement.
    pub low_success_rate: f64,
    /// Finance records with profit strictly below this are low profit.
    pub profit_cutoff: ProfitCutoff,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_success_rate: DEFAULT_LOW_SUCCESS_RATE,
            profit_cutoff: ProfitCutoff::Mean,
        }
    }
}

/// Configuration for a report run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Analyzer thresholds.
    pub thresholds: Thresholds,
    /// Chart style for the presentation layer.
    pub chart: ChartStyle,
}

impl ReportConfig {
    /// Parse TOML; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ReportConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| WardstatError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.thresholds.low_success_rate.is_finite() {
            return Err(WardstatError::Config(
                "thresholds.low_success_rate must be a finite number".to_string(),
            ));
        }
        if let ProfitCutoff::Fixed(v) = self.thresholds.profit_cutoff {
            if !v.is_finite() {
                return Err(WardstatError::Config(
                    "thresholds.profit_cutoff must be \"mean\" or a finite number".to_string(),
                ));
            }
        }
        if self.parser.max_rows == Some(0) {
            return Err(WardstatError::Config("parser.max_rows must be at least 1".to_string()));
        }
        self.chart.validate()
    }
}
