//! Delimited-text parser for the hospital tables.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata, Value};
use crate::error::{Result, WardstatError};

/// Delimiters to try when auto-detecting, in tie-break order.
const DELIMITERS: &[u8] = &[b';', b',', b'\t', b'|'];

/// Non-blank lines read when auto-detecting.
const SAMPLE_LINES: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    #[serde(
        serialize_with = "serialize_delimiter",
        deserialize_with = "deserialize_delimiter"
    )]
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    #[serde(skip)]
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: Some(b';'),
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

fn serialize_delimiter<S: Serializer>(delimiter: &Option<u8>, s: S) -> std::result::Result<S::Ok, S::Error> {
    match delimiter {
        Some(d) => s.serialize_str(&(*d as char).to_string()),
        None => s.serialize_str("auto"),
    }
}

fn deserialize_delimiter<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<u8>, D::Error> {
    let raw = String::deserialize(d)?;
    parse_delimiter(&raw).map_err(serde::de::Error::custom)
}

/// Interpret a user-supplied delimiter: a single ASCII character, `\t`, `tab` or `auto`.
pub(crate) fn parse_delimiter(raw: &str) -> std::result::Result<Option<u8>, WardstatError> {
    match raw {
        "auto" => Ok(None),
        "tab" | "\\t" | "\t" => Ok(Some(b'\t')),
        s if s.len() == 1 && s.is_ascii() => Ok(Some(s.as_bytes()[0])),
        other => Err(WardstatError::InvalidDelimiter(format!(
            "'{}' is not a single ASCII character",
            other
        ))),
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    ///
    /// The table is named after the file stem.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |e| WardstatError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data_table = self.parse_bytes(&name, &contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            "parsed {} ({} rows, {} columns, {})",
            path.display(),
            data_table.row_count(),
            data_table.column_count(),
            format
        );

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, name: &str, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            records.push(result?);
        }

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            let width = records.first().map(|r| r.len()).unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(WardstatError::EmptyData(format!("No columns found in '{}'", name)));
        }

        let expected_cols = headers.len();
        let rows = records
            .iter()
            .map(|record| {
                let mut row: Vec<Value> = record.iter().map(Value::from_raw).collect();
                // Pad short rows, truncate long ones
                row.resize(expected_cols, Value::Missing);
                row
            })
            .collect();

        Ok(DataTable::new(name, headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the candidate that splits the header most often while giving every
/// sampled line the same number of fields. Earlier candidates win ties.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let sample: Vec<String> = BufReader::new(bytes)
        .lines()
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();
    let Some(header) = sample.first() else {
        return Err(WardstatError::EmptyData("No lines to analyze".to_string()));
    };

    let mut best: Option<(bool, usize, u8)> = None;
    for &candidate in DELIMITERS {
        let splits = separators(header, candidate);
        if splits == 0 {
            continue;
        }
        let regular = sample.iter().all(|line| separators(line, candidate) == splits);
        if best.is_none_or(|(r, n, _)| (regular, splits) > (r, n)) {
            best = Some((regular, splits, candidate));
        }
    }

    let delimiter = best.map_or(b';', |(_, _, d)| d);
    debug!("detected delimiter {:?}", delimiter as char);
    Ok(delimiter)
}

/// Unquoted occurrences of `delimiter` in `line`.
fn separators(line: &str, delimiter: u8) -> usize {
    line.split('"')
        .step_by(2)
        .map(|outside| outside.bytes().filter(|&b| b == delimiter).count())
        .sum()
}
