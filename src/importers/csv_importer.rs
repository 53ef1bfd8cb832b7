use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

pub const COL_MODIFIER_TYPE: &str = "Modifier Type";
pub const COL_MODIFIER: &str = "Modifier";
pub const COL_SUGGESTION: &str = "Suggestion";
pub const COL_LANGUAGE: &str = "Language";
pub const COL_REGION: &str = "Region";
pub const COL_KEYWORD: &str = "Keyword";
pub const COL_SEARCH_VOLUME: &str = "Search Volume";
pub const COL_COST_PER_CLICK: &str = "Cost Per Click";

#[derive(Error, Debug)]
pub enum CsvImportError {
    #[error("Failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read header row: {0}")]
    Headers(#[source] csv::Error),

    #[error("Invalid record at data row {row}: {source}")]
    Record {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// One parsed line of a keyword insight export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRow {
    pub modifier_type: Option<String>,
    pub modifier: Option<String>,
    pub suggestion: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub keyword: Option<String>,
    pub search_volume: Option<i64>,
    pub cost_per_click: Option<f64>,
    /// Base name of the file the row came from
    pub file_source: String,
}

/// Parse an integer cell. Missing, blank and non-numeric values all become `None`.
pub fn parse_optional_i64(value: Option<&str>) -> Option<i64> {
    value.map(str::trim).and_then(|v| v.parse().ok())
}

/// Parse a decimal cell with the same rules as [`parse_optional_i64`].
pub fn parse_optional_f64(value: Option<&str>) -> Option<f64> {
    value.map(str::trim).and_then(|v| v.parse().ok())
}

/// Column positions resolved from the header row
#[derive(Debug, Default)]
struct ColumnIndex {
    modifier_type: Option<usize>,
    modifier: Option<usize>,
    suggestion: Option<usize>,
    language: Option<usize>,
    region: Option<usize>,
    keyword: Option<usize>,
    search_volume: Option<usize>,
    cost_per_click: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        // Later duplicates win, matching dict-style header lookup
        let find = |name: &str| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| *h == name)
                .map(|(i, _)| i)
                .last()
        };
        Self {
            modifier_type: find(COL_MODIFIER_TYPE),
            modifier: find(COL_MODIFIER),
            suggestion: find(COL_SUGGESTION),
            language: find(COL_LANGUAGE),
            region: find(COL_REGION),
            keyword: find(COL_KEYWORD),
            search_volume: find(COL_SEARCH_VOLUME),
            cost_per_click: find(COL_COST_PER_CLICK),
        }
    }
}

fn cell(record: &StringRecord, index: Option<usize>) -> Option<&str> {
    index.and_then(|i| record.get(i))
}

fn text(record: &StringRecord, index: Option<usize>) -> Option<String> {
    cell(record, index).map(str::to_string)
}

/// Reader for comma-separated keyword insight exports (header row required)
pub struct CsvImporter {
    path: PathBuf,
}

impl CsvImporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Base name recorded as `file_source` on every row of this file
    pub fn file_source(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Read every data row of the file.
    ///
    /// This is blocking I/O; async callers should run it under `spawn_blocking`.
    pub fn read_rows(&self) -> Result<Vec<SourceRow>, CsvImportError> {
        let file = File::open(&self.path).map_err(|source| CsvImportError::Open {
            path: self.path.clone(),
            source,
        })?;

        // Short and long rows are allowed; missing cells read as absent
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);

        let headers = reader.headers().map_err(CsvImportError::Headers)?.clone();
        let columns = ColumnIndex::from_headers(&headers);
        debug!(
            "Header of {:?} has {} columns: {:?}",
            self.path,
            headers.len(),
            columns
        );

        let file_source = self.file_source();
        let mut rows = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let record = result.map_err(|source| CsvImportError::Record {
                row: idx + 1,
                source,
            })?;

            rows.push(SourceRow {
                modifier_type: text(&record, columns.modifier_type),
                modifier: text(&record, columns.modifier),
                suggestion: text(&record, columns.suggestion),
                language: text(&record, columns.language),
                region: text(&record, columns.region),
                keyword: text(&record, columns.keyword),
                search_volume: parse_optional_i64(cell(&record, columns.search_volume)),
                cost_per_click: parse_optional_f64(cell(&record, columns.cost_per_click)),
                file_source: file_source.clone(),
            });
        }

        info!("Parsed {} rows from {}", rows.len(), file_source);
        Ok(rows)
    }
}
