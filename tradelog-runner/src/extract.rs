//! Column extraction: pull one numeric column out of several CSV files into a
//! single JSON object of arrays, keyed by a short name per file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column read when none is named.
pub const DEFAULT_COLUMN_INDEX: usize = 3;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no column named '{column}'")]
    NoSuchColumn { path: PathBuf, column: String },

    #[error("serialize arrays: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which column to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// 0-based position; every row is a candidate, so a header is skipped
    /// because it does not parse.
    Index(usize),
    /// Header label; the first row is the header.
    Name(String),
}

impl Default for ColumnSelector {
    fn default() -> Self {
        ColumnSelector::Index(DEFAULT_COLUMN_INDEX)
    }
}

/// Numeric values of one column, in file order. Cells that do not parse as
/// a number are skipped.
pub fn extract_column(path: &Path, selector: &ColumnSelector) -> Result<Vec<f64>, ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    let csv_err = |source| ExtractError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut records = reader.records();
    let position = match selector {
        ColumnSelector::Index(i) => *i,
        ColumnSelector::Name(name) => {
            let header = match records.next() {
                Some(record) => record.map_err(csv_err)?,
                None => return Ok(Vec::new()),
            };
            header
                .iter()
                .position(|label| label.trim_start_matches('\u{feff}') == name)
                .ok_or_else(|| ExtractError::NoSuchColumn {
                    path: path.to_path_buf(),
                    column: name.clone(),
                })?
        }
    };

    let mut values = Vec::new();
    for record in records {
        let record = record.map_err(csv_err)?;
        if let Some(value) = record.get(position).and_then(|cell| cell.parse::<f64>().ok()) {
            if value.is_finite() {
                values.push(value);
            }
        }
    }
    tracing::debug!(path = %path.display(), count = values.len(), "extracted column");
    Ok(values)
}

/// Extract the same column from each `(name, path)` source.
///
/// Fails on the first missing or unreadable file.
pub fn extract_named(
    sources: &[(String, PathBuf)],
    selector: &ColumnSelector,
) -> Result<BTreeMap<String, Vec<f64>>, ExtractError> {
    let mut arrays = BTreeMap::new();
    for (name, path) in sources {
        arrays.insert(name.clone(), extract_column(path, selector)?);
    }
    Ok(arrays)
}

/// Write the arrays as pretty JSON.
pub fn write_json(arrays: &BTreeMap<String, Vec<f64>>, output: &Path) -> Result<(), ExtractError> {
    let json = serde_json::to_string_pretty(arrays)?;
    std::fs::write(output, json).map_err(|source| ExtractError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    tracing::info!(output = %output.display(), sources = arrays.len(), "wrote arrays");
    Ok(())
}
