//! Single-file conversion: export CSV on disk → result JSON on disk.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tradelog_core::{convert_str, Conversion, ConvertOptions, CoreError};

/// Errors from converting one file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Core {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("serialize result document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A conversion that has been written to disk.
#[derive(Debug, Clone)]
pub struct FileConversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub conversion: Conversion,
}

/// Read `input`, convert it, and write the pretty-printed document to `output`.
///
/// The output's parent directory must already exist.
pub fn convert_file(
    input: &Path,
    output: &Path,
    opts: &ConvertOptions,
) -> Result<FileConversion, ConvertError> {
    if !input.is_file() {
        return Err(ConvertError::InputNotFound(input.to_path_buf()));
    }
    tracing::info!(input = %input.display(), "reading export");

    let content = std::fs::read_to_string(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let conversion = convert_str(&content, opts).map_err(|source| ConvertError::Core {
        path: input.to_path_buf(),
        source,
    })?;
    for diagnostic in &conversion.diagnostics {
        tracing::warn!(input = %input.display(), "{diagnostic}");
    }

    let json = serde_json::to_string_pretty(&conversion.document)?;
    std::fs::write(output, json).map_err(|source| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    tracing::info!(
        output = %output.display(),
        trades = conversion.document.summary.overall_stats.total_trades,
        "wrote result document"
    );

    Ok(FileConversion {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        conversion,
    })
}
