//! Batch driver: convert every export in a directory.
//!
//! Each file is converted independently; one failure is recorded in the
//! report and the batch moves on.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tradelog_core::{ConvertOptions, Stats};

use crate::convert::convert_file;
use crate::naming::{output_name, CSV_SUFFIX};

/// Headline numbers of one converted file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    pub total_trades: usize,
    pub total_pnl: f64,
    pub total_return_rate: f64,
    pub long_win_rate: f64,
    pub short_win_rate: f64,
}

impl BatchStats {
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            total_trades: stats.total_trades,
            total_pnl: stats.total_pnl,
            total_return_rate: stats.total_return_rate,
            long_win_rate: stats.long_win_rate,
            short_win_rate: stats.short_win_rate,
        }
    }
}

/// Result for a single input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Converted {
        file: String,
        output: PathBuf,
        stats: BatchStats,
        diagnostics: usize,
    },
    Failed {
        file: String,
        error: String,
    },
}

impl FileOutcome {
    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Converted { file, .. } | FileOutcome::Failed { file, .. } => file,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Converted { .. })
    }
}

/// Per-file outcomes in file-name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Names of the `.csv` files directly inside `dir`, sorted.
pub fn discover_exports(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // `Path::is_file` follows symlinks; `DirEntry::file_type` does not.
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(CSV_SUFFIX) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Convert each export in `input_dir` to `<output_dir>/<stem>-trades.json`.
///
/// An unreadable input directory yields an empty report.
pub fn batch_convert(input_dir: &Path, output_dir: &Path, opts: &ConvertOptions) -> BatchReport {
    let names = match discover_exports(input_dir) {
        Ok(names) => names,
        Err(e) => {
            tracing::error!(dir = %input_dir.display(), "cannot read input directory: {e}");
            return BatchReport::default();
        }
    };
    tracing::info!(files = names.len(), dir = %input_dir.display(), "found exports");

    if let Err(e) = std::fs::create_dir_all(output_dir) {
        tracing::error!(dir = %output_dir.display(), "cannot create output directory: {e}");
        let outcomes = names
            .into_iter()
            .map(|file| FileOutcome::Failed {
                file,
                error: format!("create output directory {}: {e}", output_dir.display()),
            })
            .collect();
        return BatchReport { outcomes };
    }

    let outcomes = names
        .into_iter()
        .map(|file| {
            let input = input_dir.join(&file);
            let output = output_dir.join(output_name(&file));
            match convert_file(&input, &output, opts) {
                Ok(done) => FileOutcome::Converted {
                    stats: BatchStats::from_stats(&done.conversion.document.summary.overall_stats),
                    diagnostics: done.conversion.diagnostics.len(),
                    output,
                    file,
                },
                Err(e) => {
                    tracing::error!(file = %file, "conversion failed: {e}");
                    FileOutcome::Failed {
                        file,
                        error: e.to_string(),
                    }
                }
            }
        })
        .collect();

    BatchReport { outcomes }
}
