//! Conversion engine — export text in, result document out.
//!
//! The pipeline is strictly sequential:
//!
//! 1. Split: header row + data rows
//! 2. Resolve: header labels → column positions
//! 3. Pair: entry/exit rows → completed trades (ascending trade number)
//! 4. Aggregate: completed trades → year buckets with stats
//! 5. Roll up: year buckets → overall stats
//! 6. Assemble: result document stamped with the generation time

pub mod aggregate;
pub mod document;
pub mod pairing;

pub use aggregate::{group_by_year, roll_up, round2, DEFAULT_BASE_CAPITAL};
pub use document::{assemble, assemble_at};
pub use pairing::{pair_trades, Diagnostic, MissingLeg, Pairing, RowPolicy};

use serde::{Deserialize, Serialize};

use crate::data::{split_export, ColumnIndex, ColumnMap, TypeKeywords};
use crate::error::CoreError;
use crate::schema::{ResultDocument, Stats, YearlyData};

/// Everything that varies between exports and deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub columns: ColumnMap,
    pub keywords: TypeKeywords,
    pub base_capital: f64,
    pub row_policy: RowPolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            keywords: TypeKeywords::default(),
            base_capital: DEFAULT_BASE_CAPITAL,
            row_policy: RowPolicy::default(),
        }
    }
}

/// Pipeline output before the document is stamped.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub yearly: YearlyData,
    pub overall: Stats,
    pub diagnostics: Vec<Diagnostic>,
}

/// A finished conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: ResultDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run steps 1–5 over export text.
///
/// Text without a header line yields an empty analysis.
pub fn analyze(content: &str, opts: &ConvertOptions) -> Result<Analysis, CoreError> {
    let Some(split) = split_export(content) else {
        return Ok(Analysis::default());
    };
    tracing::debug!(headers = ?split.headers, rows = split.rows.len(), "split export");

    let index = ColumnIndex::resolve(&split.headers, &opts.columns)?;
    let pairing = pair_trades(&split.rows, &index, &opts.keywords, opts.row_policy)?;
    tracing::info!(
        trades = pairing.trades.len(),
        diagnostics = pairing.diagnostics.len(),
        "paired completed trades"
    );

    let yearly = group_by_year(&pairing.trades, opts.base_capital);
    let overall = roll_up(&yearly, opts.base_capital);

    Ok(Analysis {
        yearly,
        overall,
        diagnostics: pairing.diagnostics,
    })
}

/// Convert export text into a result document stamped with the current time.
pub fn convert_str(content: &str, opts: &ConvertOptions) -> Result<Conversion, CoreError> {
    let analysis = analyze(content, opts)?;
    Ok(Conversion {
        document: assemble(analysis.yearly, analysis.overall),
        diagnostics: analysis.diagnostics,
    })
}
