//! Trade pairing — merges entry and exit rows into completed trades.
//!
//! Rows are joined on the trade number. The join map is local to one call.
//! Pure function: rows + header index + keywords → trades and diagnostics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::data::{parse_number, parse_trade_num, Column, ColumnIndex, DataRow, TypeKeywords};
use crate::domain::{CompletedTrade, EntryLeg, ExitLeg, Leg, LegKind, Timestamp, TradeNum};
use crate::error::{CoreError, RowFault};

/// What to do with a row that cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Fail the whole file.
    #[default]
    Abort,
    /// Drop the row and record a diagnostic.
    Skip,
}

/// Which leg a dropped trade was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingLeg {
    Entry,
    Exit,
}

/// Non-fatal findings of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Only one leg was seen for this trade number; the trade was dropped.
    Unpaired {
        trade_num: TradeNum,
        missing: MissingLeg,
    },
    /// The row was unreadable and skipped under [`RowPolicy::Skip`].
    SkippedRow { line: usize, fault: RowFault },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unpaired { trade_num, missing } => {
                let leg = match missing {
                    MissingLeg::Entry => "entry",
                    MissingLeg::Exit => "exit",
                };
                write!(f, "trade #{trade_num} has no {leg} row; dropped")
            }
            Diagnostic::SkippedRow { line, fault } => write!(f, "line {line} skipped: {fault}"),
        }
    }
}

/// Output of [`pair_trades`].
#[derive(Debug, Clone, Default)]
pub struct Pairing {
    /// Completed trades, ascending by trade number.
    pub trades: Vec<CompletedTrade>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Default)]
struct PartialPair {
    entry: Option<EntryLeg>,
    exit: Option<ExitLeg>,
}

/// Pair entry and exit rows by trade number.
///
/// A later leg of the same kind replaces an earlier one. Trade numbers with a
/// single leg are reported as [`Diagnostic::Unpaired`] and never emitted.
pub fn pair_trades(
    rows: &[DataRow],
    index: &ColumnIndex,
    keywords: &TypeKeywords,
    policy: RowPolicy,
) -> Result<Pairing, CoreError> {
    let mut pairs: BTreeMap<TradeNum, PartialPair> = BTreeMap::new();
    let mut diagnostics = Vec::new();

    for row in rows {
        let leg = match read_leg(&row.fields, index, keywords) {
            Ok(leg) => leg,
            Err(fault) => match policy {
                RowPolicy::Abort => {
                    return Err(CoreError::MalformedRow {
                        line: row.line,
                        fault,
                    })
                }
                RowPolicy::Skip => {
                    tracing::warn!(line = row.line, %fault, "skipping malformed row");
                    diagnostics.push(Diagnostic::SkippedRow {
                        line: row.line,
                        fault,
                    });
                    continue;
                }
            },
        };

        let slot = pairs.entry(leg.trade_num()).or_default();
        match leg {
            Leg::Entry(entry) => slot.entry = Some(entry),
            Leg::Exit(exit) => slot.exit = Some(exit),
        }
    }

    // BTreeMap iteration is already ascending by trade number.
    let mut trades = Vec::with_capacity(pairs.len());
    for (trade_num, pair) in pairs {
        match (pair.entry, pair.exit) {
            (Some(entry), Some(exit)) => {
                if entry.side != exit.side {
                    tracing::warn!(
                        trade_num,
                        entry_side = %entry.side,
                        exit_side = %exit.side,
                        "entry and exit disagree on side; keeping entry side"
                    );
                }
                trades.push(CompletedTrade::from_legs(entry, exit));
            }
            (entry, _) => {
                let missing = if entry.is_none() {
                    MissingLeg::Entry
                } else {
                    MissingLeg::Exit
                };
                let diagnostic = Diagnostic::Unpaired { trade_num, missing };
                tracing::warn!("{diagnostic}");
                diagnostics.push(diagnostic);
            }
        }
    }

    Ok(Pairing {
        trades,
        diagnostics,
    })
}

/// Read one row into a leg. Exit legs require both P&L cells.
fn read_leg(
    fields: &[String],
    index: &ColumnIndex,
    keywords: &TypeKeywords,
) -> Result<Leg, RowFault> {
    let raw_num = index.cell(fields, Column::TradeNum);
    let trade_num =
        parse_trade_num(raw_num).ok_or_else(|| RowFault::TradeNum(raw_num.to_string()))?;

    let (kind, side) = keywords.classify(index.cell(fields, Column::TradeType))?;

    let raw_time = index.cell(fields, Column::DateTime);
    let time =
        Timestamp::parse(raw_time).ok_or_else(|| RowFault::Timestamp(raw_time.to_string()))?;

    let signal = index.cell(fields, Column::Signal).to_string();
    let price = number(fields, index, Column::Price, "price")?;

    Ok(match kind {
        LegKind::Entry => Leg::Entry(EntryLeg {
            trade_num,
            side,
            time,
            signal,
            price,
        }),
        LegKind::Exit => Leg::Exit(ExitLeg {
            trade_num,
            side,
            time,
            signal,
            price,
            pnl: number(fields, index, Column::Pnl, "P&L")?,
            pnl_percent: number(fields, index, Column::PnlPercent, "P&L %")?,
        }),
    })
}

fn number(
    fields: &[String],
    index: &ColumnIndex,
    column: Column,
    field: &'static str,
) -> Result<f64, RowFault> {
    let raw = index.cell(fields, column);
    parse_number(raw).ok_or_else(|| RowFault::Number {
        field,
        value: raw.to_string(),
    })
}
