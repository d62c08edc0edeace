//! Legs and completed round-trip trades.

use super::side::PositionSide;
use super::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Join key shared by the entry and exit rows of one trade.
pub type TradeNum = u32;

/// The row that opened a position.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryLeg {
    pub trade_num: TradeNum,
    pub side: PositionSide,
    pub time: Timestamp,
    pub signal: String,
    pub price: f64,
}

/// The row that closed a position, carrying the realized P&L.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitLeg {
    pub trade_num: TradeNum,
    pub side: PositionSide,
    pub time: Timestamp,
    pub signal: String,
    pub price: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
}

/// Whether a row opens or closes a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegKind {
    Entry,
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Leg {
    Entry(EntryLeg),
    Exit(ExitLeg),
}

impl Leg {
    pub fn trade_num(&self) -> TradeNum {
        match self {
            Leg::Entry(e) => e.trade_num,
            Leg::Exit(x) => x.trade_num,
        }
    }
}

/// A matched entry + exit pair.
///
/// Only built by the pairing step once both legs have been seen; the side is
/// the entry leg's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTrade {
    pub trade_num: TradeNum,
    pub position: PositionSide,

    // ── Entry ──
    pub entry_date: Timestamp,
    pub entry_price: f64,
    pub entry_signal: String,

    // ── Exit ──
    pub exit_date: Timestamp,
    pub exit_price: f64,
    pub exit_signal: String,

    // ── PnL ──
    pub pnl: f64,
    pub pnl_percent: f64,
}

impl CompletedTrade {
    pub fn from_legs(entry: EntryLeg, exit: ExitLeg) -> Self {
        Self {
            trade_num: entry.trade_num,
            position: entry.side,
            entry_date: entry.time,
            entry_price: entry.price,
            entry_signal: entry.signal,
            exit_date: exit.time,
            exit_price: exit.price,
            exit_signal: exit.signal,
            pnl: exit.pnl,
            pnl_percent: exit.pnl_percent,
        }
    }

    /// A zero P&L is a loss.
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }

    pub fn exit_year(&self) -> i32 {
        self.exit_date.year()
    }
}
