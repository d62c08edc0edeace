//! Header contract — which export columns the engine reads and how the type
//! column is classified.
//!
//! Header labels depend on the export tool and its locale, so they are
//! configuration. They are resolved to positions once per file by
//! [`ColumnIndex::resolve`]; nothing downstream uses fixed positions.

use serde::{Deserialize, Serialize};

use crate::domain::{LegKind, PositionSide};
use crate::error::{CoreError, RowFault};

/// The columns the engine needs from an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    TradeNum,
    TradeType,
    DateTime,
    Signal,
    Price,
    Pnl,
    PnlPercent,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::TradeNum,
        Column::TradeType,
        Column::DateTime,
        Column::Signal,
        Column::Price,
        Column::Pnl,
        Column::PnlPercent,
    ];
}

/// Header labels for each [`Column`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub trade_num: String,
    #[serde(rename = "type")]
    pub trade_type: String,
    pub date_time: String,
    pub signal: String,
    pub price: String,
    pub pnl: String,
    pub pnl_percent: String,
}

impl ColumnMap {
    /// Labels of the Chinese-locale TradingView export.
    pub fn chinese() -> Self {
        Self {
            trade_num: "交易 #".into(),
            trade_type: "类型".into(),
            date_time: "日期/时间".into(),
            signal: "信号".into(),
            price: "价格 USDT".into(),
            pnl: "净损益 USDT".into(),
            pnl_percent: "净损益 %".into(),
        }
    }

    /// Labels of the English-locale TradingView export.
    pub fn english() -> Self {
        Self {
            trade_num: "Trade #".into(),
            trade_type: "Type".into(),
            date_time: "Date/Time".into(),
            signal: "Signal".into(),
            price: "Price USDT".into(),
            pnl: "Net P&L USDT".into(),
            pnl_percent: "Net P&L %".into(),
        }
    }

    pub fn label(&self, column: Column) -> &str {
        match column {
            Column::TradeNum => &self.trade_num,
            Column::TradeType => &self.trade_type,
            Column::DateTime => &self.date_time,
            Column::Signal => &self.signal,
            Column::Price => &self.price,
            Column::Pnl => &self.pnl,
            Column::PnlPercent => &self.pnl_percent,
        }
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::chinese()
    }
}

/// Substrings that classify the type column.
///
/// ASCII keywords match case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeKeywords {
    pub entry: Vec<String>,
    pub exit: Vec<String>,
    pub long: Vec<String>,
    pub short: Vec<String>,
}

impl Default for TypeKeywords {
    fn default() -> Self {
        Self {
            entry: vec!["进场".into(), "entry".into()],
            exit: vec!["出场".into(), "exit".into()],
            long: vec!["多头".into(), "long".into()],
            short: vec!["空头".into(), "short".into()],
        }
    }
}

impl TypeKeywords {
    /// Classify a type cell into its leg kind and position side.
    pub fn classify(&self, type_text: &str) -> Result<(LegKind, PositionSide), RowFault> {
        let text = type_text.to_lowercase();
        let has = |keys: &[String]| {
            keys.iter()
                .any(|k| !k.is_empty() && text.contains(&k.to_lowercase()))
        };

        let kind = match (has(&self.entry), has(&self.exit)) {
            (true, false) => LegKind::Entry,
            (false, true) => LegKind::Exit,
            (true, true) => return Err(RowFault::AmbiguousKind(type_text.to_string())),
            (false, false) => return Err(RowFault::UnknownKind(type_text.to_string())),
        };

        let side = if has(&self.long) {
            PositionSide::Long
        } else if has(&self.short) {
            PositionSide::Short
        } else {
            return Err(RowFault::UnknownSide(type_text.to_string()));
        };

        Ok((kind, side))
    }
}

/// Positions of every [`Column`] within one file's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: [usize; 7],
}

impl ColumnIndex {
    /// Resolve all labels against a header row. The first matching header
    /// wins; a missing label fails the whole file.
    pub fn resolve(headers: &[String], map: &ColumnMap) -> Result<Self, CoreError> {
        let normalized: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();

        let mut positions = [0usize; 7];
        for (slot, column) in positions.iter_mut().zip(Column::ALL) {
            let label = map.label(column).trim();
            *slot = normalized
                .iter()
                .position(|h| *h == label)
                .ok_or_else(|| CoreError::MissingColumn {
                    column: label.to_string(),
                })?;
        }
        Ok(Self { positions })
    }

    pub fn position(&self, column: Column) -> usize {
        self.positions[column as usize]
    }

    /// The cell for `column`, or `""` when the row is short.
    pub fn cell<'a>(&self, fields: &'a [String], column: Column) -> &'a str {
        fields
            .get(self.position(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}
