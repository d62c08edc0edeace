//! Yearly statistics — pure functions over completed trades.
//!
//! Sums run on full-precision values; rounding to 2 decimals happens once, as
//! the last step of building each [`Stats`].

use std::collections::BTreeMap;

use crate::domain::CompletedTrade;
use crate::schema::{Stats, YearBucket, YearlyData};

/// Notional capital the return rate is measured against.
pub const DEFAULT_BASE_CAPITAL: f64 = 10_000.0;

/// Round to 2 decimals the way the dashboard's `toFixed(2)` does, normalising
/// `-0.0` to `0.0`.
///
/// The exact binary value is rounded, so `0.015` (stored just below) becomes
/// `0.01`. Exact halves such as `0.125` round away from zero.
pub fn round2(value: f64) -> f64 {
    let magnitude = value.abs();
    let exact_half = (magnitude * 8.0).fract() == 0.0 && (magnitude * 4.0).fract() != 0.0;
    let rounded = if exact_half {
        (magnitude * 100.0).round() / 100.0
    } else {
        format!("{magnitude:.2}").parse().unwrap_or(magnitude)
    };
    if rounded == 0.0 {
        0.0
    } else if value < 0.0 {
        -rounded
    } else {
        rounded
    }
}

/// Wins as a percent of `count`, or 0 when `count` is 0. Unrounded.
pub fn win_rate(wins: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    wins as f64 / count as f64 * 100.0
}

/// P&L as a percent of `base_capital`, or 0 for a non-positive base. Unrounded.
pub fn return_rate(pnl: f64, base_capital: f64) -> f64 {
    if base_capital <= 0.0 {
        return 0.0;
    }
    pnl / base_capital * 100.0
}

/// Win/loss split of one side: `(wins, losses, pnl)`. P&L of exactly 0 is a loss.
fn side_totals(trades: &[CompletedTrade]) -> (usize, usize, f64) {
    let wins = trades.iter().filter(|t| t.is_winner()).count();
    let pnl = trades.iter().map(|t| t.pnl).sum();
    (wins, trades.len() - wins, pnl)
}

impl Stats {
    /// Compute the statistics of one bucket from its long and short trades.
    pub fn from_trades(
        long: &[CompletedTrade],
        short: &[CompletedTrade],
        base_capital: f64,
    ) -> Self {
        let (long_wins, long_losses, long_pnl) = side_totals(long);
        let (short_wins, short_losses, short_pnl) = side_totals(short);
        let total_pnl = long_pnl + short_pnl;

        Self {
            total_trades: long.len() + short.len(),
            long_trades: long.len(),
            short_trades: short.len(),
            long_wins,
            long_losses,
            short_wins,
            short_losses,
            total_pnl: round2(total_pnl),
            long_pnl: round2(long_pnl),
            short_pnl: round2(short_pnl),
            long_win_rate: round2(win_rate(long_wins, long.len())),
            short_win_rate: round2(win_rate(short_wins, short.len())),
            total_return_rate: round2(return_rate(total_pnl, base_capital)),
        }
    }
}

/// Group trades by exit year, keeping their given order within each bucket.
pub fn group_by_year(trades: &[CompletedTrade], base_capital: f64) -> YearlyData {
    let mut by_year: BTreeMap<i32, Vec<CompletedTrade>> = BTreeMap::new();
    for trade in trades {
        by_year.entry(trade.exit_year()).or_default().push(trade.clone());
    }

    by_year
        .into_iter()
        .map(|(year, trades)| {
            let (long_trades, short_trades): (Vec<_>, Vec<_>) = trades
                .iter()
                .cloned()
                .partition(|t| t.position.is_long());
            let stats = Stats::from_trades(&long_trades, &short_trades, base_capital);
            let bucket = YearBucket {
                year,
                trades,
                long_trades,
                short_trades,
                stats,
            };
            (year_key(year), bucket)
        })
        .collect()
}

/// Sum the per-year statistics into one overall block.
///
/// Counts and P&L are added from the buckets as stored; rates are derived
/// from those sums afterwards.
pub fn roll_up(yearly: &YearlyData, base_capital: f64) -> Stats {
    let mut overall = Stats::default();
    for bucket in yearly.values() {
        let s = &bucket.stats;
        overall.total_trades += s.total_trades;
        overall.long_trades += s.long_trades;
        overall.short_trades += s.short_trades;
        overall.long_wins += s.long_wins;
        overall.long_losses += s.long_losses;
        overall.short_wins += s.short_wins;
        overall.short_losses += s.short_losses;
        overall.total_pnl += s.total_pnl;
        overall.long_pnl += s.long_pnl;
        overall.short_pnl += s.short_pnl;
    }

    overall.long_win_rate = round2(win_rate(overall.long_wins, overall.long_trades));
    overall.short_win_rate = round2(win_rate(overall.short_wins, overall.short_trades));
    overall.total_return_rate = round2(return_rate(overall.total_pnl, base_capital));
    overall.total_pnl = round2(overall.total_pnl);
    overall.long_pnl = round2(overall.long_pnl);
    overall.short_pnl = round2(overall.short_pnl);
    overall
}

/// Bucket key for a year: zero-padded to 4 digits so keys sort chronologically.
pub fn year_key(year: i32) -> String {
    format!("{year:04}")
}
