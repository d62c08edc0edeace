//! TradeLog Core — trade pairing and yearly statistics for broker trade logs.
//!
//! This crate is the pure part of the converter:
//! - Domain types (sides, timestamps, legs, completed trades)
//! - Export parsing (quote-aware line splitting, header resolution by label)
//! - Entry/exit pairing keyed by trade number
//! - Per-year statistics and the overall roll-up
//! - The result document the dashboard consumes
//!
//! No file or network I/O happens here; see `tradelog-runner` for that.

pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod schema;

pub use engine::{
    analyze, convert_str, Analysis, Conversion, ConvertOptions, Diagnostic, RowPolicy,
};
pub use error::{CoreError, RowFault};
pub use schema::{ResultDocument, Stats, Summary, YearBucket, YearlyData};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: conversion types can cross threads, so independent
    /// conversions may run side by side.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::CompletedTrade>();
        require_sync::<domain::CompletedTrade>();
        require_send::<ConvertOptions>();
        require_sync::<ConvertOptions>();
        require_send::<ResultDocument>();
        require_sync::<ResultDocument>();
        require_send::<Conversion>();
        require_sync::<Conversion>();
        require_send::<CoreError>();
        require_sync::<CoreError>();
    }

    #[test]
    fn options_default_to_chinese_export() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.columns.trade_num, "交易 #");
        assert_eq!(opts.base_capital, 10_000.0);
        assert_eq!(opts.row_policy, RowPolicy::Abort);
    }
}
