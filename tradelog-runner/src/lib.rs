//! TradeLog Runner — file-level operations on top of `tradelog-core`.
//!
//! This crate provides:
//! - TOML configuration for conversions and batch directories
//! - Single-file conversion with pretty JSON output
//! - Batch conversion of a directory of exports with a per-file report
//! - Coin listing over converted documents
//! - Numeric column extraction from CSV files

pub mod batch;
pub mod coins;
pub mod config;
pub mod convert;
pub mod extract;
pub mod naming;

pub use batch::{batch_convert, BatchReport, BatchStats, FileOutcome};
pub use coins::list_coins;
pub use config::{BatchDirs, ConfigError, ConvertConfig};
pub use convert::{convert_file, ConvertError, FileConversion};
pub use extract::{extract_column, extract_named, write_json, ColumnSelector, ExtractError};
