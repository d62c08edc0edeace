//! Output file naming shared by the batch driver and the coin listing.

use std::path::{Path, PathBuf};

/// Suffix of batch-converted result documents.
pub const TRADES_SUFFIX: &str = "-trades.json";

/// Suffix of exports picked up by the batch driver.
pub const CSV_SUFFIX: &str = ".csv";

/// `btc.csv` → `btc-trades.json`.
pub fn output_name(csv_file_name: &str) -> String {
    let stem = csv_file_name
        .strip_suffix(CSV_SUFFIX)
        .unwrap_or(csv_file_name);
    format!("{stem}{TRADES_SUFFIX}")
}

/// `btc-trades.json` → `Some("btc")`.
pub fn coin_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(TRADES_SUFFIX)
        .filter(|stem| !stem.is_empty())
}

/// Default destination of a single conversion: `<dir>/<stem>-converted.json`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trades".to_string());
    input.with_file_name(format!("{stem}-converted.json"))
}
