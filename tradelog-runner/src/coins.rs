//! Coin listing over a directory of converted documents.

use std::path::Path;

use crate::naming::coin_name;

/// Base names of the `*-trades.json` files in `dir`, sorted.
pub fn list_coins(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut coins = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        if let Some(coin) = file_name.to_str().and_then(coin_name) {
            coins.push(coin.to_string());
        }
    }
    coins.sort();
    Ok(coins)
}
