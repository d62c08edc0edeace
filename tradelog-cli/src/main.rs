//! TradeLog CLI — convert trade-log exports into yearly statistics documents.
//!
//! Commands:
//! - `convert` — convert one export CSV into a result JSON document
//! - `batch` — convert every export in a directory and print a report
//! - `coins` — list the coins that have a converted document
//! - `extract` — pull one numeric column from several CSVs into a JSON object

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tradelog_core::data::ColumnMap;
use tradelog_core::Stats;
use tradelog_runner::naming::default_output_path;
use tradelog_runner::{
    batch_convert, convert_file, extract_named, list_coins, write_json, BatchReport,
    ColumnSelector, ConvertConfig, FileOutcome,
};

#[derive(Parser)]
#[command(
    name = "tradelog",
    about = "TradeLog CLI — trade-log CSV to yearly statistics JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Header label preset of the export.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Columns {
    Chinese,
    English,
}

impl Columns {
    fn map(self) -> ColumnMap {
        match self {
            Columns::Chinese => ColumnMap::chinese(),
            Columns::English => ColumnMap::english(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one export CSV into a result JSON document.
    Convert {
        /// Export CSV to read.
        input: PathBuf,

        /// Output JSON. Defaults to <stem>-converted.json next to the input.
        output: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Header label preset; overrides the config's [columns].
        #[arg(long, value_enum)]
        columns: Option<Columns>,
    },
    /// Convert every *.csv in a directory to <stem>-trades.json.
    Batch {
        /// Directory of export CSVs. Defaults to the config's, else origin-data.
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Output directory. Defaults to the config's, else converted-data.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List coins with a converted document.
    Coins {
        /// Directory of *-trades.json documents.
        #[arg(long, default_value = "converted-data")]
        dir: PathBuf,
    },
    /// Extract one numeric column from several CSV files.
    Extract {
        /// Named source, e.g. btc=converted-data/btc-trades-compound.csv. Repeatable.
        #[arg(long = "source", value_parser = parse_source, required = true)]
        sources: Vec<(String, PathBuf)>,

        /// Output JSON file.
        #[arg(long, default_value = "converted-data/pnl-percent-arrays.json")]
        output: PathBuf,

        /// Column header to read.
        #[arg(long, conflicts_with = "index")]
        column: Option<String>,

        /// 0-based column position to read. Defaults to 3.
        #[arg(long)]
        index: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            columns,
        } => run_convert(&input, output, config.as_deref(), columns),
        Commands::Batch {
            input_dir,
            output_dir,
            config,
        } => run_batch(input_dir, output_dir, config.as_deref()),
        Commands::Coins { dir } => run_coins(&dir),
        Commands::Extract {
            sources,
            output,
            column,
            index,
        } => run_extract(&sources, &output, column, index),
    }
}

fn load_config(path: Option<&Path>) -> Result<ConvertConfig> {
    match path {
        Some(path) => ConvertConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ConvertConfig::default()),
    }
}

fn parse_source(raw: &str) -> Result<(String, PathBuf), String> {
    match raw.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok((name.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(format!("expected NAME=PATH, got '{raw}'")),
    }
}

fn run_convert(
    input: &Path,
    output: Option<PathBuf>,
    config: Option<&Path>,
    columns: Option<Columns>,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(columns) = columns {
        config.options.columns = columns.map();
    }
    let output = output.unwrap_or_else(|| default_output_path(input));

    let done = convert_file(input, &output, &config.options)
        .with_context(|| format!("converting {}", input.display()))?;

    print_summary(&done.conversion.document.summary.overall_stats);
    if !done.conversion.diagnostics.is_empty() {
        println!();
        println!("--- Diagnostics ---");
        for diagnostic in &done.conversion.diagnostics {
            println!("{diagnostic}");
        }
    }
    println!();
    println!("Saved to {}", done.output.display());
    Ok(())
}

fn run_batch(
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let input_dir = input_dir.unwrap_or(config.batch.input_dir);
    let output_dir = output_dir.unwrap_or(config.batch.output_dir);

    let report = batch_convert(&input_dir, &output_dir, &config.options);
    if report.outcomes.is_empty() {
        println!("No CSV files found in {}", input_dir.display());
        return Ok(());
    }
    print_batch_report(&report);
    Ok(())
}

fn run_coins(dir: &Path) -> Result<()> {
    let coins = list_coins(dir).with_context(|| format!("listing {}", dir.display()))?;
    for coin in coins {
        println!("{coin}");
    }
    Ok(())
}

fn run_extract(
    sources: &[(String, PathBuf)],
    output: &Path,
    column: Option<String>,
    index: Option<usize>,
) -> Result<()> {
    let selector = match (column, index) {
        (Some(name), None) => ColumnSelector::Name(name),
        (None, Some(i)) => ColumnSelector::Index(i),
        (None, None) => ColumnSelector::default(),
        (Some(_), Some(_)) => bail!("--column and --index are mutually exclusive"),
    };

    let arrays = extract_named(sources, &selector)?;
    write_json(&arrays, output)?;

    println!("Written {}", output.display());
    for (name, values) in &arrays {
        println!("{:<8} count={}", name.to_uppercase(), values.len());
    }
    Ok(())
}

fn print_summary(stats: &Stats) {
    println!();
    println!("=== Conversion Result ===");
    println!("Trades:         {}", stats.total_trades);
    println!(
        "Long:           {} (win rate {}%)",
        stats.long_trades, stats.long_win_rate
    );
    println!(
        "Short:          {} (win rate {}%)",
        stats.short_trades, stats.short_win_rate
    );
    println!("Total P&L:      {:.2} USDT", stats.total_pnl);
    println!("Return:         {}%", stats.total_return_rate);
}

fn print_batch_report(report: &BatchReport) {
    println!();
    println!("=== Batch Report ===");
    println!("Succeeded:      {}", report.succeeded());
    println!("Failed:         {}", report.failed());

    if report.succeeded() > 0 {
        println!();
        println!("--- Converted ---");
        for outcome in &report.outcomes {
            if let FileOutcome::Converted { file, stats, .. } = outcome {
                println!("{file}:");
                println!(
                    "  trades {}, P&L {:.2} USDT, return {}%",
                    stats.total_trades, stats.total_pnl, stats.total_return_rate
                );
                println!(
                    "  long win rate {}%, short win rate {}%",
                    stats.long_win_rate, stats.short_win_rate
                );
            }
        }
    }

    if report.failed() > 0 {
        println!();
        println!("--- Failed ---");
        for outcome in &report.outcomes {
            if let FileOutcome::Failed { file, error } = outcome {
                println!("{file}: {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_splits_on_first_equals() {
        let (name, path) = parse_source("btc=data/a=b.csv").unwrap();
        assert_eq!(name, "btc");
        assert_eq!(path, PathBuf::from("data/a=b.csv"));
    }

    #[test]
    fn source_requires_name_and_path() {
        assert!(parse_source("btc").is_err());
        assert!(parse_source("=x.csv").is_err());
        assert!(parse_source("btc=").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
