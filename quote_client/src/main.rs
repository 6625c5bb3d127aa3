//! Quote Client — polls the lookup server for the latest quote of a set of symbols and
//! logs each answer. Symbols come from a text file, from `--sym`, or both.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client --server http://192.168.0.10:8000 --path ./symbols.txt --sym sbux
//! ```
//!
//! The symbol file should contain symbols separated by commas, spaces, or new lines.
#![warn(missing_docs)]
mod args;
mod fetcher;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use log::{info, warn};
use quote_common::symbol::SymbolParser;
use quote_common::{QuoteError, Result, Symbol};

use crate::args::Args;
use crate::fetcher::{LookupClient, run_lookup_loop};

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| QuoteError::Io(std::io::Error::other(e.to_string())))?;
    }

    let symbols = collect_symbols(&args)?;
    if symbols.is_empty() {
        warn!("No symbols given; use --sym or --path.");
        return Ok(());
    }
    info!("Symbols: {:?}", symbols.iter().map(Symbol::as_str).collect::<Vec<_>>());

    let client = LookupClient::new(&args.server)?;
    info!("Client is running against {}. Press Ctrl+C to exit.", args.server);
    run_lookup_loop(
        &client,
        &symbols,
        Duration::from_millis(args.interval_ms),
        args.once,
        shutdown,
    );
    Ok(())
}

/// Symbols from the file (if any) followed by `--sym` values, without duplicates.
fn collect_symbols(args: &Args) -> Result<Vec<Symbol>> {
    let mut symbols = match &args.path {
        Some(raw) => {
            let path = normalize_path(raw);
            if !is_file_exist(&path) {
                return Err(QuoteError::ParseSymbolsFile(format!("{} is not a file", path.display())));
            }
            Symbol::parse_from_file(BufReader::new(File::open(&path)?))?
        }
        None => Vec::new(),
    };
    for raw in &args.symbols {
        let symbol = Symbol::parse(raw)?;
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    Ok(symbols)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_strips_quotes() {
        assert_eq!(normalize_path("  \"C:\\data\\s.txt\" "), PathBuf::from("C:\\data\\s.txt"));
        assert_eq!(normalize_path("plain.txt"), PathBuf::from("plain.txt"));
    }

    #[test]
    fn cli_symbols_are_normalized_and_deduplicated() {
        let args = Args::try_parse_from(["quote_client", "--sym", "sbux", "--sym", "SBUX", "--sym", "msft"]).unwrap();
        let symbols = collect_symbols(&args).unwrap();
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["SBUX", "MSFT"]);
    }

    #[test]
    fn missing_symbols_file_is_reported() {
        let args = Args::try_parse_from(["quote_client", "--path", "/definitely/not/here.txt"]).unwrap();
        assert!(matches!(collect_symbols(&args), Err(QuoteError::ParseSymbolsFile(_))));
    }
}
