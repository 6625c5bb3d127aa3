//! Command-line arguments for the Quote Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use quote_common::net::HTTP_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the quote server.
    #[clap(long, default_value_t = format!("http://127.0.0.1:{}", HTTP_PORT))]
    pub server: String,

    /// Path to a text file with symbols to look up.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub path: Option<String>,

    /// Symbol to look up; may be repeated.
    #[clap(long = "sym")]
    pub symbols: Vec<String>,

    /// Delay between lookup rounds in milliseconds.
    #[clap(long, default_value_t = 15_000)]
    pub interval_ms: u64,

    /// Run a single round and exit.
    #[clap(long)]
    pub once: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_sym_and_defaults() {
        let args = Args::try_parse_from(["quote_client", "--sym", "sbux", "--sym", "aapl"]).unwrap();
        assert_eq!(args.symbols, vec!["sbux", "aapl"]);
        assert_eq!(args.server, "http://127.0.0.1:8000");
        assert_eq!(args.interval_ms, 15_000);
        assert!(args.path.is_none());
        assert!(!args.once);
    }
}
