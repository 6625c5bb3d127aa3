//! Ticker symbols and helpers shared between client and server.
//!
//! A `Symbol` is always stored in its normalized form (trimmed, ASCII uppercase), so
//! `sbux`, ` SBUX ` and `SBUX` all name the same cache entry.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Normalized ticker symbol.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Normalizes `raw` into a symbol.
    ///
    /// Returns `QuoteError::SymbolRequired` when nothing but whitespace is left, and
    /// `QuoteError::InvalidSymbol` for `.`/`..`-style names, which would be read as
    /// relative path segments when placed in a provider URL.
    pub fn parse(raw: &str) -> Result<Self, QuoteError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuoteError::SymbolRequired);
        }
        if trimmed.chars().all(|c| c == '.') {
            return Err(QuoteError::InvalidSymbol(trimmed.to_string()));
        }
        Ok(Symbol(trimmed.to_ascii_uppercase()))
    }

    /// Normalized text of the symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait providing file parsing for symbols.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, spaces or new lines; empty tokens are
    /// skipped. Duplicates are kept in first-seen order only once.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Symbol>, QuoteError>;
}

impl SymbolParser for Symbol {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, QuoteError> {
        let mut symbols: Vec<Symbol> = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(QuoteError::Io)?;
            for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                let symbol = Symbol::parse(token)
                    .map_err(|e| QuoteError::ParseSymbolsFile(format!("{token:?}: {e}")))?;
                if !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
            }
        }
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_uppercases_and_trims() {
        let symbol = Symbol::parse("  sbux ").unwrap();
        assert_eq!(symbol.as_str(), "SBUX");
        assert_eq!(symbol, Symbol::parse("SBUX").unwrap());
    }

    #[test]
    fn blank_input_requires_a_symbol() {
        assert!(matches!(Symbol::parse(""), Err(QuoteError::SymbolRequired)));
        assert!(matches!(Symbol::parse("   "), Err(QuoteError::SymbolRequired)));
    }

    #[test]
    fn dot_only_names_are_rejected() {
        for raw in [".", "..", " ... "] {
            assert!(matches!(Symbol::parse(raw), Err(QuoteError::InvalidSymbol(_))), "{raw:?}");
        }
        assert_eq!(Symbol::parse("brk.b").unwrap().as_str(), "BRK.B");
    }

    #[test]
    fn symbols_file_accepts_mixed_separators() {
        let input = Cursor::new("aapl, msft\n\nsbux tsla,,\nAAPL\n");
        let symbols = Symbol::parse_from_file(input).unwrap();
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["AAPL", "MSFT", "SBUX", "TSLA"]);
    }

    #[test]
    fn serde_normalizes_on_the_way_in() {
        let symbol: Symbol = serde_json::from_str("\"brk.b\"").unwrap();
        assert_eq!(symbol.to_string(), "BRK.B");
        assert!(serde_json::from_str::<Symbol>("\"\"").is_err());
    }
}
