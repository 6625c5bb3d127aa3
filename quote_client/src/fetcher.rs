//! Fetching quotes from the lookup server.
//!
//! This module provides a small blocking HTTP helper for one lookup and a loop that
//! repeats lookups for a set of symbols until shutdown is requested.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use chrono::Local;
use log::{debug, error, info};
use quote_common::net::LOOKUP_PATH;
use quote_common::{QuoteError, Result, ServedQuote, Symbol};
use reqwest::StatusCode;
use reqwest::blocking::Client;

/// Per-request timeout for lookups.
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Granularity of the shutdown check while waiting between rounds.
const SLEEP_STEP_MS: u64 = 200;

/// Blocking client for `GET /api/lookup/?sym=`.
pub struct LookupClient {
    client: Client,
    server: String,
}

impl LookupClient {
    /// Client for the server at `server` (e.g. `http://127.0.0.1:8000`).
    pub fn new(server: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| QuoteError::Server(e.to_string()))?;
        Ok(Self {
            client,
            server: server.trim_end_matches('/').to_string(),
        })
    }

    /// Look up one symbol.
    pub fn fetch(&self, symbol: &Symbol) -> Result<ServedQuote> {
        let url = format!("{}{}", self.server, LOOKUP_PATH);
        debug!("GET {}?sym={}", url, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("sym", symbol.as_str())])
            .send()
            .map_err(|e| QuoteError::Server(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| QuoteError::Server(format!("failed to read response: {}", e)))?;
        match status {
            StatusCode::OK => Ok(serde_json::from_str(&body)?),
            StatusCode::UNAUTHORIZED => Err(QuoteError::SymbolRequired),
            _ => Err(QuoteError::Server(format!("HTTP {} - {}", status, body.trim()))),
        }
    }
}

/// Format a quote as a single log line.
pub fn describe(quote: &ServedQuote) -> String {
    format!(
        "QUOTE: {} ({}) {} O={:.2} H={:.2} L={:.2} C={:.2} V={}",
        quote.symbol, quote.exchange, quote.date, quote.open, quote.high, quote.low, quote.close, quote.volume
    )
}

/// Look up every symbol, then wait `interval`, until `shutdown` is set.
/// With `once`, a single round is made.
pub fn run_lookup_loop(
    client: &LookupClient,
    symbols: &[Symbol],
    interval: Duration,
    once: bool,
    shutdown: Arc<AtomicBool>,
) {
    while !shutdown.load(Ordering::Relaxed) {
        info!("Lookup round at {}", Local::now().format("%H:%M:%S"));
        for symbol in symbols {
            match client.fetch(symbol) {
                Ok(quote) => info!("{}", describe(&quote)),
                Err(e) => error!("Lookup for {} failed: {}", symbol, e),
            }
        }
        if once {
            break;
        }

        let mut waited = Duration::ZERO;
        while waited < interval && !shutdown.load(Ordering::Relaxed) {
            let step = Duration::from_millis(SLEEP_STEP_MS).min(interval - waited);
            thread::sleep(step);
            waited += step;
        }
    }
    info!("Lookup loop stopping...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_is_one_line() {
        let quote = ServedQuote {
            name: "SBUX".into(),
            symbol: "SBUX".into(),
            exchange: "XNAS".into(),
            date: "2024-01-02".into(),
            open: 84.5,
            high: 85.0,
            low: 84.0,
            close: 84.8,
            volume: 1_000_000.0,
        };
        assert_eq!(
            describe(&quote),
            "QUOTE: SBUX (XNAS) 2024-01-02 O=84.50 H=85.00 L=84.00 C=84.80 V=1000000"
        );
    }

    #[test]
    fn unreachable_server_is_a_server_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = LookupClient::new(&format!("http://127.0.0.1:{}/", port)).unwrap();
        let err = client.fetch(&Symbol::parse("SBUX").unwrap()).unwrap_err();
        assert!(matches!(err, QuoteError::Server(_)), "{err:?}");
        assert!(!err.is_upstream());
    }

    #[test]
    fn bad_gateway_from_server_is_a_server_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            use std::io::{Read, Write};
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request).unwrap();
            let body = r#"{"error":"upstream unavailable"}"#;
            write!(
                stream,
                "HTTP/1.1 502 Bad Gateway\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .unwrap();
        });

        let client = LookupClient::new(&format!("http://127.0.0.1:{}", port)).unwrap();
        let err = client.fetch(&Symbol::parse("SBUX").unwrap()).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, QuoteError::Server(ref m) if m.contains("502")), "{err:?}");
    }
}
