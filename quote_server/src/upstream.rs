//! Client for the end-of-day data provider.
//!
//! One call to [`QuoteProvider::latest_eod`] is exactly one outbound request: no retry,
//! no caching (that is the lookup layer's job), and the transport's default timeouts.
//! Every failure comes back as a `QuoteError` instead of unwinding the request.
use async_trait::async_trait;
use log::{debug, warn};
use quote_common::net::{PROVIDER_ACCESS_KEY, PROVIDER_BASE_URL};
use quote_common::{QuoteError, RawQuote, Result, Symbol};
use reqwest::{Client, Url};

/// Path segments around the symbol: `<base>/v1/tickers/<SYMBOL>/eod/latest`.
const TICKERS_PREFIX: [&str; 2] = ["v1", "tickers"];
const EOD_LATEST_SUFFIX: [&str; 2] = ["eod", "latest"];

/// Source of the latest end-of-day quote for a symbol.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the provider's latest record for an already normalized `symbol`.
    async fn latest_eod(&self, symbol: &Symbol) -> Result<RawQuote>;
}

/// HTTP provider client speaking the marketstack `tickers/<SYM>/eod/latest` API.
#[derive(Debug, Clone)]
pub struct MarketstackClient {
    client: Client,
    base_url: String,
    access_key: String,
}

impl MarketstackClient {
    /// Client against `base_url`, authenticating with `access_key`.
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            access_key: access_key.into(),
        }
    }

    /// Request URL for `symbol`.
    ///
    /// The symbol is percent-encoded as a single path segment, so `/`, `?` or `#` in it
    /// can never leave `tickers/<SYMBOL>` or displace the access key.
    pub fn url_for(&self, symbol: &Symbol) -> Result<Url> {
        let invalid = |detail: &str| {
            QuoteError::UpstreamTransport(format!("invalid provider URL {}: {}", self.base_url, detail))
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base"))?
            .pop_if_empty()
            .extend(TICKERS_PREFIX)
            .push(symbol.as_str())
            .extend(EOD_LATEST_SUFFIX);
        url.query_pairs_mut()
            .clear()
            .append_pair("access_key", &self.access_key);
        Ok(url)
    }
}

impl Default for MarketstackClient {
    fn default() -> Self {
        Self::new(PROVIDER_BASE_URL, PROVIDER_ACCESS_KEY)
    }
}

#[async_trait]
impl QuoteProvider for MarketstackClient {
    async fn latest_eod(&self, symbol: &Symbol) -> Result<RawQuote> {
        debug!("Provider request for {}", symbol);

        let response = self
            .client
            .get(self.url_for(symbol)?)
            .send()
            .await
            .map_err(|e| QuoteError::UpstreamTransport(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Provider answered {} for {}", status, symbol);
            return Err(QuoteError::UpstreamTransport(format!("HTTP {} - {}", status, body.trim())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| QuoteError::UpstreamDecode(format!("failed to read response: {}", e)))?;
        RawQuote::from_json_bytes(&bytes)
    }
}
