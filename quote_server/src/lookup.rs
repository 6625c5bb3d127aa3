//! Quote lookup orchestration.
//!
//! `LookupService::lookup` runs one request through validate → check cache →
//! (serve cached | fetch → transform → serialize → store) and hands back the payload
//! to write. Freshness is decided once, at the cache check. Concurrent requests for the
//! same stale symbol each fetch on their own; nothing is coalesced.
use std::sync::Arc;

use log::{info, warn};
use quote_common::{Result, ServedQuote, Symbol};
use strum_macros::Display;

use crate::model::clock::{Clock, SystemClock};
use crate::model::quote_cache::QuoteCache;
use crate::upstream::QuoteProvider;

/// Where a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LookupSource {
    /// Served from a fresh cache entry.
    Cached,
    /// Fetched from the provider and stored.
    Fetched,
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    /// Normalized symbol the lookup was made for.
    pub symbol: Symbol,
    /// Tab-indented `ServedQuote` JSON to write verbatim.
    pub payload: String,
    /// Whether the provider was consulted.
    pub source: LookupSource,
}

/// Ties the cache, the provider and the clock together for each request.
#[derive(Clone)]
pub struct LookupService {
    cache: Arc<QuoteCache>,
    provider: Arc<dyn QuoteProvider>,
    clock: Arc<dyn Clock>,
}

impl LookupService {
    /// Service with an empty cache and the system clock.
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_parts(Arc::new(QuoteCache::new()), provider, Arc::new(SystemClock))
    }

    /// Service over explicit parts.
    pub fn with_parts(
        cache: Arc<QuoteCache>,
        provider: Arc<dyn QuoteProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { cache, provider, clock }
    }

    /// The cache this service reads and writes.
    pub fn cache(&self) -> &Arc<QuoteCache> {
        &self.cache
    }

    /// Look up the latest quote for the raw `sym` parameter.
    ///
    /// A blank `sym` fails with `QuoteError::SymbolRequired` before the cache or the
    /// provider is touched. Provider failures are returned as errors and leave the
    /// cache as it was.
    pub async fn lookup(&self, sym: &str) -> Result<LookupOutcome> {
        let symbol = Symbol::parse(sym)?;

        if let Some(entry) = self.cache.get(&symbol)? {
            if QuoteCache::is_fresh(&entry, self.clock.now()) {
                info!("Returning cached quote for {}", symbol);
                return Ok(LookupOutcome {
                    symbol,
                    payload: entry.payload.clone(),
                    source: LookupSource::Cached,
                });
            }
        }

        info!("Requesting new quote for {}", symbol);
        let raw = match self.provider.latest_eod(&symbol).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Lookup for {} failed: {}", symbol, e);
                return Err(e);
            }
        };

        let payload = ServedQuote::from(raw).to_payload()?;
        self.cache.put(symbol.clone(), payload.clone(), self.clock.now())?;

        Ok(LookupOutcome {
            symbol,
            payload,
            source: LookupSource::Fetched,
        })
    }
}
