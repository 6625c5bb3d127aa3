//! Per-symbol freshness cache for served quotes.
//!
//! This module provides a process-wide, in-memory store that keeps the last payload
//! served for each symbol together with the moment it was fetched. It exposes three
//! core operations:
//!
//! - `QuoteCache::get(symbol)` — the current entry for a symbol, if any.
//! - `QuoteCache::put(symbol, payload, at)` — replace the entry for a symbol wholesale.
//! - `QuoteCache::is_fresh(entry, now)` — whether an entry is younger than
//!   [`FRESHNESS_WINDOW`].
//!
//! Design notes:
//! - Time is measured using `std::time::Instant`, which is monotonic and immune to system
//!   clock changes.
//! - Entries are immutable and shared through `Arc`; the lock is held only for the map
//!   lookup or swap itself, so readers never wait on a fetch and never see a half-written
//!   entry. Last writer wins.
//! - Nothing is evicted. Staleness is judged when an entry is read.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use quote_common::{Result, Symbol};

/// Age under which a cached payload is served without asking the provider again.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(60);

/// One cached quote: the exact bytes served to clients plus when they were fetched.
#[derive(Debug, PartialEq, Eq)]
pub struct CacheEntry {
    /// Key the entry is stored under.
    pub symbol: Symbol,
    /// When the payload was fetched from the provider.
    pub inserted_at: Instant,
    /// Serialized `ServedQuote`, served verbatim on a hit.
    pub payload: String,
}

/// Thread-safe symbol → entry map shared by all lookup requests.
#[derive(Debug, Default)]
pub struct QuoteCache {
    entries: RwLock<HashMap<Symbol, Arc<CacheEntry>>>,
}

impl QuoteCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry stored for `symbol`, matched exactly.
    pub fn get(&self, symbol: &Symbol) -> Result<Option<Arc<CacheEntry>>> {
        let entries = self.entries.read()?;
        Ok(entries.get(symbol).cloned())
    }

    /// Replace whatever is stored for `symbol` and return the new entry.
    pub fn put(&self, symbol: Symbol, payload: String, inserted_at: Instant) -> Result<Arc<CacheEntry>> {
        let entry = Arc::new(CacheEntry {
            symbol: symbol.clone(),
            inserted_at,
            payload,
        });
        self.entries.write()?.insert(symbol, Arc::clone(&entry));
        Ok(entry)
    }

    /// True iff `entry` was inserted less than [`FRESHNESS_WINDOW`] before `now`.
    pub fn is_fresh(entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) < FRESHNESS_WINDOW
    }

    /// Number of symbols ever cached.
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries.read()?.len())
    }

    /// True if no symbol has been cached yet.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[test]
    fn starts_empty() {
        let cache = QuoteCache::new();
        assert!(cache.is_empty().unwrap());
        assert!(cache.get(&sym("SBUX")).unwrap().is_none());
    }

    #[test]
    fn put_replaces_the_whole_entry() {
        let cache = QuoteCache::new();
        let t0 = Instant::now();
        cache.put(sym("SBUX"), "first".into(), t0).unwrap();
        let t1 = t0 + Duration::from_secs(90);
        cache.put(sym("SBUX"), "second".into(), t1).unwrap();

        let entry = cache.get(&sym("SBUX")).unwrap().unwrap();
        assert_eq!(entry.payload, "second");
        assert_eq!(entry.inserted_at, t1);
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn freshness_window_is_exclusive_at_sixty_seconds() {
        let t0 = Instant::now();
        let entry = CacheEntry {
            symbol: sym("AAPL"),
            inserted_at: t0,
            payload: String::new(),
        };
        assert!(QuoteCache::is_fresh(&entry, t0));
        assert!(QuoteCache::is_fresh(&entry, t0 + Duration::from_millis(59_999)));
        assert!(!QuoteCache::is_fresh(&entry, t0 + FRESHNESS_WINDOW));
        assert!(!QuoteCache::is_fresh(&entry, t0 + Duration::from_secs(3600)));
    }

    #[test]
    fn an_entry_read_earlier_is_untouched_by_a_later_put() {
        let cache = QuoteCache::new();
        let t0 = Instant::now();
        cache.put(sym("MSFT"), "old".into(), t0).unwrap();
        let held = cache.get(&sym("MSFT")).unwrap().unwrap();
        cache.put(sym("MSFT"), "new".into(), t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(held.payload, "old");
        assert_eq!(cache.get(&sym("MSFT")).unwrap().unwrap().payload, "new");
    }

    #[test]
    fn concurrent_writers_on_distinct_symbols_do_not_interfere() {
        let cache = Arc::new(QuoteCache::new());
        let symbols = ["AAPL", "MSFT", "SBUX", "TSLA", "NVDA", "META"];
        let t0 = Instant::now();

        let handles: Vec<_> = symbols
            .iter()
            .map(|name| {
                let cache = Arc::clone(&cache);
                let name = name.to_string();
                thread::spawn(move || {
                    for i in 0..200u64 {
                        let payload = format!("{name}:{i}");
                        cache
                            .put(sym(&name), payload, t0 + Duration::from_millis(i))
                            .unwrap();
                        let seen = cache.get(&sym(&name)).unwrap().unwrap();
                        assert!(seen.payload.starts_with(&format!("{name}:")));
                        assert_eq!(seen.symbol.as_str(), name);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len().unwrap(), symbols.len());
        for name in symbols {
            let entry = cache.get(&sym(name)).unwrap().unwrap();
            assert_eq!(entry.payload, format!("{name}:199"));
        }
    }
}
