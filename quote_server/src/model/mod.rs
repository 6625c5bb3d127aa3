//! Domain models and utilities for the quote server.
//!
//! This module groups the state shared by concurrent lookup requests:
//! - `quote_cache` — per-symbol freshness cache of served payloads.
//! - `clock` — time source used to judge freshness.

pub mod clock;
pub mod quote_cache;
