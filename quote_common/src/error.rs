//! Error types shared between client and server.
//!
//! The `QuoteError` enum unifies the failure cases of a quote lookup (bad input,
//! upstream transport and decode failures), of the relational store bootstrap and
//! of the plumbing around them (I/O, JSON, poisoned locks), allowing crates to
//! propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The `sym` parameter was missing or blank.
    #[error("sym required")]
    SymbolRequired,

    /// The `sym` parameter cannot name a ticker.
    #[error("invalid sym: {0:?}")]
    InvalidSymbol(String),

    /// The lookup server could not be reached or answered with an unexpected status.
    #[error("quote server error: {0}")]
    Server(String),

    /// The provider could not be reached or answered with a non-success status.
    #[error("upstream transport error: {0}")]
    UpstreamTransport(String),

    /// The provider answered, but the body is not a quote record.
    #[error("upstream decode error: {0}")]
    UpstreamDecode(String),

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error while parsing a symbols file.
    #[error("Parse symbols file error: {0}")]
    ParseSymbolsFile(String),

    /// Refused to initialize a store file that is already there.
    #[error("File '{0}' already exists. Can't initialize it.")]
    StoreExists(String),

    /// The store file to serve from does not exist.
    #[error("Database file '{0}' doesn't exist.")]
    StoreMissing(String),

    /// Relational store failure; contains the driver message.
    #[error("DB error ({0})")]
    Store(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl QuoteError {
    /// True for failures caused by the upstream provider rather than by this process.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            QuoteError::UpstreamTransport(_) | QuoteError::UpstreamDecode(_)
        )
    }
}

impl<T> From<PoisonError<T>> for QuoteError {
    fn from(err: PoisonError<T>) -> Self {
        QuoteError::LockPoisoned(err.to_string())
    }
}
