//!
//! Common types and utilities shared by the quote server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `symbol` — ticker symbol normalization and symbol-file parsing.
//! - `quote` — provider and served quote schemas plus the wire encoding.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod symbol;
pub mod quote;
pub mod net;

pub use error::QuoteError;
pub use result::Result;
pub use symbol::Symbol;
pub use quote::{RawQuote, ServedQuote};
