//! Quote lookup HTTP server.
//!
//! Answers `GET /api/lookup/?sym=<symbol>` with the latest end-of-day quote for a
//! symbol. Building blocks:
//!
//! - `model::quote_cache` — per-symbol cache of served payloads with a 60 second
//!   freshness window, shared by all requests.
//! - `upstream` — `QuoteProvider` trait and the marketstack HTTP client.
//! - `lookup` — `LookupService`, the per-request flow: validate, serve from cache or
//!   fetch, transform, store.
//! - `http` — axum router for the lookup endpoint and static files.
//! - `store` — SQLite bootstrap for the user table.
//! - `args` — CLI switches.
//!
//! Concurrency: every request runs as its own task on the tokio runtime; the only shared
//! mutable state is the cache, which guards each operation with a lock and shares
//! immutable entries. A failed provider call only fails the request that made it.
#![warn(missing_docs)]
use std::path::Path;
use std::sync::Arc;

use log::info;
use quote_common::Result;
use quote_common::net::addr;

pub mod args;
pub mod http;
pub mod lookup;
pub mod model;
pub mod store;
pub mod upstream;

use crate::args::ServerArgs;
use crate::http::app_router;
use crate::lookup::LookupService;
use crate::upstream::MarketstackClient;

/// Serve HTTP until Ctrl+C, using the store at `db_file`.
pub async fn serve(args: &ServerArgs, db_file: &Path) -> Result<()> {
    {
        let conn = store::open_store(db_file)?;
        info!("Using store {} ({} users)", db_file.display(), store::user_count(&conn)?);
    }

    let provider = Arc::new(MarketstackClient::new(&args.provider_url, &args.access_key));
    let service = LookupService::new(provider);
    let router = app_router(service, &args.static_dir, &args.root_dir);

    let listener = tokio::net::TcpListener::bind(addr("0.0.0.0", args.port)).await?;
    info!("Listening on {}...", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Ctrl+C received. Shutting down server...");
    }
}
