//! HTTP surface of the quote server.
//!
//! Routes:
//! - `GET /api/lookup/?sym=<symbol>` — latest quote for a symbol (also without the
//!   trailing slash).
//! - `GET /favicon.ico` — `<static_dir>/coffee.ico`.
//! - `GET /static/*` — files under `static_dir`.
//! - anything else — files under `root_dir`.
//!
//! All lookup responses go through two types: [`QuotePayload`] for success and
//! [`ApiError`] for failure.
use std::path::Path;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::error;
use quote_common::QuoteError;
use quote_common::net::LOOKUP_PATH;
use serde::Deserialize;
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};

use crate::lookup::LookupService;

/// Query string of the lookup endpoint, kept as ordered pairs so a repeated `sym`
/// does not reject the request.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct LookupParams(pub Vec<(String, String)>);

impl LookupParams {
    /// First `sym` value, or empty when absent.
    pub fn sym(&self) -> &str {
        self.0
            .iter()
            .find(|(key, _)| key == "sym")
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }
}

/// Successful lookup body, written verbatim as `application/json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePayload(pub String);

impl IntoResponse for QuotePayload {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/json")], self.0).into_response()
    }
}

/// Failed lookup, mapped onto a status code and body.
#[derive(Debug)]
pub struct ApiError(pub QuoteError);

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            // 401 rather than 400: existing clients key off this exact status and text.
            QuoteError::SymbolRequired => (StatusCode::UNAUTHORIZED, "sym required").into_response(),
            err @ QuoteError::InvalidSymbol(_) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            err if err.is_upstream() => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "upstream unavailable", "detail": err.to_string() })),
            )
                .into_response(),
            err => {
                error!("Lookup failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error", "detail": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

async fn lookup_quote(
    State(service): State<LookupService>,
    Query(params): Query<LookupParams>,
) -> Result<QuotePayload, ApiError> {
    let outcome = service.lookup(params.sym()).await?;
    Ok(QuotePayload(outcome.payload))
}

/// Build the full application router.
pub fn app_router(service: LookupService, static_dir: &Path, root_dir: &Path) -> Router {
    let lookup_no_slash = LOOKUP_PATH.trim_end_matches('/');

    Router::new()
        .route(LOOKUP_PATH, get(lookup_quote))
        .route(lookup_no_slash, get(lookup_quote))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("coffee.ico")))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback_service(ServeDir::new(root_dir))
        .with_state(service)
}
