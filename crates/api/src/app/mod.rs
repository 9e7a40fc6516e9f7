//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and their mapping onto service inputs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use tally_infra::LedgerService;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Ledger service shared by every handler.
pub type SharedLedger = Arc<LedgerService>;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(ledger: SharedLedger) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(Extension(ledger)),
        )
}
