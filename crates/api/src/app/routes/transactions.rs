use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::app::{SharedLedger, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_transaction))
        .route("/:id", get(get_transaction))
}

/// Validate, resolve and commit one transaction.
///
/// Validation failures and unknown accounts both answer 400; nothing is
/// committed in either case.
pub async fn create_transaction(
    Extension(ledger): Extension<SharedLedger>,
    body: Result<Json<dto::CreateTransactionRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match ledger.create_transaction(body.into()) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_transaction(
    Extension(ledger): Extension<SharedLedger>,
    Path(id): Path<String>,
) -> Response {
    match ledger.get_transaction(&id) {
        Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
