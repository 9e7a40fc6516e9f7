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
        .route("/", post(create_account))
        .route("/:id", get(get_account))
}

pub async fn create_account(
    Extension(ledger): Extension<SharedLedger>,
    body: Result<Json<dto::CreateAccountRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match ledger.create_account(body.into()) {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_account(
    Extension(ledger): Extension<SharedLedger>,
    Path(id): Path<String>,
) -> Response {
    match ledger.get_account(&id) {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
