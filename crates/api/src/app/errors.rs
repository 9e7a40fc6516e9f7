use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use tally_core::{ErrorKind, LedgerError};

/// HTTP status for a ledger error.
///
/// An unknown account referenced by a transaction entry is a bad request
/// (400); only direct lookups by id produce 404.
pub fn status_for(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::AccountNotFound(_) => StatusCode::BAD_REQUEST,
        _ => match err.kind() {
            ErrorKind::Validation | ErrorKind::Configuration => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

pub fn ledger_error_to_response(err: LedgerError) -> Response {
    json_error(status_for(&err), err.kind(), err.to_string())
}

/// A body that could not be decoded into the request DTO.
pub fn rejection_to_response(rejection: JsonRejection) -> Response {
    json_error(StatusCode::BAD_REQUEST, ErrorKind::Validation, rejection.body_text())
}

pub fn json_error(status: StatusCode, kind: ErrorKind, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "kind": kind.as_str(),
        })),
    )
        .into_response()
}
