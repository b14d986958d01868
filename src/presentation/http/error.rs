use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::errors::LedgerError;

pub const PERMISSION_DENIED: &str = "permission denied";

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    Ledger(LedgerError),
    BadRequest(String),
    /// Uniform response for every authorization failure.
    PermissionDenied,
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Ledger(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::PermissionDenied => json_error(StatusCode::FORBIDDEN, PERMISSION_DENIED),
            ApiError::BadRequest(msg) => json_error(StatusCode::BAD_REQUEST, msg),
            ApiError::Ledger(err) => {
                let status = match &err {
                    LedgerError::Validation(_) | LedgerError::InsufficientFunds => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    LedgerError::NotFound => StatusCode::NOT_FOUND,
                    LedgerError::ConstraintViolation => StatusCode::CONFLICT,
                    LedgerError::Unauthorized => StatusCode::BAD_REQUEST,
                    LedgerError::Store(_) | LedgerError::Hashing(_) => {
                        tracing::error!(error = ?err, "request_failed");
                        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error");
                    }
                };
                json_error(status, err.to_string())
            }
        }
    }
}
