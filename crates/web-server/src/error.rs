use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::RequestError;
use serde_json::json;
use thiserror::Error;
use tracing;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Request(#[from] RequestError),
    #[error("Compiler error: {0}")]
    Compiler(#[from] query_compiler::CompilerError),
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Request errors are the caller's fault: they get a 400 with the validator's
/// message reproduced verbatim. Compiler errors are defects and database
/// errors are operational; both are logged in full but surfaced as a generic
/// 500 so no internals leak to the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Request(request_err) => {
                (StatusCode::BAD_REQUEST, request_err.to_string())
            }
            AppError::Compiler(compiler_err) => {
                tracing::error!(error = ?compiler_err, "Query compiler invariant violated.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
