//! # Error Handling Middleware
//!
//! Maps [`SchoolError`] onto HTTP status codes and a JSON body of the form
//! `{ "error": message }`, so every handler reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schoolday_core::errors::SchoolError;
use schoolday_db::{is_foreign_key_violation, is_unique_violation};
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use schoolday_api::middleware::error_handling::AppError;
/// use schoolday_core::errors::SchoolError;
///
/// async fn handler(code: String) -> Result<Json<String>, AppError> {
///     if code.trim().is_empty() {
///         return Err(AppError(SchoolError::Validation("Course code is required".into())));
///     }
///     Ok(Json(code))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SchoolError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SchoolError::NotFound(_) => StatusCode::NOT_FOUND,
            SchoolError::Validation(_) => StatusCode::BAD_REQUEST,
            SchoolError::Conflict(_) => StatusCode::CONFLICT,
            SchoolError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SchoolError::Remote { .. } => StatusCode::BAD_GATEWAY,
            SchoolError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SchoolError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `SchoolResult` inside handlers.
impl From<SchoolError> for AppError {
    fn from(err: SchoolError) -> Self {
        AppError(err)
    }
}

/// Repository errors. Constraint violations are the caller's fault: a
/// duplicate key becomes a 409, a dangling reference a 404. Everything
/// else is a database failure.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        if is_unique_violation(&err) {
            AppError(SchoolError::Conflict(
                "A record with the same key already exists".to_string(),
            ))
        } else if is_foreign_key_violation(&err) {
            AppError(SchoolError::NotFound(
                "Referenced section, course or teacher does not exist".to_string(),
            ))
        } else {
            AppError(SchoolError::Database(err))
        }
    }
}
