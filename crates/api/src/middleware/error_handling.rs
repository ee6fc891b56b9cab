//! # Error Handling Middleware
//!
//! Maps `ScheduleError` values onto HTTP status codes and a JSON body of the
//! form `{"error": "...", "code": "..."}` so every endpoint reports failures
//! the same way.
//!
//! Persistence failures are logged in full and answered with a generic
//! message; storage details never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fieldsched_core::errors::ScheduleError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use fieldsched_api::middleware::error_handling::AppError;
/// use fieldsched_core::errors::ScheduleError;
///
/// async fn handler() -> Result<Json<()>, AppError> {
///     Err(AppError(ScheduleError::InvalidInput("date is required".into())))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ScheduleError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
            ScheduleError::ScheduleAlreadyExists | ScheduleError::FieldCodeAlreadyExists => {
                StatusCode::CONFLICT
            }
            ScheduleError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ScheduleError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.0 {
            ScheduleError::Persistence(report) => {
                error!("Persistence failure: {:?}", report);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({ "error": message, "code": self.0.code() }));

        (status, body).into_response()
    }
}

/// Allows `?` on service calls inside handlers.
impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError(err)
    }
}

/// Maps a ScheduleError to an HTTP response
pub fn map_error(err: ScheduleError) -> Response {
    AppError(err).into_response()
}
