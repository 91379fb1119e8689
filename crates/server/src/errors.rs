use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use twinrag::PipelineError;

/// A custom error type for the server application.
///
/// Validation problems carry a specific message back to the caller.
/// Upstream failures are logged with full detail server-side and surfaced
/// as a generic message, so provider error text and stack traces never
/// leak into responses.
pub enum AppError {
    /// The request itself was malformed or missing a required field.
    BadRequest(String),
    /// Errors originating from the pipeline's external calls.
    Pipeline(PipelineError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::Pipeline(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Pipeline(err) if err.is_timeout() => {
                error!("Upstream timeout: {err:?}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "An upstream service timed out. Please retry.".to_string(),
                )
            }
            AppError::Pipeline(err) => {
                error!("PipelineError: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred while answering the question.".to_string(),
                )
            }
            AppError::Internal(err) => {
                error!("Internal server error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
