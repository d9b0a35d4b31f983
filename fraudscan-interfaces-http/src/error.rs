use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use fraudscan_application::AppError;

/// Plain-text error responses for the browser-facing routes.
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::NoFileUploaded
            | AppError::NoSelectedFile
            | AppError::InvalidFileType
            | AppError::BadRequest(_) => HttpError::BadRequest(value.to_string()),
            AppError::NoRecentUploads => HttpError::NotFound(value.to_string()),
            AppError::ObjectStore(_)
            | AppError::Parse(_)
            | AppError::Prediction(_)
            | AppError::ResultStore(_) => HttpError::Internal(value.to_string()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            HttpError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            HttpError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: {}", message),
            )
                .into_response(),
        }
    }
}
