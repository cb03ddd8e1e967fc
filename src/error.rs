use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure an endpoint can surface, mapped to a status code and a
/// `{"error": message}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Access denied")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Email or password incorrect")]
    InvalidCredentials,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Unauthorized")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("Image upload failed")]
    Upload(#[source] anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::InvalidToken | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::DuplicateEmail | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Upload(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
