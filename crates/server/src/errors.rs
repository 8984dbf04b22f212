use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const MSG_REQUIRED_FIELDS: &str = "All fields are required!";
pub const MSG_INVALID_BODY: &str = "Invalid request body!";
pub const MSG_DUPLICATE_CPF: &str = "A record with this CPF already exists!";
pub const MSG_SAVE_FAILED: &str = "Failed to save the record!";
pub const MSG_LOAD_FAILED: &str = "Failed to load the records!";

/// Error returned by handlers, rendered as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Map a service failure. Storage causes are logged here and replaced by
    /// `storage_message` so no driver detail reaches the caller.
    pub fn from_service(e: ServiceError, storage_message: &str) -> Self {
        match e {
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, MSG_REQUIRED_FIELDS),
            ServiceError::Conflict(_) => Self::new(StatusCode::CONFLICT, MSG_DUPLICATE_CPF),
            ServiceError::Db(_) => {
                error!(code = e.code(), error = %e, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, storage_message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
