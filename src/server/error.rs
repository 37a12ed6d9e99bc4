use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::calc::validate::ValidationError;

#[derive(Error, Debug)]
pub(crate) enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} data not found")]
    NotFound(&'static str),

    #[error("Invalid username or password")]
    Unauthorized,

    /// The message goes to the client; the cause only to the log.
    #[error("{message}")]
    Store {
        message: String,
        cause: anyhow::Error,
    },
}

impl ApiError {
    pub(crate) fn store(message: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::Store {
            message: message.into(),
            cause,
        }
    }

    pub(crate) fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store { message, cause } = &self {
            error!("{message}: {cause:#}");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
