//! Error types for the service and CLI front ends

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ngn_dimensioning_core::DimensioningError;
use ngn_dimensioning_core::wire::ErrorBody;
use thiserror::Error;

/// Result type alias for server setup
pub type Result<T> = std::result::Result<T, ServerError>;

/// Failures while loading configuration or starting the service
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration file unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Engine rejected its configuration
    #[error(transparent)]
    Engine(#[from] DimensioningError),

    /// Socket or filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Error returned by an HTTP handler
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body missing, not JSON, or lacking a required field
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// Engine refused the request
    #[error(transparent)]
    Engine(#[from] DimensioningError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Engine(err) if err.is_input_error() => StatusCode::BAD_REQUEST,
            Self::Engine(DimensioningError::SizingUnreachable { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
