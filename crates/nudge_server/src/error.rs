//! API and server error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nudge_runtime::RuntimeError;
use thiserror::Error;

use crate::types::{ErrorBody, Issue};

/// Errors a request handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body (400); never reaches the runner.
    #[error("Invalid request format")]
    InvalidRequest(Vec<Issue>),

    /// The runner or the hosted model failed (500).
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Runtime(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::InvalidRequest(details) => ErrorBody {
                success: false,
                error: "Invalid request format".to_string(),
                details: Some(details),
            },
            ApiError::Runtime(e) => ErrorBody {
                success: false,
                error: e.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Errors that stop the server itself.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
