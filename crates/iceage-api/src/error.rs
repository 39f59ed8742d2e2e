//! Error types for iceage-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for iceage-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a request
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the catalog, geometry or rendering layers
    #[error(transparent)]
    Core(#[from] iceage_core::Error),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A request parameter is missing or malformed
    #[error("{0}")]
    BadRequest(String),

    /// The listener could not be bound or the server failed
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

impl Error {
    /// HTTP status for this error when returned from a download or JSON route.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Error::Core(iceage_core::Error::InvalidDate { .. } | iceage_core::Error::InvalidName { .. })
            | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
