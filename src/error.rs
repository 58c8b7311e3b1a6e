//! Application error type.
//!
//! One enum serves both fronts of the tool:
//!
//! - at startup, errors abort the process with a stable exit code
//!   (2 = configuration/input problem, 3 = no usable data)
//! - inside a request handler, errors become JSON HTTP responses
//!
//! Startup errors are fatal by design: if the dataset cannot be loaded the
//! server must not start serving at all.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Bad environment/CLI configuration (e.g., unparseable `PORT`).
    #[error("{0}")]
    Config(String),

    /// The dataset file could not be opened or read at all.
    #[error("{0}")]
    Ingest(String),

    /// The dataset parsed but contains no usable rows.
    #[error("{0}")]
    NoData(String),

    /// Chart rendering failed (drawing-backend error).
    #[error("Failed to render chart: {0}")]
    Chart(String),

    /// The server could not bind or serve.
    #[error("Server error: {0}")]
    Server(String),
}

impl AppError {
    /// Process exit code reported by the binary when this error aborts startup.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::Ingest(_) => 2,
            AppError::NoData(_) => 3,
            AppError::Chart(_) | AppError::Server(_) => 1,
        }
    }
}

/// Converts an `AppError` escaping a handler into an HTTP response.
///
/// Anything reaching here after startup is an internal failure; filter
/// selections themselves are never errors (an out-of-order date range is a
/// valid selection that yields empty charts).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        tracing::error!(error = %self, "Request failed.");
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(AppError::Config("x".into()).exit_code(), 2);
        assert_eq!(AppError::Ingest("x".into()).exit_code(), 2);
        assert_eq!(AppError::NoData("x".into()).exit_code(), 3);
        assert_eq!(AppError::Server("x".into()).exit_code(), 1);
    }
}
