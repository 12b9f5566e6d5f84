//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::net::SocketAddr;
use thiserror::Error;

/// Handler error type
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Startup and serving failures
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address {address}: {source}")]
    InvalidBindAddress {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
