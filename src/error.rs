//! Error types
//!
//! One error enum covers startup failures and request handling failures.
//! Request errors know which HTTP status they map to.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::http;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Template render failed: {0}")]
    Render(#[from] askama::Error),

    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Unsupported media type: {content_type}")]
    UnsupportedMediaType { content_type: String },

    #[error("Request body too large (max: {limit} bytes)")]
    PayloadTooLarge { limit: u64 },

    #[error("Failed to read request body: {message}")]
    BodyRead { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid address: {message}")]
    InvalidAddress { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SiteError>;

impl SiteError {
    /// HTTP status this error is reported with
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) | Self::BodyRead { .. } => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Render(_)
            | Self::Config(_)
            | Self::InvalidAddress { .. }
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the fault lies with the server rather than the client
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// Convert into an HTTP response
    ///
    /// Client errors get a JSON body naming the problem. Server errors get a
    /// generic text body; the underlying message is only included in debug mode.
    pub fn into_response(self, debug: bool) -> Response<Full<Bytes>> {
        let status = self.status();
        match self {
            Self::PayloadTooLarge { .. } => http::build_413_response(),
            err if err.is_server_error() => {
                let text = if debug {
                    format!("500 Internal Server Error\n\n{err}")
                } else {
                    "500 Internal Server Error".to_string()
                };
                http::build_text_response(status, text)
            }
            err => http::build_json_response(
                status,
                &json!({
                    "status": "error",
                    "message": err.to_string(),
                }),
            ),
        }
    }
}
