use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Failed to parse URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Failed to fetch content: {0}")]
    FetchError(String),

    #[error("Request timeout: {0}")]
    TimeoutError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Client error ({status}): {message}")]
    ClientError { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
}

impl PreviewError {
    /// Classify a transport-level `reqwest` failure for `url`.
    pub fn from_reqwest_error(e: reqwest::Error, url: &str) -> Self {
        if e.is_timeout() {
            PreviewError::TimeoutError(format!("{url}: {e}"))
        } else if e.is_connect() {
            PreviewError::ConnectionError(format!("{url}: {e}"))
        } else {
            PreviewError::FetchError(format!("{url}: {e}"))
        }
    }

    /// Map a non-2xx HTTP status to a typed error.
    pub fn from_status(status: reqwest::StatusCode, url: &str) -> Self {
        let message = format!(
            "{url} returned {}",
            status.canonical_reason().unwrap_or("unexpected status")
        );
        if status.is_client_error() {
            PreviewError::ClientError {
                status: status.as_u16(),
                message,
            }
        } else if status.is_server_error() {
            PreviewError::ServerError {
                status: status.as_u16(),
                message,
            }
        } else {
            PreviewError::FetchError(message)
        }
    }

    pub fn log(&self) {
        match self {
            PreviewError::UrlParseError(e) => {
                warn!(error = %e, "URL parsing failed");
            }
            PreviewError::FetchError(e) => {
                error!(error = %e, "Content fetch failed");
            }
            PreviewError::TimeoutError(e) => {
                warn!(error = %e, "Request timed out");
            }
            PreviewError::ConnectionError(e) => {
                warn!(error = %e, "Connection failed");
            }
            PreviewError::ClientError { status, message } => {
                warn!(status = %status, error = %message, "Page rejected the request");
            }
            PreviewError::ServerError { status, message } => {
                error!(status = %status, error = %message, "Page server failed");
            }
        }
    }
}
