// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures the relay service reports to its caller.
///
/// Bodies are left empty: clients must not parse anything out of a non-2xx
/// response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformed request body: {0}")]
    MalformedRequest(String),

    #[error("upstream webhook failed: {0}")]
    Upstream(#[from] RelayError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "relay request failed");
        } else {
            tracing::warn!(error = %self, "rejected relay request");
        }
        status.into_response()
    }
}

/// Why a single relay exchange did not produce a usable payload.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay endpoint is not an http(s) URL: {0:?}")]
    InvalidEndpoint(String),

    #[error("could not build HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("relay request timed out")]
    Timeout,

    #[error("relay unreachable: {0}")]
    Network(#[source] reqwest::Error),

    #[error("relay answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("relay reply is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("relay reply has no `reply` field")]
    MissingReply,
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout
        } else {
            RelayError::Network(err)
        }
    }
}
