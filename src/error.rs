//! Error types for startup and request handling.
//!
//! Startup problems are [`ConfigError`]s and stop the process before it binds.
//! Everything that can go wrong while serving a request is an [`AppError`],
//! which renders itself as a JSON body with an HTTP status so no failure ever
//! escapes the request that caused it. Non-success answers from Spotify are
//! not errors here: they travel back as
//! [`ProviderResponse`](crate::types::ProviderResponse) values and are
//! forwarded untouched.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Result type for request-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors raised while loading the process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set (or set to an empty string).
    #[error("missing required environment variable `{0}`")]
    Missing(&'static str),

    /// A variable is set but cannot be used.
    #[error("invalid value for `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },

    /// The `.env` file exists but could not be parsed.
    #[error("cannot load .env file: {0}")]
    EnvFile(#[from] dotenv::Error),

    /// The configuration directory could not be created.
    #[error("cannot prepare configuration directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the secret codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("token is not valid base64")]
    Encoding,

    #[error("token is too short")]
    Truncated,

    #[error("unsupported token format version {0}")]
    UnsupportedVersion(u8),

    /// Wrong key, foreign token or tampered ciphertext.
    #[error("token failed authentication")]
    Authentication,

    #[error("decrypted token is not valid UTF-8")]
    Utf8,

    #[error("token could not be encrypted")]
    Seal,
}

impl CodecError {
    /// Whether the failure is the caller's fault rather than ours.
    pub fn is_invalid_token(&self) -> bool {
        !matches!(self, CodecError::Seal)
    }
}

/// Errors that end a single request.
#[derive(Debug, Error)]
pub enum AppError {
    /// The secret codec rejected a token or could not seal one.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The outbound call to Spotify could not complete.
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A required form field was absent or empty.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// The request carried no usable `Authorization` header.
    #[error("missing authorization header")]
    MissingAuthorization,
}

impl AppError {
    /// HTTP status reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Codec(e) if e.is_invalid_token() => StatusCode::BAD_REQUEST,
            AppError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::MissingAuthorization => StatusCode::UNAUTHORIZED,
        }
    }

    /// OAuth-style error code placed in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Codec(e) if e.is_invalid_token() => "invalid_token",
            AppError::Codec(_) => "server_error",
            AppError::Transport(e) if e.is_timeout() => "provider_timeout",
            AppError::Transport(_) => "provider_unreachable",
            AppError::MissingParameter(_) | AppError::MissingAuthorization => "invalid_request",
        }
    }

    /// Caller-facing description. Never includes transport or crypto internals.
    pub fn description(&self) -> String {
        match self {
            AppError::Codec(e) if e.is_invalid_token() => {
                "refresh token was not issued by this service or has been altered".to_string()
            }
            AppError::Codec(_) => "token could not be processed".to_string(),
            AppError::Transport(e) if e.is_timeout() => {
                "the provider did not answer in time".to_string()
            }
            AppError::Transport(_) => "the provider could not be reached".to_string(),
            AppError::MissingParameter(name) => format!("missing required parameter `{name}`"),
            AppError::MissingAuthorization => "an Authorization header is required".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Transport(e) => warn!(error = %e, "provider request failed"),
            AppError::Codec(e) if !e.is_invalid_token() => error!(error = %e, "codec failure"),
            other => debug!(error = %other, "rejecting request"),
        }

        let body = json!({
            "error": self.code(),
            "error_description": self.description(),
        });
        (self.status(), Json(body)).into_response()
    }
}
