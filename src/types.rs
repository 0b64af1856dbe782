use std::{fmt, str::FromStr};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OAuth client credentials registered with Spotify.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// A Spotify answer as received: status code plus JSON body.
///
/// The body is kept as a generic JSON tree because the service forwards it
/// without validating its shape. An empty body is `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ProviderResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT
    }

    /// The `refresh_token` field, if present and a string.
    pub fn refresh_token(&self) -> Option<&str> {
        self.body.get("refresh_token").and_then(Value::as_str)
    }
}

impl IntoResponse for ProviderResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Playback state reported back to the caller after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
}

/// What to do with a refresh token that Spotify rotates during `/refresh`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Encrypt it like the one issued by `/swap`.
    ///
    /// This departs from a plain proxy, which would hand Spotify's body back
    /// verbatim. Use [`RotationPolicy::Passthrough`] for that behaviour.
    #[default]
    Encrypt,
    /// Hand it back unchanged, exactly as Spotify sent it.
    Passthrough,
}

impl FromStr for RotationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" => Ok(RotationPolicy::Encrypt),
            "passthrough" => Ok(RotationPolicy::Passthrough),
            other => Err(format!(
                "expected `encrypt` or `passthrough`, got `{other}`"
            )),
        }
    }
}
