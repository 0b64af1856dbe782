//! # Spotify Integration Module
//!
//! Thin client for the three kinds of Spotify calls the service makes. Every
//! method performs exactly one HTTPS round trip and hands back the status and
//! body as received, wrapped in a [`ProviderResponse`]. Status codes are not
//! interpreted here; deciding what a 204 or a 401 means is up to the
//! [`management`](crate::management) layer.
//!
//! ## Endpoints
//!
//! ### Accounts service ([`auth`])
//! - `POST /api/token` with `grant_type=authorization_code`
//! - `POST /api/token` with `grant_type=refresh_token`
//!
//! ### Web API ([`player`])
//! - `GET /me/player/currently-playing`
//! - `PUT /me/player/play`
//! - `PUT /me/player/pause`
//!
//! ## Failure policy
//!
//! Nothing is retried. Transport failures surface as [`reqwest::Error`]; a
//! non-2xx answer from Spotify is a normal [`ProviderResponse`]. All calls share
//! one [`reqwest::Client`] configured with an explicit timeout.

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;

use crate::{config::Config, types::ProviderResponse};

pub mod auth;
pub mod player;

/// HTTP client bound to a pair of Spotify base URLs.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    accounts_url: String,
    api_url: String,
}

impl SpotifyClient {
    /// Builds a client for the given base URLs.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialised.
    pub fn new(
        accounts_url: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            accounts_url: trim_base(accounts_url.into()),
            api_url: trim_base(api_url.into()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.accounts_url.clone(),
            config.api_url.clone(),
            config.provider_timeout,
        )
    }

    fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url)
    }

    fn api(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

fn trim_base(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Drains a response into a [`ProviderResponse`].
///
/// An empty body becomes `null`. A body that is not JSON is kept as a JSON
/// string so it can still be forwarded.
async fn read_response(response: Response) -> Result<ProviderResponse, reqwest::Error> {
    let status = response.status();
    let bytes = response.bytes().await?;

    let body = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    Ok(ProviderResponse::new(status, body))
}
