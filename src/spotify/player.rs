use reqwest::{Method, header::AUTHORIZATION};
use tracing::debug;

use crate::types::ProviderResponse;

use super::{SpotifyClient, read_response};

/// A playback command understood by the Web API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Play,
    Pause,
}

impl PlayerCommand {
    fn path(self) -> &'static str {
        match self {
            PlayerCommand::Play => "/me/player/play",
            PlayerCommand::Pause => "/me/player/pause",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerCommand::Play => "play",
            PlayerCommand::Pause => "pause",
        }
    }
}

impl SpotifyClient {
    /// Fetches what the user is currently playing.
    ///
    /// `authorization` is the caller's `Authorization` header value and is
    /// forwarded verbatim. Spotify answers `204` with no body when nothing
    /// is playing.
    pub async fn playback_status(
        &self,
        authorization: &str,
    ) -> Result<ProviderResponse, reqwest::Error> {
        let res = self
            .http
            .get(self.api("/me/player/currently-playing"))
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        read_response(res).await
    }

    /// Resumes playback on the active device.
    pub async fn play(&self, authorization: &str) -> Result<ProviderResponse, reqwest::Error> {
        self.command(PlayerCommand::Play, authorization).await
    }

    /// Pauses playback on the active device.
    pub async fn pause(&self, authorization: &str) -> Result<ProviderResponse, reqwest::Error> {
        self.command(PlayerCommand::Pause, authorization).await
    }

    /// Sends a body-less `PUT` for `command`.
    async fn command(
        &self,
        command: PlayerCommand,
        authorization: &str,
    ) -> Result<ProviderResponse, reqwest::Error> {
        debug!(command = command.as_str(), "sending player command");

        let res = self
            .http
            .request(Method::PUT, self.api(command.path()))
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        read_response(res).await
    }
}
