use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::info;

use crate::{
    error::Result,
    spotify::{SpotifyClient, player::PlayerCommand},
    types::{PlaybackState, ProviderResponse},
};

/// Result of a single toggle call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// Nothing is playing, so there was nothing to toggle.
    NothingPlaying,
    /// The command went through; carries the new state.
    Toggled(PlaybackState),
    /// Spotify refused the status read or the command; forwarded as is.
    Provider(ProviderResponse),
}

impl IntoResponse for ToggleOutcome {
    fn into_response(self) -> Response {
        match self {
            ToggleOutcome::NothingPlaying => {
                (StatusCode::NO_CONTENT, Json(Value::Null)).into_response()
            }
            ToggleOutcome::Toggled(state) => (StatusCode::OK, Json(state)).into_response(),
            ToggleOutcome::Provider(response) => response.into_response(),
        }
    }
}

/// Flips playback between playing and paused for the caller's account.
#[derive(Debug, Clone)]
pub struct PlaybackToggler {
    client: SpotifyClient,
}

impl PlaybackToggler {
    pub fn new(client: SpotifyClient) -> Self {
        PlaybackToggler { client }
    }

    /// Reads the current playback state and issues the opposite command.
    ///
    /// - status `204`: nothing is playing, no command is sent.
    /// - any other non-2xx status: forwarded, no command is sent.
    /// - otherwise `pause` if `is_playing` is true, else `play`. A missing or
    ///   non-boolean `is_playing` counts as paused.
    ///
    /// A `204` from the command means it took effect and yields the new
    /// state; anything else from the command is forwarded.
    pub async fn toggle(&self, authorization: &str) -> Result<ToggleOutcome> {
        let status = self.client.playback_status(authorization).await?;

        if status.is_no_content() {
            info!("nothing playing, toggle skipped");
            return Ok(ToggleOutcome::NothingPlaying);
        }
        if !status.is_success() {
            info!(status = %status.status, "playback status refused");
            return Ok(ToggleOutcome::Provider(status));
        }

        let was_playing = status
            .body
            .get("is_playing")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let command = if was_playing {
            PlayerCommand::Pause
        } else {
            PlayerCommand::Play
        };
        let response = match command {
            PlayerCommand::Pause => self.client.pause(authorization).await?,
            PlayerCommand::Play => self.client.play(authorization).await?,
        };

        if response.is_no_content() {
            info!(command = command.as_str(), "playback toggled");
            Ok(ToggleOutcome::Toggled(PlaybackState {
                is_playing: !was_playing,
            }))
        } else {
            info!(command = command.as_str(), status = %response.status, "player command refused");
            Ok(ToggleOutcome::Provider(response))
        }
    }
}
