use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};

use crate::{error::AppError, management::PlaybackToggler};

/// `PUT /toggle`: pauses if playing, plays if paused.
///
/// The caller's `Authorization` header is passed to Spotify as is; this
/// service does not check the token itself.
pub async fn toggle(
    State(toggler): State<Arc<PlaybackToggler>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingAuthorization)?;

    let outcome = toggler.toggle(authorization).await?;
    Ok(outcome.into_response())
}
