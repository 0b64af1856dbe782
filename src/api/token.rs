use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{error::AppError, server::AppState, utils};

#[derive(Debug, Deserialize)]
pub struct SwapForm {
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshForm {
    refresh_token: Option<String>,
}

/// `POST /swap`: trades an authorization code for tokens.
///
/// The response mirrors Spotify's status. On success its `refresh_token`
/// is the encrypted form.
pub async fn swap(
    State(state): State<AppState>,
    form: Result<Form<SwapForm>, FormRejection>,
) -> Result<Response, AppError> {
    let code = form
        .ok()
        .and_then(|Form(f)| utils::non_empty(f.code))
        .ok_or(AppError::MissingParameter("code"))?;

    let response = state.broker.swap(&code).await?;
    Ok(response.into_response())
}

/// `POST /refresh`: trades an encrypted refresh token for a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    form: Result<Form<RefreshForm>, FormRejection>,
) -> Result<Response, AppError> {
    let refresh_token = form
        .ok()
        .and_then(|Form(f)| utils::non_empty(f.refresh_token))
        .ok_or(AppError::MissingParameter("refresh_token"))?;

    let response = state.broker.refresh(&refresh_token).await?;
    Ok(response.into_response())
}
