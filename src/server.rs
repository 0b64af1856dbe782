use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    Res, api,
    codec::SecretCodec,
    config::Config,
    management::{PlaybackToggler, TokenBroker},
    spotify::SpotifyClient,
};

/// Request handler state. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppState {
    pub broker: Arc<TokenBroker>,
    /// `None` when playback control is disabled.
    pub toggler: Option<Arc<PlaybackToggler>>,
}

impl AppState {
    /// Wires the broker, and the toggler if enabled, from `config`.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = SpotifyClient::from_config(config)?;

        let broker = TokenBroker::new(
            client.clone(),
            SecretCodec::new(&config.encryption_key),
            config.credential.clone(),
            config.rotated_refresh_token,
        );
        let toggler = config
            .playback_enabled
            .then(|| Arc::new(PlaybackToggler::new(client)));

        Ok(AppState {
            broker: Arc::new(broker),
            toggler,
        })
    }
}

/// Builds the router. `/toggle` is only mounted when the state has a toggler,
/// and gets the toggler as its own state.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/swap", post(api::swap))
        .route("/refresh", post(api::refresh));

    if let Some(toggler) = state.toggler.clone() {
        app = app.route("/toggle", put(api::toggle).with_state(toggler));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Binds `config.server_addr` and serves until Ctrl-C or SIGTERM.
pub async fn start_api_server(config: &Config) -> Res<()> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        playback = config.playback_enabled,
        key = %config.encryption_key.fingerprint(),
        timeout_secs = config.provider_timeout.as_secs(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
