use std::net::SocketAddr;

use tracing::info;

use crate::{config, error, server};

pub async fn serve(bind: Option<SocketAddr>) {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let mut config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    if let Some(addr) = bind {
        config = config.with_server_addr(addr);
    }

    info!(config = %config, "configuration loaded");

    if let Err(e) = server::start_api_server(&config).await {
        error!("Server failed: {}", e);
    }
}
