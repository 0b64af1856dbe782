#![allow(dead_code)]

use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::STANDARD};
use spotswap::{
    codec::{EncryptionKey, SecretCodec},
    config::{self, Config},
    management::{PlaybackToggler, TokenBroker},
    spotify::SpotifyClient,
};
use wiremock::MockServer;

pub const KEY: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";
pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const CALLBACK_URL: &str = "myapp://callback";
pub const BEARER: &str = "Bearer user-access-token";

/// Configuration pointing both Spotify hosts at `server`.
pub fn config(server: &MockServer, extra: &[(&str, &str)]) -> Config {
    config_for(&server.uri(), extra)
}

pub fn config_for(base: &str, extra: &[(&str, &str)]) -> Config {
    let api = format!("{base}/v1");
    let mut vars: HashMap<&str, String> = HashMap::from([
        (config::CLIENT_ID, CLIENT_ID.to_string()),
        (config::CLIENT_SECRET, CLIENT_SECRET.to_string()),
        (config::CALLBACK_URL, CALLBACK_URL.to_string()),
        (config::ENCRYPTION_SECRET, KEY.to_string()),
        (config::ACCOUNTS_URL, base.to_string()),
        (config::API_URL, api),
        (config::PROVIDER_TIMEOUT, "2".to_string()),
    ]);
    for (name, value) in extra {
        vars.insert(*name, value.to_string());
    }

    Config::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

pub fn codec() -> SecretCodec {
    SecretCodec::new(&EncryptionKey::from_base64(KEY).unwrap())
}

pub fn broker(config: &Config) -> TokenBroker {
    TokenBroker::new(
        SpotifyClient::from_config(config).unwrap(),
        SecretCodec::new(&config.encryption_key),
        config.credential.clone(),
        config.rotated_refresh_token,
    )
}

pub fn toggler(config: &Config) -> PlaybackToggler {
    PlaybackToggler::new(SpotifyClient::from_config(config).unwrap())
}

/// `Authorization` header value the accounts service should receive.
pub fn basic_auth() -> String {
    format!("Basic {}", STANDARD.encode(format!("{CLIENT_ID}:{CLIENT_SECRET}")))
}
