//! Configuration management for the token swap service.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files, and are read exactly once into an immutable [`Config`] that the
//! server shares between requests. Nothing here is re-read at runtime.
//!
//! Lookup order:
//! 1. Process environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`spotswap/.env`)
//! 4. Application defaults for optional values

use std::{env, fmt, net::SocketAddr, path::PathBuf, time::Duration};

use crate::{
    codec::EncryptionKey,
    error::ConfigError,
    types::{Credential, RotationPolicy},
    utils,
};

pub const CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
pub const CALLBACK_URL: &str = "SPOTIFY_CLIENT_CALLBACK_URL";
pub const ENCRYPTION_SECRET: &str = "ENCRYPTION_SECRET";
pub const SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ACCOUNTS_URL: &str = "SPOTIFY_ACCOUNTS_URL";
pub const API_URL: &str = "SPOTIFY_API_URL";
pub const PROVIDER_TIMEOUT: &str = "SPOTSWAP_PROVIDER_TIMEOUT_SECS";
pub const ENABLE_PLAYBACK: &str = "SPOTSWAP_ENABLE_PLAYBACK";
pub const ROTATED_REFRESH_TOKEN: &str = "SPOTSWAP_ROTATED_REFRESH_TOKEN";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Loads environment variables from `.env` files.
///
/// A `.env` in the working directory is read first, then the one in the
/// platform-specific local data directory:
/// - Linux: `~/.local/share/spotswap/.env`
/// - macOS: `~/Library/Application Support/spotswap/.env`
/// - Windows: `%LOCALAPPDATA%/spotswap/.env`
///
/// Variables already present in the environment are never overridden.
/// Missing files are fine; a file that exists but cannot be parsed is not.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or a `.env`
/// file is malformed.
pub async fn load_env() -> Result<(), ConfigError> {
    let local = PathBuf::from(".env");
    if local.is_file() {
        dotenv::from_path(&local)?;
    }

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Location of the `.env` file in the local data directory.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotswap/.env");
    path
}

/// Immutable process configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub encryption_key: EncryptionKey,
    pub server_addr: SocketAddr,
    /// Base URL of the Spotify accounts service (token endpoint host).
    pub accounts_url: String,
    /// Base URL of the Spotify Web API.
    pub api_url: String,
    /// Timeout applied to every outbound call.
    pub provider_timeout: Duration,
    /// Whether `PUT /toggle` is served.
    pub playback_enabled: bool,
    pub rotated_refresh_token: RotationPolicy,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| utils::non_empty(lookup(name));
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let credential = Credential {
            client_id: required(CLIENT_ID)?,
            client_secret: required(CLIENT_SECRET)?,
            redirect_uri: required(CALLBACK_URL)?,
        };

        let encryption_key = EncryptionKey::from_base64(&required(ENCRYPTION_SECRET)?)
            .map_err(|reason| ConfigError::Invalid {
                name: ENCRYPTION_SECRET,
                reason,
            })?;

        let server_addr = get(SERVER_ADDRESS)
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: SERVER_ADDRESS,
                reason: e.to_string(),
            })?;

        let provider_timeout = match get(PROVIDER_TIMEOUT) {
            None => DEFAULT_PROVIDER_TIMEOUT,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: PROVIDER_TIMEOUT,
                        reason: format!("expected a positive number of seconds, got `{raw}`"),
                    });
                }
            },
        };

        let playback_enabled = match get(ENABLE_PLAYBACK) {
            None => true,
            Some(raw) => utils::parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
                name: ENABLE_PLAYBACK,
                reason: format!("expected a boolean, got `{raw}`"),
            })?,
        };

        let rotated_refresh_token = match get(ROTATED_REFRESH_TOKEN) {
            None => RotationPolicy::default(),
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                name: ROTATED_REFRESH_TOKEN,
                reason,
            })?,
        };

        Ok(Self {
            credential,
            encryption_key,
            server_addr,
            accounts_url: get(ACCOUNTS_URL).unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string()),
            api_url: get(API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            provider_timeout,
            playback_enabled,
            rotated_refresh_token,
        })
    }

    /// Replaces the bind address, e.g. from a command-line flag.
    pub fn with_server_addr(mut self, addr: SocketAddr) -> Self {
        self.server_addr = addr;
        self
    }
}

/// One-line startup summary. Credential values never appear; the key is
/// shown by fingerprint only.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "addr={} accounts_url={} api_url={} key={} timeout={}s playback={} rotation={:?}",
            self.server_addr,
            self.accounts_url,
            self.api_url,
            self.encryption_key.fingerprint(),
            self.provider_timeout.as_secs(),
            self.playback_enabled,
            self.rotated_refresh_token,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const KEY: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";

    fn vars(extra: &[(&str, &str)]) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = [
            (CLIENT_ID, "client"),
            (CLIENT_SECRET, "s3cr3t-value"),
            (CALLBACK_URL, "app://callback"),
            (ENCRYPTION_SECRET, KEY),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in extra {
            map.insert(k.to_string(), v.to_string());
        }
        map
    }

    fn load(map: &HashMap<String, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = load(&vars(&[])).unwrap();
        assert_eq!(config.credential.client_id, "client");
        assert_eq!(config.credential.redirect_uri, "app://callback");
        assert_eq!(config.server_addr, DEFAULT_SERVER_ADDRESS.parse().unwrap());
        assert_eq!(config.accounts_url, DEFAULT_ACCOUNTS_URL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.provider_timeout, DEFAULT_PROVIDER_TIMEOUT);
        assert!(config.playback_enabled);
        assert_eq!(config.rotated_refresh_token, RotationPolicy::Encrypt);
    }

    #[test]
    fn each_required_variable_is_enforced() {
        for name in [CLIENT_ID, CLIENT_SECRET, CALLBACK_URL, ENCRYPTION_SECRET] {
            let mut map = vars(&[]);
            map.remove(name);
            match load(&map) {
                Err(ConfigError::Missing(missing)) => assert_eq!(missing, name),
                other => panic!("expected missing {name}, got {other:?}"),
            }

            let map = vars(&[(name, "  ")]);
            assert!(matches!(load(&map), Err(ConfigError::Missing(_))));
        }
    }

    #[test]
    fn optional_overrides() {
        let config = load(&vars(&[
            (SERVER_ADDRESS, "127.0.0.1:9000"),
            (ACCOUNTS_URL, "http://localhost:1234"),
            (API_URL, "http://localhost:1234/v1"),
            (PROVIDER_TIMEOUT, "3"),
            (ENABLE_PLAYBACK, "off"),
            (ROTATED_REFRESH_TOKEN, "passthrough"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr.port(), 9000);
        assert_eq!(config.accounts_url, "http://localhost:1234");
        assert_eq!(config.provider_timeout, Duration::from_secs(3));
        assert!(!config.playback_enabled);
        assert_eq!(config.rotated_refresh_token, RotationPolicy::Passthrough);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (name, value) in [
            (ENCRYPTION_SECRET, "dG9vIHNob3J0"),
            (SERVER_ADDRESS, "not-an-address"),
            (PROVIDER_TIMEOUT, "0"),
            (PROVIDER_TIMEOUT, "soon"),
            (ENABLE_PLAYBACK, "maybe"),
            (ROTATED_REFRESH_TOKEN, "drop"),
        ] {
            match load(&vars(&[(name, value)])) {
                Err(ConfigError::Invalid { name: got, .. }) => assert_eq!(got, name),
                other => panic!("expected {name}={value} to be invalid, got {other:?}"),
            }
        }
    }

    #[test]
    fn values_are_trimmed() {
        let config = load(&vars(&[
            (CLIENT_ID, "  client  "),
            (CLIENT_SECRET, "\ts3cr3t-value\n"),
            (CALLBACK_URL, " app://callback "),
            (ACCOUNTS_URL, " http://localhost:1234 "),
            (SERVER_ADDRESS, " 127.0.0.1:9000 "),
            (PROVIDER_TIMEOUT, " 3 "),
        ]))
        .unwrap();

        assert_eq!(config.credential.client_id, "client");
        assert_eq!(config.credential.client_secret, "s3cr3t-value");
        assert_eq!(config.credential.redirect_uri, "app://callback");
        assert_eq!(config.accounts_url, "http://localhost:1234");
        assert_eq!(config.server_addr.port(), 9000);
        assert_eq!(config.provider_timeout, Duration::from_secs(3));
    }

    #[test]
    fn startup_summary_hides_credential() {
        let config = load(&vars(&[(CLIENT_ID, "my-client-id-1234")])).unwrap();
        let rendered = config.to_string();

        assert!(rendered.contains(DEFAULT_ACCOUNTS_URL));
        assert!(rendered.contains(DEFAULT_API_URL));
        assert!(rendered.contains(&config.encryption_key.fingerprint()));
        for hidden in ["my-client-id-1234", "s3cr3t-value", "app://callback", KEY] {
            assert!(!rendered.contains(hidden), "summary leaks `{hidden}`");
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = load(&vars(&[])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cr3t-value"));
        assert!(!rendered.contains(KEY));
    }
}
