use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    codec::SecretCodec,
    error::{CodecError, Result},
    spotify::SpotifyClient,
    types::{Credential, ProviderResponse, RotationPolicy},
};

/// Runs the authorization-code and refresh-token grants, keeping refresh
/// tokens encrypted on the way out and decrypting them on the way in.
#[derive(Debug, Clone)]
pub struct TokenBroker {
    client: SpotifyClient,
    codec: SecretCodec,
    credential: Credential,
    rotation: RotationPolicy,
}

impl TokenBroker {
    pub fn new(
        client: SpotifyClient,
        codec: SecretCodec,
        credential: Credential,
        rotation: RotationPolicy,
    ) -> Self {
        TokenBroker {
            client,
            codec,
            credential,
            rotation,
        }
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// When Spotify answers with a 2xx status and the body carries a
    /// `refresh_token`, that field is replaced by its encrypted form. Every
    /// other field and the status code are returned exactly as received. On a
    /// non-success answer nothing is encrypted.
    pub async fn swap(&self, code: &str) -> Result<ProviderResponse> {
        let mut response = self.client.exchange_code(code, &self.credential).await?;

        if response.is_success() {
            let sealed = self.seal_refresh_token(&mut response.body)?;
            info!(status = %response.status, sealed, "authorization code swapped");
        } else {
            info!(status = %response.status, "provider rejected authorization code");
        }

        Ok(response)
    }

    /// Renews an access token with a refresh token previously issued by
    /// [`TokenBroker::swap`].
    ///
    /// A token that does not decrypt under this process's key is rejected
    /// before any call to Spotify is made. The provider's answer is returned
    /// with its status untouched. If Spotify rotates the refresh token, the
    /// configured [`RotationPolicy`] decides whether it is encrypted.
    pub async fn refresh(&self, encrypted_refresh_token: &str) -> Result<ProviderResponse> {
        let refresh_token = self
            .codec
            .decrypt(encrypted_refresh_token)
            .inspect_err(|e| debug!(reason = %e, "refresh token rejected"))?;

        let mut response = self
            .client
            .refresh_token(&refresh_token, &self.credential)
            .await?;

        if response.is_success() && response.refresh_token().is_some() {
            match self.rotation {
                RotationPolicy::Encrypt => {
                    warn!("provider rotated the refresh token; returning it encrypted");
                    self.seal_refresh_token(&mut response.body)?;
                }
                RotationPolicy::Passthrough => {
                    warn!("provider rotated the refresh token; returning it unencrypted");
                }
            }
        }

        info!(status = %response.status, "refresh token exchanged");
        Ok(response)
    }

    /// Replaces a string `refresh_token` field in `body` with its encrypted
    /// form. Returns whether a token was sealed.
    fn seal_refresh_token(&self, body: &mut Value) -> std::result::Result<bool, CodecError> {
        let Some(slot) = body.get_mut("refresh_token") else {
            return Ok(false);
        };
        let Some(plaintext) = slot.as_str() else {
            return Ok(false);
        };

        let sealed = self.codec.encrypt(plaintext)?;
        *slot = Value::String(sealed);
        Ok(true)
    }
}
