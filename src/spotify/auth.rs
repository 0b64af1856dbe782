use tracing::debug;

use crate::types::{Credential, ProviderResponse};

use super::{SpotifyClient, read_response};

impl SpotifyClient {
    /// Exchanges an authorization code for tokens.
    ///
    /// Sends `grant_type=authorization_code` together with the code and the
    /// configured redirect URI. The client credentials travel as HTTP Basic
    /// auth, as Spotify's accounts service expects for confidential clients.
    ///
    /// # Returns
    ///
    /// Spotify's status and JSON body, unchanged. On success the body holds
    /// `access_token`, `token_type`, `expires_in`, `scope` and usually a
    /// plaintext `refresh_token`.
    ///
    /// # Errors
    ///
    /// Only transport failures are errors. An expired or reused code is a
    /// normal `400` response from Spotify.
    pub async fn exchange_code(
        &self,
        code: &str,
        credential: &Credential,
    ) -> Result<ProviderResponse, reqwest::Error> {
        debug!(grant_type = "authorization_code", "requesting tokens");

        let res = self
            .http
            .post(self.token_url())
            .basic_auth(&credential.client_id, Some(&credential.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", credential.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        read_response(res).await
    }

    /// Obtains a new access token with a plaintext refresh token.
    ///
    /// The token passed in must already be decrypted; this client never sees
    /// the encrypted form.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
        credential: &Credential,
    ) -> Result<ProviderResponse, reqwest::Error> {
        debug!(grant_type = "refresh_token", "requesting tokens");

        let res = self
            .http
            .post(self.token_url())
            .basic_auth(&credential.client_id, Some(&credential.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        read_response(res).await
    }
}
