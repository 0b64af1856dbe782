//! Authenticated encryption of refresh tokens.
//!
//! Tokens are sealed with AES-256-GCM under the process-wide key. The
//! encrypted form is URL-safe base64 (no padding) of
//! `version || nonce || ciphertext || tag`, so it can be handed to callers
//! and sent back in a form field without further escaping. A fresh random
//! nonce is drawn for every call, so encrypting the same token twice gives
//! two different strings.

use std::fmt;

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng, Payload},
};
use base64::{
    Engine, alphabet,
    engine::{
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::URL_SAFE_NO_PAD,
    },
};
use sha2::{Digest, Sha256};

use crate::error::CodecError;

/// Size of an AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

const FORMAT_VERSION: u8 = 1;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// The symmetric key used for every codec operation.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl EncryptionKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parses a key from base64, accepting the standard and URL-safe
    /// alphabets with or without padding.
    pub fn from_base64(encoded: &str) -> Result<Self, String> {
        let encoded = encoded.trim();
        let bytes = STANDARD_LENIENT
            .decode(encoded)
            .or_else(|_| URL_SAFE_LENIENT.decode(encoded))
            .map_err(|_| "key is not valid base64".to_string())?;

        let key: [u8; KEY_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| format!("key must be {KEY_SIZE} bytes, got {}", bytes.len()))?;

        Ok(Self(key))
    }

    /// Short, non-reversible identifier of the key, safe to log.
    pub fn fingerprint(&self) -> String {
        Sha256::digest(self.0)[..4]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

/// Encrypts and decrypts opaque token strings.
#[derive(Clone)]
pub struct SecretCodec {
    cipher: Aes256Gcm,
    fingerprint: String,
}

impl SecretCodec {
    pub fn new(key: &EncryptionKey) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key.0)),
            fingerprint: key.fingerprint(),
        }
    }

    /// Seals `plaintext` into a self-contained encrypted token.
    ///
    /// Fails only if the cipher refuses the input, which for AES-GCM means a
    /// plaintext far beyond any token size.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CodecError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: plaintext.as_bytes(),
                    aad: &[FORMAT_VERSION],
                },
            )
            .map_err(|_| CodecError::Seal)?;

        let mut blob = Vec::with_capacity(1 + NONCE_SIZE + sealed.len());
        blob.push(FORMAT_VERSION);
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&sealed);

        Ok(URL_SAFE_NO_PAD.encode(blob))
    }

    /// Opens a token produced by [`SecretCodec::encrypt`] under the same key.
    pub fn decrypt(&self, token: &str) -> Result<String, CodecError> {
        let blob = URL_SAFE_LENIENT
            .decode(token.trim())
            .map_err(|_| CodecError::Encoding)?;

        if blob.len() < 1 + NONCE_SIZE + TAG_SIZE {
            return Err(CodecError::Truncated);
        }

        let (version, rest) = (blob[0], &blob[1..]);
        if version != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }

        let (nonce, sealed) = rest.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: sealed,
                    aad: &[version],
                },
            )
            .map_err(|_| CodecError::Authentication)?;

        String::from_utf8(plaintext).map_err(|_| CodecError::Utf8)
    }
}

impl fmt::Debug for SecretCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretCodec")
            .field("key", &self.fingerprint)
            .finish_non_exhaustive()
    }
}
