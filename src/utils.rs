use base64::{Engine, engine::general_purpose::STANDARD};
use rand::Rng;

use crate::codec::KEY_SIZE;

/// Generates a random AES-256 key encoded as standard base64, ready to be
/// used as `ENCRYPTION_SECRET`.
pub fn generate_encryption_key() -> String {
    let mut key = [0u8; KEY_SIZE];
    rand::rng().fill(&mut key);
    STANDARD.encode(key)
}

/// Parses a boolean-ish configuration flag.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Returns the trimmed value if it is a non-empty string.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
