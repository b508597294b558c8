//! Binary-to-text codec for ciphertext blobs and MAC tags.
//!
//! Every text value produced by this crate is standard, padded base64
//! (RFC 4648 §4). Decoding is strict: whitespace, URL-safe characters and
//! missing padding are rejected rather than repaired.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::CryptoError;

/// Encodes raw bytes as standard base64.
pub fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decodes standard base64 text into raw bytes.
///
/// # Errors
///
/// Returns [`CryptoError::Decode`] if `text` is not valid padded base64.
pub fn decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    BASE64
        .decode(text)
        .map_err(|e| CryptoError::Decode(e.to_string()))
}
