//! HMAC-SHA256 message authentication.
//!
//! Tags are the raw 32-byte digest encoded as standard base64, with no
//! framing. Verification folds every failure mode (empty input, malformed
//! signature, wrong key, tampered data) into a single `false`, so callers
//! cannot learn why a signature was rejected.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::trace;

use crate::compare::constant_time_eq;
use crate::encoding;
use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Size of an HMAC-SHA256 tag in bytes.
pub const MAC_SIZE: usize = 32;

/// Computes the raw HMAC-SHA256 tag of `data` under `key`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidInput`] if `data` or `key` is empty.
pub fn compute_tag(data: &[u8], key: &[u8]) -> Result<[u8; MAC_SIZE], CryptoError> {
    if data.is_empty() {
        return Err(CryptoError::InvalidInput("data must not be empty".to_string()));
    }
    if key.is_empty() {
        return Err(CryptoError::InvalidInput("key must not be empty".to_string()));
    }

    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| CryptoError::CipherConstructionFailed(e.to_string()))?;
    mac.update(data);

    Ok(mac.finalize().into_bytes().into())
}

/// Signs `data` with `key`, returning the base64 tag.
///
/// Empty `data` or `key` produce an empty string rather than an error, so
/// convenience call sites can sign optional values without branching. Use
/// [`sign_strict`] to have those cases reported.
pub fn sign(data: &[u8], key: &[u8]) -> String {
    sign_strict(data, key).unwrap_or_default()
}

/// Signs `data` with `key`, failing on empty input.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidInput`] if `data` or `key` is empty.
pub fn sign_strict(data: &[u8], key: &[u8]) -> Result<String, CryptoError> {
    let tag = compute_tag(data, key)?;
    trace!(data_len = data.len(), "computed hmac tag");
    Ok(encoding::encode(&tag))
}

/// Verifies a base64 `signature` over `data` under `key`.
///
/// The comparison is constant time with respect to the signature contents.
/// Returns `false` for empty arguments and undecodable signatures as well as
/// for plain mismatches.
pub fn verify(data: &[u8], signature: &str, key: &[u8]) -> bool {
    if data.is_empty() || signature.is_empty() || key.is_empty() {
        return false;
    }

    let Ok(provided) = encoding::decode(signature) else {
        return false;
    };
    let Ok(expected) = compute_tag(data, key) else {
        return false;
    };

    constant_time_eq(&expected, &provided)
}
