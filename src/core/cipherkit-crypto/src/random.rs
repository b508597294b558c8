//! Cryptographically secure random generation.
//!
//! Uses the operating system's CSPRNG for all random number generation.
//! `OsRng` holds no state, so concurrent callers always draw independent
//! bytes. A failing entropy source is reported, never papered over with a
//! weaker generator.

use rand::{rngs::OsRng, RngCore};
use tracing::trace;

use crate::aead::NONCE_SIZE;
use crate::error::CryptoError;

/// Fills `buf` from the OS random source.
///
/// # Errors
///
/// Returns [`CryptoError::RandomSource`] if the OS source cannot be read.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::RandomSource(e.to_string()))
}

/// Generates a fresh random nonce for AES-GCM.
pub fn generate_nonce() -> Result<[u8; NONCE_SIZE], CryptoError> {
    let mut nonce = [0u8; NONCE_SIZE];
    fill_random(&mut nonce)?;
    Ok(nonce)
}

/// Generates `len` cryptographically secure random bytes.
///
/// A zero length is valid and yields an empty vector.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, CryptoError> {
    let mut bytes = vec![0u8; len];
    fill_random(&mut bytes)?;
    trace!(len, "generated random bytes");
    Ok(bytes)
}

/// Generates a random salt of `len` bytes.
///
/// Same source as [`random_bytes`], but a zero-length salt is meaningless
/// and is rejected.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidInput`] if `len` is zero.
pub fn generate_salt(len: usize) -> Result<Vec<u8>, CryptoError> {
    if len == 0 {
        return Err(CryptoError::InvalidInput(
            "salt length must be > 0".to_string(),
        ));
    }

    random_bytes(len)
}
