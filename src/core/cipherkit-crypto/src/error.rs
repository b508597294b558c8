//! Cryptographic error types.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
///
/// Messages carry sizes and lengths only. No variant ever holds plaintext,
/// key bytes or other secret material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// A required argument was empty or otherwise unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Key length is not one of the supported AEAD sizes (16, 24 or 32 bytes).
    #[error("invalid key size: got {0} bytes, expected 16, 24 or 32")]
    InvalidKeySize(usize),

    /// Decoded ciphertext is shorter than the nonce it must start with.
    #[error("ciphertext too short: {len} bytes, need at least {min}")]
    CiphertextTooShort {
        /// Length of the decoded blob.
        len: usize,
        /// Minimum acceptable length.
        min: usize,
    },

    /// Text decoding of a ciphertext or signature failed.
    #[error("decode error: {0}")]
    Decode(String),

    /// The AEAD tag did not verify.
    ///
    /// Covers both tampered ciphertext and the wrong key; the two are
    /// deliberately indistinguishable.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The underlying cipher or MAC could not be constructed.
    #[error("cipher construction failed: {0}")]
    CipherConstructionFailed(String),

    /// The operating system random source could not be read.
    #[error("random source failure: {0}")]
    RandomSource(String),
}
