//! AES-GCM authenticated encryption.
//!
//! Provides authenticated encryption with associated data (AEAD) using
//! AES-GCM with 128, 192 or 256-bit keys. The cipher strength is picked
//! from the key length alone.
//!
//! Sealed format: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.
//! The text-level functions ([`encrypt`], [`decrypt`]) carry that layout as
//! standard base64, so a blob is self-describing and decryption needs only
//! the key.

use aes_gcm::{
    aead::{consts::U12, Aead, KeyInit, Payload},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};
use tracing::debug;
use zeroize::Zeroizing;

use crate::encoding;
use crate::error::CryptoError;
use crate::keys::KeySize;
use crate::random::generate_nonce;

pub use crate::keys::generate_key;

/// Size of a GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Size of a GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// A keyed AES-GCM instance of whichever strength the key selects.
enum Cipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl Cipher {
    fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let cipher = match KeySize::from_len(key.len())? {
            KeySize::Aes128 => Aes128Gcm::new_from_slice(key).map(Self::Aes128),
            KeySize::Aes192 => Aes192Gcm::new_from_slice(key).map(Self::Aes192),
            KeySize::Aes256 => Aes256Gcm::new_from_slice(key).map(Self::Aes256),
        };

        cipher.map_err(|e| CryptoError::CipherConstructionFailed(e.to_string()))
    }

    fn encrypt(&self, nonce: &[u8], msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::from_slice(nonce);
        let payload = Payload { msg, aad };
        match self {
            Self::Aes128(c) => c.encrypt(nonce, payload),
            Self::Aes192(c) => c.encrypt(nonce, payload),
            Self::Aes256(c) => c.encrypt(nonce, payload),
        }
    }

    fn decrypt(&self, nonce: &[u8], msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::from_slice(nonce);
        let payload = Payload { msg, aad };
        match self {
            Self::Aes128(c) => c.decrypt(nonce, payload),
            Self::Aes192(c) => c.decrypt(nonce, payload),
            Self::Aes256(c) => c.decrypt(nonce, payload),
        }
    }
}

fn require_non_empty(value: &[u8], what: &str) -> Result<(), CryptoError> {
    if value.is_empty() {
        return Err(CryptoError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Encrypts `plaintext` into raw sealed bytes.
///
/// A fresh random nonce is drawn for every call and prepended to the output.
///
/// # Arguments
///
/// * `plaintext` - Data to encrypt, must not be empty
/// * `key` - 16, 24 or 32-byte key
/// * `associated_data` - Optional additional data to authenticate (not encrypted)
///
/// # Errors
///
/// * [`CryptoError::InvalidInput`] if `plaintext` or `key` is empty
/// * [`CryptoError::InvalidKeySize`] if `key` is not 16, 24 or 32 bytes
/// * [`CryptoError::RandomSource`] if no nonce could be drawn
pub fn seal(
    plaintext: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
) -> Result<Vec<u8>, CryptoError> {
    require_non_empty(plaintext, "plaintext")?;
    require_non_empty(key, "key")?;

    let cipher = Cipher::new(key)?;
    let nonce = generate_nonce()?;

    // Only reachable for plaintexts beyond the GCM length limit.
    let sealed = cipher
        .encrypt(&nonce, plaintext, associated_data.unwrap_or_default())
        .map_err(|_| {
            CryptoError::CipherConstructionFailed("payload rejected by AES-GCM".to_string())
        })?;

    let mut result = Vec::with_capacity(NONCE_SIZE + sealed.len());
    result.extend_from_slice(&nonce);
    result.extend_from_slice(&sealed);

    debug!(
        key_bits = key.len() * 8,
        plaintext_len = plaintext.len(),
        sealed_len = result.len(),
        "sealed payload"
    );

    Ok(result)
}

/// Decrypts raw sealed bytes produced by [`seal`].
///
/// # Arguments
///
/// * `sealed` - `nonce || ciphertext || tag`
/// * `key` - The key used to seal
/// * `associated_data` - The associated data supplied when sealing, if any
///
/// # Errors
///
/// * [`CryptoError::InvalidInput`] if `sealed` or `key` is empty
/// * [`CryptoError::InvalidKeySize`] if `key` is not 16, 24 or 32 bytes
/// * [`CryptoError::CiphertextTooShort`] if `sealed` is shorter than the nonce
/// * [`CryptoError::AuthenticationFailed`] if the tag does not verify
pub fn open(
    sealed: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    require_non_empty(sealed, "ciphertext")?;
    require_non_empty(key, "key")?;

    let cipher = Cipher::new(key)?;

    if sealed.len() < NONCE_SIZE {
        return Err(CryptoError::CiphertextTooShort {
            len: sealed.len(),
            min: NONCE_SIZE,
        });
    }

    let (nonce, body) = sealed.split_at(NONCE_SIZE);

    let plaintext = cipher
        .decrypt(nonce, body, associated_data.unwrap_or_default())
        .map_err(|_| {
            debug!(key_bits = key.len() * 8, sealed_len = sealed.len(), "authentication failed");
            CryptoError::AuthenticationFailed
        })?;

    Ok(Zeroizing::new(plaintext))
}

/// Encrypts `plaintext` and returns a base64 ciphertext blob.
///
/// No associated data is bound. See [`encrypt_with_aad`].
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<String, CryptoError> {
    encrypt_with_aad(plaintext, key, None)
}

/// Encrypts `plaintext`, binding `associated_data`, and returns a base64 blob.
pub fn encrypt_with_aad(
    plaintext: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
) -> Result<String, CryptoError> {
    let sealed = seal(plaintext, key, associated_data)?;
    Ok(encoding::encode(&sealed))
}

/// Decrypts a base64 blob produced by [`encrypt`].
///
/// Returns the plaintext wrapped in `Zeroizing` for automatic memory cleanup.
///
/// # Errors
///
/// As [`open`], plus [`CryptoError::Decode`] if `blob` is not valid base64.
pub fn decrypt(blob: &str, key: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    decrypt_with_aad(blob, key, None)
}

/// Decrypts a base64 blob produced by [`encrypt_with_aad`].
pub fn decrypt_with_aad(
    blob: &str,
    key: &[u8],
    associated_data: Option<&[u8]>,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    require_non_empty(blob.as_bytes(), "ciphertext")?;
    require_non_empty(key, "key")?;
    KeySize::from_len(key.len())?;

    let sealed = encoding::decode(blob)?;
    open(&sealed, key, associated_data)
}
