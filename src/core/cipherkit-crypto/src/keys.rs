//! AEAD key sizes and key generation.
//!
//! Keys themselves are plain caller-owned byte slices. This module only
//! knows which lengths the AEAD engine accepts and how to produce fresh
//! random keys of those lengths.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::random::fill_random;

/// Supported AES-GCM key strengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeySize {
    /// 16-byte key, AES-128-GCM.
    Aes128,
    /// 24-byte key, AES-192-GCM.
    Aes192,
    /// 32-byte key, AES-256-GCM (default).
    #[default]
    Aes256,
}

impl KeySize {
    /// All supported sizes, smallest first.
    pub const ALL: [KeySize; 3] = [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256];

    /// Maps a key length in bytes to its cipher strength.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeySize`] for any length other than 16, 24 or 32.
    pub fn from_len(len: usize) -> Result<Self, CryptoError> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            other => Err(CryptoError::InvalidKeySize(other)),
        }
    }

    /// Key length in bytes.
    #[inline]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Key length in bits.
    #[inline]
    pub const fn bits(self) -> usize {
        self.byte_len() * 8
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aes128 => write!(f, "aes128-gcm"),
            Self::Aes192 => write!(f, "aes192-gcm"),
            Self::Aes256 => write!(f, "aes256-gcm"),
        }
    }
}

impl FromStr for KeySize {
    type Err = CryptoError;

    /// Accepts the display name, the bit count or the byte count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aes128-gcm" | "128" | "16" => Ok(Self::Aes128),
            "aes192-gcm" | "192" | "24" => Ok(Self::Aes192),
            "aes256-gcm" | "256" | "32" => Ok(Self::Aes256),
            _ => Err(CryptoError::InvalidInput(format!("unknown key size: {s}"))),
        }
    }
}

/// Generates a random AEAD key of `size` bytes.
///
/// The key is wrapped in `Zeroizing` so it is wiped from memory on drop.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeySize`] unless `size` is 16, 24 or 32.
pub fn generate_key(size: usize) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let size = KeySize::from_len(size)?;
    let mut key = Zeroizing::new(vec![0u8; size.byte_len()]);
    fill_random(&mut key)?;
    Ok(key)
}
