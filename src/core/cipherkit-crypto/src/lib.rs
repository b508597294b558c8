//! # Cipherkit Crypto
//!
//! Low-level symmetric primitives for Cipherkit.
//!
//! This crate provides:
//! - Authenticated encryption (AES-128/192/256-GCM) with self-describing
//!   base64 ciphertext blobs
//! - Message authentication (HMAC-SHA256) with constant-time verification
//! - Secure random generation for keys, nonces and salts
//! - Constant-time byte comparison
//!
//! All functions are synchronous, hold no state between calls and are safe
//! to use from any number of threads. Keys are plain caller-owned byte
//! slices; nothing here persists or logs them.
//!
//! ```
//! use cipherkit_crypto::{aead, mac};
//!
//! let key = aead::generate_key(32)?;
//! let blob = aead::encrypt(b"test data", &key)?;
//! assert_eq!(&*aead::decrypt(&blob, &key)?, b"test data");
//!
//! let sig = mac::sign(b"test data", &key);
//! assert!(mac::verify(b"test data", &sig, &key));
//! # Ok::<(), cipherkit_crypto::CryptoError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aead;
pub mod compare;
pub mod encoding;
pub mod error;
pub mod keys;
pub mod mac;
pub mod random;

pub use compare::constant_time_eq;
pub use error::CryptoError;
pub use keys::KeySize;
