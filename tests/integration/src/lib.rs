//! Integration tests for the Cipherkit crypto primitives.
//!
//! These tests exercise the public API across modules: AEAD blobs, MAC tags,
//! key generation and the wire format they share.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use anyhow::{ensure, Result};
use cipherkit_crypto::{aead, encoding};

// ============================================================================
// Blob Helpers
// ============================================================================

/// Returns `blob` with the decoded byte at `index` XOR-ed with `mask`.
pub fn tamper(blob: &str, index: usize, mask: u8) -> Result<String> {
    let mut raw = encoding::decode(blob)?;
    ensure!(index < raw.len(), "index {} outside blob of {} bytes", index, raw.len());
    raw[index] ^= mask;
    Ok(encoding::encode(&raw))
}

/// Splits a blob into its nonce and sealed body.
pub fn split_blob(blob: &str) -> Result<(Vec<u8>, Vec<u8>)> {
    let raw = encoding::decode(blob)?;
    ensure!(raw.len() >= aead::NONCE_SIZE, "blob shorter than nonce");
    let (nonce, body) = raw.split_at(aead::NONCE_SIZE);
    Ok((nonce.to_vec(), body.to_vec()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    use cipherkit_crypto::{constant_time_eq, mac, random, CryptoError, KeySize};
    use proptest::prelude::*;

    const SCENARIO_KEY: &[u8] = b"1234561234561234";

    #[test]
    fn test_documented_scenario() {
        let blob = aead::encrypt(b"test data", SCENARIO_KEY).unwrap();
        assert_eq!(&*aead::decrypt(&blob, SCENARIO_KEY).unwrap(), b"test data");

        assert_eq!(
            aead::encrypt(b"test data", b"12345"),
            Err(CryptoError::InvalidKeySize(5))
        );
        assert!(matches!(
            aead::decrypt("", SCENARIO_KEY),
            Err(CryptoError::InvalidInput(_))
        ));
        assert_eq!(mac::sign(b"", SCENARIO_KEY), "");
    }

    #[test]
    fn test_key_size_validation_across_api() {
        for bad in [8, 15, 17, 33] {
            let key = vec![7u8; bad];
            assert_eq!(aead::generate_key(bad), Err(CryptoError::InvalidKeySize(bad)));
            assert_eq!(aead::encrypt(b"x", &key), Err(CryptoError::InvalidKeySize(bad)));
            assert_eq!(
                aead::decrypt("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", &key),
                Err(CryptoError::InvalidKeySize(bad))
            );
        }

        for size in KeySize::ALL {
            let key = aead::generate_key(size.byte_len()).unwrap();
            let blob = aead::encrypt(b"x", &key).unwrap();
            assert_eq!(&*aead::decrypt(&blob, &key).unwrap(), b"x");
        }
    }

    #[test]
    fn test_wire_format_layout() {
        let key = aead::generate_key(24).unwrap();
        let plaintext = b"wire format check";

        let blob = aead::encrypt(plaintext, &key).unwrap();
        let (nonce, body) = split_blob(&blob).unwrap();

        assert_eq!(nonce.len(), aead::NONCE_SIZE);
        assert_eq!(body.len(), plaintext.len() + aead::TAG_SIZE);

        let mut sealed = nonce.clone();
        sealed.extend_from_slice(&body);
        assert_eq!(&*aead::open(&sealed, &key, None).unwrap(), plaintext);
    }

    #[test]
    fn test_tamper_every_byte_every_key_size() {
        for size in KeySize::ALL {
            let key = aead::generate_key(size.byte_len()).unwrap();
            let blob = aead::encrypt(b"tamper evident", &key).unwrap();
            let len = encoding::decode(&blob).unwrap().len();

            for i in 0..len {
                let tampered = tamper(&blob, i, 0x80).unwrap();
                assert_eq!(
                    aead::decrypt(&tampered, &key),
                    Err(CryptoError::AuthenticationFailed),
                    "{size}: byte {i}"
                );
            }
        }
    }

    #[test]
    fn test_encrypt_then_mac_workflow() {
        let enc_key = aead::generate_key(32).unwrap();
        let mac_key = random::generate_salt(48).unwrap();

        let blob = aead::encrypt(b"envelope", &enc_key).unwrap();
        let tag = mac::sign(blob.as_bytes(), &mac_key);

        assert!(mac::verify(blob.as_bytes(), &tag, &mac_key));
        assert_eq!(&*aead::decrypt(&blob, &enc_key).unwrap(), b"envelope");

        let tampered = tamper(&blob, aead::NONCE_SIZE, 0x01).unwrap();
        assert!(!mac::verify(tampered.as_bytes(), &tag, &mac_key));
    }

    #[test]
    fn test_mac_tag_wire_format() {
        let tag = mac::sign(b"data", b"key");
        let raw = encoding::decode(&tag).unwrap();

        assert_eq!(raw.len(), mac::MAC_SIZE);
        assert!(constant_time_eq(&raw, &mac::compute_tag(b"data", b"key").unwrap()));
    }

    #[test]
    fn test_concurrent_encryption_uses_distinct_nonces() {
        let key = aead::generate_key(32).unwrap();

        let blobs: Vec<String> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let key = &key;
                    s.spawn(move || {
                        (0..64)
                            .map(|_| aead::encrypt(b"same input", key).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let nonces: HashSet<Vec<u8>> = blobs
            .iter()
            .map(|b| split_blob(b).unwrap().0)
            .collect();
        assert_eq!(nonces.len(), blobs.len());

        for blob in &blobs {
            assert_eq!(&*aead::decrypt(blob, &key).unwrap(), b"same input");
        }
    }

    #[test]
    fn test_concurrent_sign_verify() {
        let key = random::generate_salt(32).unwrap();
        let expected = mac::sign(b"shared", &key);

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..100 {
                        assert_eq!(mac::sign(b"shared", &key), expected);
                        assert!(mac::verify(b"shared", &expected, &key));
                    }
                });
            }
        });
    }

    #[test]
    fn test_tamper_helper_bounds() {
        let blob = encoding::encode(b"abc");
        assert!(tamper(&blob, 3, 0xff).is_err());
        assert!(split_blob(&encoding::encode(b"short")).is_err());
    }

    proptest! {
        #[test]
        fn tampering_any_byte_is_detected(
            plaintext in proptest::collection::vec(any::<u8>(), 1..=128),
            idx in any::<prop::sample::Index>(),
            mask in 1u8..=255,
        ) {
            let key = aead::generate_key(16).unwrap();
            let blob = aead::encrypt(&plaintext, &key).unwrap();
            let len = encoding::decode(&blob).unwrap().len();

            let tampered = tamper(&blob, idx.index(len), mask).unwrap();
            prop_assert_eq!(
                aead::decrypt(&tampered, &key),
                Err(CryptoError::AuthenticationFailed)
            );
        }

        #[test]
        fn mac_roundtrip_any_input(
            data in proptest::collection::vec(any::<u8>(), 1..=512),
            key in proptest::collection::vec(any::<u8>(), 1..=128),
        ) {
            let sig = mac::sign(&data, &key);
            prop_assert!(mac::verify(&data, &sig, &key));
        }
    }
}
