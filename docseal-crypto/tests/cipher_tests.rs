//! Adversarial tests for ChaCha20-Poly1305 encryption/decryption.
//!
//! Tests wrong-key decryption, ciphertext tampering, nonce corruption,
//! truncation attacks, and boundary conditions. These validate the
//! guarantees the hybrid file pipeline relies on for bulk encryption.

use docseal_crypto::{
    decrypt, decrypt_string, encrypt, encrypt_string, generate_random_key, CryptoError,
    NONCE_SIZE, TAG_SIZE,
};

// ── Round Trip ──

#[test]
fn encrypt_decrypt_round_trip() {
    let key = generate_random_key();
    let plaintext = b"document bytes worth protecting";

    let encrypted = encrypt(&key, plaintext).unwrap();
    let decrypted = decrypt(&key, &encrypted).unwrap();

    assert_eq!(decrypted, plaintext);
}

#[test]
fn empty_plaintext_round_trip() {
    let key = generate_random_key();
    let encrypted = encrypt(&key, b"").unwrap();
    assert_eq!(encrypted.ciphertext.len(), TAG_SIZE);
    assert_eq!(decrypt(&key, &encrypted).unwrap(), b"");
}

#[test]
fn string_round_trip() {
    let key = generate_random_key();
    let encrypted = encrypt_string(&key, "héllo wörld").unwrap();
    assert_eq!(decrypt_string(&key, &encrypted).unwrap(), "héllo wörld");
}

#[test]
fn encryption_is_never_deterministic() {
    let key = generate_random_key();
    let a = encrypt(&key, b"same plaintext").unwrap();
    let b = encrypt(&key, b"same plaintext").unwrap();

    assert_ne!(a.nonce, b.nonce, "nonce must be fresh per call");
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn ciphertext_includes_tag_overhead() {
    let key = generate_random_key();
    let plaintext = b"sized payload";
    let encrypted = encrypt(&key, plaintext).unwrap();

    assert_eq!(encrypted.ciphertext.len(), plaintext.len() + TAG_SIZE);
    assert_eq!(encrypted.nonce.len(), NONCE_SIZE);
}

// ── Wrong Key ──

#[test]
fn decrypt_with_wrong_key_fails_with_integrity_error() {
    let key_a = generate_random_key();
    let key_b = generate_random_key();

    let encrypted = encrypt(&key_a, b"sensitive document data").unwrap();
    let err = decrypt(&key_b, &encrypted).unwrap_err();

    assert!(matches!(err, CryptoError::Integrity), "got: {err:?}");
}

// ── Ciphertext Tampering ──

#[test]
fn single_bit_flip_in_ciphertext_detected() {
    let key = generate_random_key();
    let encrypted = encrypt(&key, b"integrity-protected data").unwrap();

    let mut tampered = encrypted.clone();
    if let Some(byte) = tampered.ciphertext.last_mut() {
        *byte ^= 0x01; // single bit flip
    }

    assert!(matches!(
        decrypt(&key, &tampered),
        Err(CryptoError::Integrity)
    ));
}

#[test]
fn every_byte_position_tampering_detected() {
    let key = generate_random_key();
    let encrypted = encrypt(&key, b"test data for position tampering").unwrap();

    for i in 0..encrypted.ciphertext.len() {
        let mut tampered = encrypted.clone();
        tampered.ciphertext[i] ^= 0xFF;
        assert!(
            decrypt(&key, &tampered).is_err(),
            "tampering at byte {i} should be detected"
        );
    }
}

#[test]
fn appended_bytes_detected() {
    let key = generate_random_key();
    let mut encrypted = encrypt(&key, b"original data").unwrap();
    encrypted.ciphertext.push(0xFF);

    assert!(decrypt(&key, &encrypted).is_err());
}

// ── Nonce Tampering ──

#[test]
fn every_nonce_bit_flip_detected() {
    let key = generate_random_key();
    let encrypted = encrypt(&key, b"nonce-critical data").unwrap();

    for i in 0..NONCE_SIZE {
        let mut tampered = encrypted.clone();
        tampered.nonce[i] ^= 0x01;
        assert!(
            decrypt(&key, &tampered).is_err(),
            "nonce tampering at byte {i} should be detected"
        );
    }
}

// ── Truncation ──

#[test]
fn truncated_ciphertext_fails() {
    let key = generate_random_key();
    let mut encrypted = encrypt(&key, b"data that will be truncated").unwrap();
    encrypted.ciphertext.truncate(5);

    assert!(matches!(
        decrypt(&key, &encrypted),
        Err(CryptoError::Integrity)
    ));
}

#[test]
fn empty_ciphertext_fails() {
    let key = generate_random_key();
    let mut encrypted = encrypt(&key, b"will be emptied").unwrap();
    encrypted.ciphertext.clear();

    assert!(decrypt(&key, &encrypted).is_err());
}

// ── Serialization ──

#[test]
fn encrypted_data_json_round_trip() {
    let key = generate_random_key();
    let encrypted = encrypt(&key, b"serialized payload").unwrap();

    let json = serde_json::to_string(&encrypted).unwrap();
    let restored: docseal_crypto::EncryptedData = serde_json::from_str(&json).unwrap();

    assert_eq!(encrypted, restored);
    assert_eq!(decrypt(&key, &restored).unwrap(), b"serialized payload");
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round_trip_always_reproduces_input(
            payload in proptest::collection::vec(any::<u8>(), 0..2048)
        ) {
            let key = generate_random_key();
            let encrypted = encrypt(&key, &payload).unwrap();
            let decrypted = decrypt(&key, &encrypted).unwrap();
            prop_assert_eq!(decrypted, payload);
        }
    }
}
