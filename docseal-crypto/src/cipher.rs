//! Authenticated symmetric encryption with ChaCha20-Poly1305.
//!
//! Every encryption uses a fresh random 96-bit nonce; the Poly1305 tag is
//! appended to the ciphertext. Decryption fails closed: no plaintext is
//! returned unless the tag verifies.

use crate::error::{CryptoError, CryptoResult};
use crate::key::SymmetricKey;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Nonce size in bytes (96 bits, fixed by ChaCha20-Poly1305).
pub const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Ciphertext plus the random nonce it was produced under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// Ciphertext with the Poly1305 tag appended.
    pub ciphertext: Vec<u8>,
    /// Random 96-bit nonce, unique per encryption.
    pub nonce: [u8; NONCE_SIZE],
}

/// Encrypts a payload under a symmetric key with a fresh random nonce.
///
/// Never deterministic: encrypting the same plaintext twice yields
/// different ciphertexts.
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> CryptoResult<EncryptedData> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    Ok(EncryptedData { ciphertext, nonce })
}

/// Decrypts and verifies a payload.
///
/// Fails with [`CryptoError::Integrity`] when the tag does not verify
/// (tampering, corruption, or a wrong key/nonce).
pub fn decrypt(key: &SymmetricKey, data: &EncryptedData) -> CryptoResult<Vec<u8>> {
    // Anything shorter than a bare tag cannot be valid AEAD output
    if data.ciphertext.len() < TAG_SIZE {
        return Err(CryptoError::Integrity);
    }

    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
    cipher
        .decrypt(Nonce::from_slice(&data.nonce), data.ciphertext.as_ref())
        .map_err(|_| CryptoError::Integrity)
}

/// Encrypts a UTF-8 string.
pub fn encrypt_string(key: &SymmetricKey, plaintext: &str) -> CryptoResult<EncryptedData> {
    encrypt(key, plaintext.as_bytes())
}

/// Decrypts to a UTF-8 string.
pub fn decrypt_string(key: &SymmetricKey, data: &EncryptedData) -> CryptoResult<String> {
    let bytes = decrypt(key, data)?;
    String::from_utf8(bytes).map_err(|_| CryptoError::NotUtf8)
}
