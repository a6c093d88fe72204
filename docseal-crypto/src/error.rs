//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in the encryption core.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Authenticated decryption failed: tampered data, corruption, or a
    /// wrong key/nonce. The AEAD primitive cannot tell these apart.
    #[error("integrity check failed (wrong key or tampered data)")]
    Integrity,

    #[error("malformed key material: {0}")]
    MalformedKey(String),

    /// Asymmetric unwrap failed. OAEP does not distinguish a mismatched
    /// private key from corrupted input.
    #[error("key unwrap failed (wrong private key or corrupted data)")]
    Unwrap,

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("decrypted payload is not valid UTF-8")]
    NotUtf8,
}
