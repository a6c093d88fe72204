//! Vault error types.

use docseal_crypto::CryptoError;
use thiserror::Error;

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Errors that can occur in key vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The supplied master password failed to decrypt the private key.
    /// At the primitive level this is an integrity failure; the vault
    /// re-types it because it knows the key came from a passphrase.
    #[error("wrong password")]
    WrongPassword,

    /// Rotation was refused before any new key material was generated.
    #[error("old password is incorrect")]
    InvalidOldPassword,

    #[error("password too weak: {}", .0.join("; "))]
    WeakPassword(Vec<String>),

    #[error("unsupported backup version: {0}")]
    UnsupportedBackupVersion(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
