//! Share orchestration error types.

use docseal_crypto::CryptoError;
use thiserror::Error;

/// Result type for share operations.
pub type ShareResult<T> = Result<T, ShareError>;

/// Errors that can occur in hybrid file encryption and transfer.
#[derive(Debug, Error)]
pub enum ShareError {
    /// Unwrap or bulk decryption failed. No partial output is ever
    /// returned from either stage.
    #[error("decryption failed (wrong key or corrupted payload)")]
    DecryptionFailed,

    #[error("no recipients supplied")]
    NoRecipients,

    #[error("no wrapped key entry for recipient {0}")]
    UnknownRecipient(String),

    #[error("biometric gate denied access")]
    GateDenied,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("background task failed: {0}")]
    Task(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
