//! Shared types for hybrid file operations.

use docseal_crypto::NONCE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ciphertext plus the metadata needed to decrypt it: one nonce and one
/// wrapped file key per recipient, keyed by recipient fingerprint.
///
/// Immutable once produced; consumed any number of times by holders of a
/// matching private key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedFilePayload {
    /// Ciphertext with the authentication tag appended.
    pub ciphertext: Vec<u8>,
    /// Random 96-bit nonce, one per file, never per recipient.
    pub nonce: [u8; NONCE_SIZE],
    /// Wrapped file key per recipient fingerprint.
    pub wrapped_keys: BTreeMap<String, Vec<u8>>,
}

impl EncryptedFilePayload {
    /// The wrapped key entry for a recipient fingerprint, if any.
    pub fn wrapped_key_for(&self, fingerprint: &str) -> Option<&[u8]> {
        self.wrapped_keys.get(fingerprint).map(Vec::as_slice)
    }
}

/// What a completed upload hands back: the opaque storage path plus the
/// metadata the caller persists alongside it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub path: String,
    pub nonce: [u8; NONCE_SIZE],
    pub wrapped_keys: BTreeMap<String, Vec<u8>>,
}
