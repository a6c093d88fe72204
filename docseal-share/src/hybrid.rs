//! Hybrid file encryption: one bulk encryption, one cheap wrap per
//! recipient.
//!
//! A file operation moves through key generation, bulk encryption,
//! per-recipient wrapping, and finalization; failure at any step aborts
//! the whole operation with nothing partial escaping.

use crate::error::{ShareError, ShareResult};
use crate::types::EncryptedFilePayload;
use docseal_crypto::{
    decrypt, encrypt, generate_random_key, unwrap_key, wrap_key, EncryptedData, RsaPrivateKey,
    RsaPublicKey, NONCE_SIZE,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Encrypts a file once and wraps the file key for every recipient.
///
/// ONE fresh symmetric key and nonce per file, not per recipient: bulk
/// encryption cost is independent of the recipient count, wraps are O(n).
///
/// `progress` receives monotonically non-decreasing percentages from 0 to
/// 100 at coarse milestones (key generation, bulk encryption, each wrap,
/// finalization); spacing is not uniform.
pub fn encrypt_for_recipients(
    data: &[u8],
    recipients: &[(String, RsaPublicKey)],
    mut progress: impl FnMut(u8),
) -> ShareResult<EncryptedFilePayload> {
    if recipients.is_empty() {
        return Err(ShareError::NoRecipients);
    }

    progress(0);
    let file_key = generate_random_key();
    progress(10);

    let encrypted = encrypt(&file_key, data)?;
    progress(60);

    let mut wrapped_keys = BTreeMap::new();
    for (i, (fingerprint, public_key)) in recipients.iter().enumerate() {
        let wrapped = wrap_key(&file_key, public_key)?;
        wrapped_keys.insert(fingerprint.clone(), wrapped);
        progress(60 + ((i + 1) * 35 / recipients.len()) as u8);
    }

    debug!(
        "encrypted {} bytes for {} recipient(s)",
        data.len(),
        recipients.len()
    );
    progress(100);

    Ok(EncryptedFilePayload {
        ciphertext: encrypted.ciphertext,
        nonce: encrypted.nonce,
        wrapped_keys,
    })
}

/// Decrypts a file for one recipient: unwrap the file key, then decrypt.
///
/// Any failure at either stage surfaces as
/// [`ShareError::DecryptionFailed`] with no partial output.
pub fn decrypt_for_recipient(
    ciphertext: &[u8],
    nonce: [u8; NONCE_SIZE],
    wrapped_key: &[u8],
    private_key: &RsaPrivateKey,
) -> ShareResult<Vec<u8>> {
    let file_key =
        unwrap_key(wrapped_key, private_key).map_err(|_| ShareError::DecryptionFailed)?;

    let encrypted = EncryptedData {
        ciphertext: ciphertext.to_vec(),
        nonce,
    };
    decrypt(&file_key, &encrypted).map_err(|_| ShareError::DecryptionFailed)
}

/// Decrypts a payload for the recipient with the given fingerprint.
pub fn decrypt_payload(
    payload: &EncryptedFilePayload,
    fingerprint: &str,
    private_key: &RsaPrivateKey,
) -> ShareResult<Vec<u8>> {
    let wrapped = payload
        .wrapped_key_for(fingerprint)
        .ok_or_else(|| ShareError::UnknownRecipient(fingerprint.to_string()))?;
    decrypt_for_recipient(&payload.ciphertext, payload.nonce, wrapped, private_key)
}
