//! Async orchestration over the collaborators.
//!
//! CPU-bound crypto runs on blocking tasks so a UI-facing runtime thread
//! never stalls. No partial state is persisted until the upload call
//! itself, so abandoning a task is a safe cancellation.

use crate::error::{ShareError, ShareResult};
use crate::gate::BiometricGate;
use crate::hybrid::{decrypt_for_recipient, encrypt_for_recipients};
use crate::remote::RemoteStore;
use crate::types::{EncryptedFilePayload, UploadReceipt};
use docseal_crypto::{RsaPrivateKey, RsaPublicKey, NONCE_SIZE};
use tracing::info;

/// Drives encrypt-then-upload and download-then-decrypt against an
/// injected remote store.
pub struct ShareClient<S: RemoteStore> {
    store: S,
}

impl<S: RemoteStore> ShareClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Encrypts for the recipients off the async thread, uploads the
    /// ciphertext, and returns a receipt whose nonce and wrapped keys the
    /// caller persists alongside the path.
    pub async fn upload_encrypted(
        &self,
        data: Vec<u8>,
        recipients: Vec<(String, RsaPublicKey)>,
        progress: impl FnMut(u8) + Send + 'static,
    ) -> ShareResult<UploadReceipt> {
        let payload = tokio::task::spawn_blocking(move || {
            encrypt_for_recipients(&data, &recipients, progress)
        })
        .await
        .map_err(|e| ShareError::Task(e.to_string()))??;

        let EncryptedFilePayload {
            ciphertext,
            nonce,
            wrapped_keys,
        } = payload;

        let path = self.store.upload(ciphertext).await?;
        info!(
            "uploaded encrypted blob to {path} for {} recipient(s)",
            wrapped_keys.len()
        );

        Ok(UploadReceipt {
            path,
            nonce,
            wrapped_keys,
        })
    }

    /// Downloads a blob and decrypts it for one recipient.
    pub async fn download_decrypt(
        &self,
        path: &str,
        nonce: [u8; NONCE_SIZE],
        wrapped_key: Vec<u8>,
        private_key: RsaPrivateKey,
    ) -> ShareResult<Vec<u8>> {
        let ciphertext = self.store.download(path).await?;

        tokio::task::spawn_blocking(move || {
            decrypt_for_recipient(&ciphertext, nonce, &wrapped_key, &private_key)
        })
        .await
        .map_err(|e| ShareError::Task(e.to_string()))?
    }

    /// Like [`Self::download_decrypt`], but consults the biometric gate
    /// first and refuses with [`ShareError::GateDenied`] on failure.
    pub async fn download_decrypt_gated(
        &self,
        gate: &impl BiometricGate,
        credential_id: &str,
        path: &str,
        nonce: [u8; NONCE_SIZE],
        wrapped_key: Vec<u8>,
        private_key: RsaPrivateKey,
    ) -> ShareResult<Vec<u8>> {
        if !gate.authenticate(credential_id)? {
            return Err(ShareError::GateDenied);
        }
        self.download_decrypt(path, nonce, wrapped_key, private_key)
            .await
    }
}
