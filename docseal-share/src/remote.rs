//! Remote blob storage collaborator.
//!
//! The core only needs "upload bytes, get back an opaque path" and the
//! inverse. No schema is assumed beyond the backend being able to hold
//! the ciphertext blob; nonce and wrapped keys travel in the caller's
//! metadata channel.

use crate::error::{ShareError, ShareResult};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Opaque remote blob storage.
pub trait RemoteStore: Send + Sync {
    /// Uploads a blob, returning an opaque path/id for later retrieval.
    fn upload(&self, bytes: Vec<u8>) -> impl Future<Output = ShareResult<String>> + Send;

    /// Downloads a blob by the path `upload` returned.
    fn download(&self, path: &str) -> impl Future<Output = ShareResult<Vec<u8>>> + Send;
}

impl<T: RemoteStore> RemoteStore for std::sync::Arc<T> {
    async fn upload(&self, bytes: Vec<u8>) -> ShareResult<String> {
        (**self).upload(bytes).await
    }

    async fn download(&self, path: &str) -> ShareResult<Vec<u8>> {
        (**self).download(path).await
    }
}

/// In-memory remote store for tests and embedding hosts.
#[derive(Default)]
pub struct MemoryRemoteStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently held.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }
}

impl RemoteStore for MemoryRemoteStore {
    async fn upload(&self, bytes: Vec<u8>) -> ShareResult<String> {
        let path = format!("blobs/{}", Uuid::new_v4());
        self.blobs.write().await.insert(path.clone(), bytes);
        Ok(path)
    }

    async fn download(&self, path: &str) -> ShareResult<Vec<u8>> {
        self.blobs
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| ShareError::Storage(format!("blob not found: {path}")))
    }
}
