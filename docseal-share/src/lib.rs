//! Hybrid file encryption orchestration for docseal.
//!
//! Composes the crypto core into whole-file operations: a document is
//! bulk-encrypted exactly once under a fresh file key, and that key is
//! wrapped separately for each recipient's public key. Retrieval unwraps
//! with the viewer's private key and decrypts.
//!
//! The remote storage backend and the platform biometric authenticator
//! are injected collaborators; this crate never performs I/O of its own
//! beyond what those traits expose.

mod client;
mod error;
mod gate;
mod hybrid;
mod remote;
mod types;

pub use client::ShareClient;
pub use error::{ShareError, ShareResult};
pub use gate::{BiometricGate, StaticGate};
pub use hybrid::{decrypt_for_recipient, decrypt_payload, encrypt_for_recipients};
pub use remote::{MemoryRemoteStore, RemoteStore};
pub use types::{EncryptedFilePayload, UploadReceipt};
