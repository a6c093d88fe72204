//! Encryption core for docseal.
//!
//! Provides client-side hybrid document encryption using:
//! - ChaCha20-Poly1305 for authenticated bulk encryption
//! - PBKDF2-HMAC-SHA256 for key derivation from passwords
//! - RSA-OAEP (SHA-256) for per-recipient key wrapping
//! - Secure key handling with zeroization
//!
//! # Architecture
//!
//! Encryption uses a hybrid two-tier key system:
//!
//! 1. **File Key**: a random 256-bit key generated per document. The
//!    document is bulk-encrypted exactly once with this key.
//!
//! 2. **Wrapped Key**: the file key encrypted under a recipient's RSA
//!    public key, one independent entry per recipient.
//!
//! This architecture allows:
//! - Sharing one document with many recipients at O(1) bulk-encryption cost
//! - Revoking or adding a recipient without touching the ciphertext
//! - Protecting the user's own private key under a passphrase so it is
//!   never persisted in the clear

mod cipher;
pub mod envelope;
mod error;
mod key;
pub mod strength;

pub use cipher::{
    decrypt, decrypt_string, encrypt, encrypt_string, EncryptedData, NONCE_SIZE, TAG_SIZE,
};
pub use envelope::{
    decrypt_private_key, encrypt_private_key, export_private_key_pem, export_public_key_pem,
    fingerprint, generate_keypair, import_private_key_pem, import_public_key_pem, unwrap_key,
    wrap_key, KeySize, PassphraseProtectedKey, RsaKeyPair, FINGERPRINT_LEN,
};
pub use error::{CryptoError, CryptoResult};
pub use key::{
    derive_key, generate_random_key, KdfParams, Salt, SymmetricKey, KEY_SIZE,
    PBKDF2_MIN_ITERATIONS, SALT_SIZE,
};
pub use strength::{evaluate, StrengthReport, STRONG_THRESHOLD};

// Key types callers hold when wrapping for recipients or unwrapping shares.
pub use rsa::{RsaPrivateKey, RsaPublicKey};
