//! Symmetric key material and password-based key derivation.
//!
//! Keys are 256-bit and zeroized on drop. Password-derived keys use
//! PBKDF2-HMAC-SHA256 with a per-operation random 256-bit salt and a
//! tunable iteration count whose default acts as a floor.

use crate::error::{CryptoError, CryptoResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key size in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Salt size in bytes (256 bits).
pub const SALT_SIZE: usize = 32;

/// Minimum PBKDF2 iteration count. Callers may raise it; lower requests
/// are clamped up to this floor.
pub const PBKDF2_MIN_ITERATIONS: u32 = 100_000;

/// A 256-bit symmetric key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Exports the raw key as base64 for storage or transmission.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Imports a key from its base64 export.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| CryptoError::MalformedKey(format!("invalid base64 key: {e}")))?;
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_SIZE];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Generates a fresh random 256-bit symmetric key.
pub fn generate_random_key() -> SymmetricKey {
    let mut bytes = [0u8; KEY_SIZE];
    OsRng.fill_bytes(&mut bytes);
    SymmetricKey(bytes)
}

/// Random salt for password-based key derivation.
///
/// Fresh per key-protection operation, never reused across users or
/// rotations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// PBKDF2 work-factor parameters.
#[derive(Clone, Debug)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: PBKDF2_MIN_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// The iteration count actually used: requests below the floor are
    /// clamped up.
    pub fn effective_iterations(&self) -> u32 {
        self.iterations.max(PBKDF2_MIN_ITERATIONS)
    }
}

/// Derives a 256-bit wrapping key from a password via PBKDF2-HMAC-SHA256.
///
/// Derivation itself cannot fail; a wrong password is only observable
/// downstream, when decrypting something protected with the correctly
/// derived key fails its integrity check.
pub fn derive_key(password: &str, salt: &Salt, params: &KdfParams) -> SymmetricKey {
    let mut out = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        params.effective_iterations(),
        &mut out,
    );
    SymmetricKey(out)
}
