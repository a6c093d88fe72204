//! Asymmetric key engine: RSA keypairs, PEM interop, and key wrapping.
//!
//! File keys are wrapped with RSA-OAEP (SHA-256) under each recipient's
//! public key. Public keys export as SPKI PEM and private keys as PKCS#8
//! PEM for interop with external tooling. The user's own private key is
//! stored only in passphrase-protected form.

use crate::cipher::{decrypt, encrypt, EncryptedData};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, KdfParams, Salt, SymmetricKey, KEY_SIZE, SALT_SIZE};
use rand::rngs::OsRng;
use rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Fingerprint length in hex characters (160 bits).
pub const FINGERPRINT_LEN: usize = 40;

/// Supported RSA modulus sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeySize {
    #[serde(rename = "rsa-2048")]
    Rsa2048,
    #[serde(rename = "rsa-4096")]
    Rsa4096,
    #[serde(rename = "rsa-8192")]
    Rsa8192,
}

impl KeySize {
    pub fn bits(self) -> usize {
        match self {
            KeySize::Rsa2048 => 2048,
            KeySize::Rsa4096 => 4096,
            KeySize::Rsa8192 => 8192,
        }
    }

    /// Wrapped-key byte length, fixed by the modulus size.
    pub fn wrapped_len(self) -> usize {
        self.bits() / 8
    }

    pub fn from_bits(bits: usize) -> CryptoResult<Self> {
        match bits {
            2048 => Ok(KeySize::Rsa2048),
            4096 => Ok(KeySize::Rsa4096),
            8192 => Ok(KeySize::Rsa8192),
            other => Err(CryptoError::KeyGeneration(format!(
                "unsupported RSA key size: {other}"
            ))),
        }
    }
}

/// In-memory RSA keypair, not yet persisted.
pub struct RsaKeyPair {
    pub private: RsaPrivateKey,
    pub public: RsaPublicKey,
    pub size: KeySize,
}

/// Generates a fresh RSA keypair.
///
/// 8192-bit generation is slow; callers wanting cancellation should run it
/// on a task they can abandon — no partial state escapes this call.
pub fn generate_keypair(size: KeySize) -> CryptoResult<RsaKeyPair> {
    let private = RsaPrivateKey::new(&mut OsRng, size.bits())
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public = RsaPublicKey::from(&private);
    Ok(RsaKeyPair {
        private,
        public,
        size,
    })
}

/// Exports a public key as SPKI PEM (base64 body wrapped at 64 columns).
pub fn export_public_key_pem(key: &RsaPublicKey) -> CryptoResult<String> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| CryptoError::MalformedKey(e.to_string()))
}

/// Exports a private key as PKCS#8 PEM. The returned string zeroizes on drop.
pub fn export_private_key_pem(key: &RsaPrivateKey) -> CryptoResult<Zeroizing<String>> {
    key.to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| CryptoError::MalformedKey(e.to_string()))
}

/// Imports a public key from SPKI PEM.
pub fn import_public_key_pem(pem: &str) -> CryptoResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|e| CryptoError::MalformedKey(format!("invalid public key PEM: {e}")))
}

/// Imports a private key from PKCS#8 PEM.
pub fn import_private_key_pem(pem: &str) -> CryptoResult<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .map_err(|e| CryptoError::MalformedKey(format!("invalid private key PEM: {e}")))
}

/// Deterministic short identifier for a public key.
///
/// SHA-256 over the SPKI DER encoding, truncated to 160 bits, lowercase
/// hex. Re-deriving from the same public key always reproduces the same
/// value, across export/import round trips included.
pub fn fingerprint(key: &RsaPublicKey) -> CryptoResult<String> {
    let der = key
        .to_public_key_der()
        .map_err(|e| CryptoError::MalformedKey(e.to_string()))?;
    let digest = Sha256::digest(der.as_bytes());
    Ok(hex::encode(&digest[..FINGERPRINT_LEN / 2]))
}

/// Wraps a symmetric key under a recipient's public key with RSA-OAEP
/// (SHA-256). The output length equals the recipient's modulus size.
pub fn wrap_key(key: &SymmetricKey, recipient: &RsaPublicKey) -> CryptoResult<Vec<u8>> {
    let wrapped = recipient
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("key wrap failed: {e}")))?;
    debug_assert_eq!(wrapped.len(), recipient.size());
    Ok(wrapped)
}

/// Unwraps a symmetric key with the matching private key.
///
/// OAEP cannot distinguish a mismatched private key from corrupted input;
/// both surface as [`CryptoError::Unwrap`]. The wrapped length must match
/// the private key's modulus size.
pub fn unwrap_key(wrapped: &[u8], private: &RsaPrivateKey) -> CryptoResult<SymmetricKey> {
    if wrapped.len() != private.size() {
        return Err(CryptoError::InvalidKeyLength {
            expected: private.size(),
            actual: wrapped.len(),
        });
    }

    let plaintext = Zeroizing::new(
        private
            .decrypt(Oaep::new::<Sha256>(), wrapped)
            .map_err(|_| CryptoError::Unwrap)?,
    );

    if plaintext.len() != KEY_SIZE {
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: plaintext.len(),
        });
    }

    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&plaintext);
    Ok(SymmetricKey::from_bytes(bytes))
}

/// Private key PEM encrypted with a passphrase-derived key.
///
/// Bundles the PBKDF2 salt and iteration count with the ciphertext so the
/// passphrase is the only input needed for decryption.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PassphraseProtectedKey {
    pub salt: [u8; SALT_SIZE],
    pub iterations: u32,
    pub encrypted: EncryptedData,
}

/// Encrypts a private key under a passphrase with a fresh salt.
///
/// The PEM plaintext does not outlive this call.
pub fn encrypt_private_key(
    private: &RsaPrivateKey,
    passphrase: &str,
    params: &KdfParams,
) -> CryptoResult<PassphraseProtectedKey> {
    let salt = Salt::random();
    let wrapping_key = derive_key(passphrase, &salt, params);
    let pem = export_private_key_pem(private)?;
    let encrypted = encrypt(&wrapping_key, pem.as_bytes())?;

    Ok(PassphraseProtectedKey {
        salt: *salt.as_bytes(),
        iterations: params.effective_iterations(),
        encrypted,
    })
}

/// Decrypts a passphrase-protected private key.
///
/// A wrong passphrase fails the integrity check. Callers that know the key
/// came from a passphrase re-type that as a wrong-password error.
pub fn decrypt_private_key(
    protected: &PassphraseProtectedKey,
    passphrase: &str,
) -> CryptoResult<RsaPrivateKey> {
    let salt = Salt::from_bytes(protected.salt);
    let params = KdfParams {
        iterations: protected.iterations,
    };
    let wrapping_key = derive_key(passphrase, &salt, &params);

    let pem_bytes = Zeroizing::new(decrypt(&wrapping_key, &protected.encrypted)?);
    let pem = std::str::from_utf8(&pem_bytes).map_err(|_| CryptoError::Integrity)?;
    import_private_key_pem(pem)
}
