//! Password-protected key vault for docseal.
//!
//! Manages the lifecycle of the user's own keypair: generation behind a
//! password-strength gate, passphrase unlock, rotation, backup/restore,
//! and persistence over an injected key-value store with persistent and
//! session tiers.
//!
//! The private key only ever exists at rest in passphrase-encrypted form.
//! An optional lock watermark auto-purges a stored record the first time
//! it is read after expiry — reading destroys the data, it does not just
//! hide it. The vault performs no internal locking; concurrent writers
//! against the same tier must be serialized by the caller.

mod error;
mod store;

pub use error::{VaultError, VaultResult};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageTier};

use chrono::{DateTime, Utc};
use docseal_crypto::{
    decrypt_private_key, encrypt_private_key, evaluate, export_private_key_pem,
    export_public_key_pem, fingerprint, generate_keypair, CryptoError, KdfParams, KeySize,
    PassphraseProtectedKey, RsaKeyPair,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Storage slot for the serialized keypair record.
const RECORD_KEY: &str = "docseal.keys";

/// Storage slot for the auto-lock watermark (epoch milliseconds).
const LOCK_KEY: &str = "docseal.keys.lock";

/// Backup format version this build reads and writes.
pub const BACKUP_VERSION: &str = "1.0";

/// The persisted form of a user's keypair.
///
/// At most one active record exists per storage tier; rotation and import
/// fully replace it, never merge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyPairRecord {
    pub public_key_pem: String,
    pub private_key: PassphraseProtectedKey,
    pub fingerprint: String,
    pub algorithm: KeySize,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Versioned backup envelope. Import rejects any version other than
/// [`BACKUP_VERSION`], with no partial import.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupFile {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub keys: KeyPairRecord,
}

/// Persistence options for [`KeyVault::store`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StoreOptions {
    pub tier: StorageTier,
    /// Minutes until the stored record auto-purges on read.
    pub auto_lock_minutes: Option<u32>,
}

/// The key vault: one injected store per tier.
pub struct KeyVault {
    persistent: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl KeyVault {
    pub fn new(persistent: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self {
            persistent,
            session,
        }
    }

    /// A vault over in-memory stores, for tests and ephemeral hosts.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    fn tier_store(&self, tier: StorageTier) -> &dyn KeyValueStore {
        match tier {
            StorageTier::Persistent => self.persistent.as_ref(),
            StorageTier::Session => self.session.as_ref(),
        }
    }

    /// Generates a new user keypair behind the password-strength gate.
    ///
    /// The plaintext private key never outlives this call: it is encrypted
    /// under a key derived from `master_password` and a fresh salt before
    /// the record is returned. Nothing is persisted until [`store`].
    ///
    /// [`store`]: KeyVault::store
    pub fn generate_user_keys(
        &self,
        master_password: &str,
        size: KeySize,
    ) -> VaultResult<KeyPairRecord> {
        let report = evaluate(master_password);
        if !report.is_strong {
            return Err(VaultError::WeakPassword(report.feedback));
        }
        self.generate_user_keys_unchecked(master_password, size)
    }

    /// Generates a new user keypair without the strength gate.
    ///
    /// Only for callers that have explicitly confirmed a weak passphrase
    /// with the user.
    pub fn generate_user_keys_unchecked(
        &self,
        master_password: &str,
        size: KeySize,
    ) -> VaultResult<KeyPairRecord> {
        let pair = generate_keypair(size)?;
        let record = record_from_pair(&pair, master_password)?;
        info!("generated {:?} user keypair {}", size, record.fingerprint);
        Ok(record)
    }

    /// Decrypts the user's private key PEM with the master password.
    ///
    /// The returned PEM zeroizes on drop.
    pub fn decrypt_user_private_key(
        &self,
        record: &KeyPairRecord,
        password: &str,
    ) -> VaultResult<Zeroizing<String>> {
        let private = decrypt_private_key(&record.private_key, password).map_err(|e| match e {
            CryptoError::Integrity => VaultError::WrongPassword,
            other => VaultError::Crypto(other),
        })?;
        Ok(export_private_key_pem(&private)?)
    }

    /// Reports whether `password` unlocks the record, without erroring.
    pub fn verify_master_password(&self, record: &KeyPairRecord, password: &str) -> bool {
        decrypt_private_key(&record.private_key, password).is_ok()
    }

    /// Rotates to an entirely new keypair.
    ///
    /// Validates `old_password` first and fails fast with
    /// [`VaultError::InvalidOldPassword`] before any new key material is
    /// generated. Storage is untouched by this call — a failed rotation
    /// leaves the stored record exactly as it was, and installing the
    /// returned record is the caller's explicit [`store`] step.
    ///
    /// Rotation does NOT re-wrap symmetric keys already shared under the
    /// old public key; those remain decryptable only by the old private
    /// key until the application re-wraps them.
    ///
    /// [`store`]: KeyVault::store
    pub fn rotate_keys(
        &self,
        record: &KeyPairRecord,
        old_password: &str,
        new_password: &str,
        new_size: Option<KeySize>,
    ) -> VaultResult<KeyPairRecord> {
        if !self.verify_master_password(record, old_password) {
            return Err(VaultError::InvalidOldPassword);
        }

        let report = evaluate(new_password);
        if !report.is_strong {
            return Err(VaultError::WeakPassword(report.feedback));
        }

        let size = new_size.unwrap_or(record.algorithm);
        let pair = generate_keypair(size)?;
        let new_record = record_from_pair(&pair, new_password)?;
        info!(
            "rotated user keypair {} -> {}",
            record.fingerprint, new_record.fingerprint
        );
        Ok(new_record)
    }

    /// Persists a record to the chosen tier, fully replacing any previous
    /// record there. Sets or clears the auto-lock watermark.
    pub fn store(&self, record: &KeyPairRecord, options: StoreOptions) -> VaultResult<()> {
        let store = self.tier_store(options.tier);
        store.set(RECORD_KEY, &serde_json::to_string(record)?)?;

        match options.auto_lock_minutes {
            Some(minutes) => {
                let lock_at = Utc::now().timestamp_millis() + i64::from(minutes) * 60_000;
                store.set(LOCK_KEY, &lock_at.to_string())?;
            }
            None => store.delete(LOCK_KEY)?,
        }

        debug!("stored keypair record in {:?} tier", options.tier);
        Ok(())
    }

    /// Loads the record from a tier.
    ///
    /// Returns `None` if no record exists. If the lock watermark has
    /// elapsed, the record is purged as a side effect and `None` is
    /// returned — subsequent loads stay `None`.
    pub fn load(&self, tier: StorageTier) -> VaultResult<Option<KeyPairRecord>> {
        let store = self.tier_store(tier);

        if let Some(raw) = store.get(LOCK_KEY)? {
            // An unparseable watermark is treated as already elapsed
            let lock_at: i64 = raw.parse().unwrap_or(0);
            if Utc::now().timestamp_millis() >= lock_at {
                warn!("lock watermark elapsed in {tier:?} tier, purging record");
                store.delete(RECORD_KEY)?;
                store.delete(LOCK_KEY)?;
                return Ok(None);
            }
        }

        match store.get(RECORD_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Unconditionally purges records and watermarks from all tiers.
    pub fn clear(&self) -> VaultResult<()> {
        for tier in [StorageTier::Persistent, StorageTier::Session] {
            let store = self.tier_store(tier);
            store.delete(RECORD_KEY)?;
            store.delete(LOCK_KEY)?;
        }
        info!("cleared vault");
        Ok(())
    }

    /// Exports a record as versioned backup JSON. Backup is the only
    /// inter-device transfer path and always an explicit user action.
    pub fn export_backup(&self, record: &KeyPairRecord) -> VaultResult<String> {
        let backup = BackupFile {
            version: BACKUP_VERSION.to_string(),
            exported_at: Utc::now(),
            keys: record.clone(),
        };
        Ok(serde_json::to_string_pretty(&backup)?)
    }

    /// Parses backup JSON, rejecting unknown versions.
    pub fn import_backup(&self, json: &str) -> VaultResult<KeyPairRecord> {
        let backup: BackupFile = serde_json::from_str(json)?;
        if backup.version != BACKUP_VERSION {
            return Err(VaultError::UnsupportedBackupVersion(backup.version));
        }
        info!("imported keypair backup {}", backup.keys.fingerprint);
        Ok(backup.keys)
    }
}

fn record_from_pair(pair: &RsaKeyPair, master_password: &str) -> VaultResult<KeyPairRecord> {
    let private_key = encrypt_private_key(&pair.private, master_password, &KdfParams::default())?;
    Ok(KeyPairRecord {
        public_key_pem: export_public_key_pem(&pair.public)?,
        private_key,
        fingerprint: fingerprint(&pair.public)?,
        algorithm: pair.size,
        created_at: Utc::now(),
        expires_at: None,
    })
}
