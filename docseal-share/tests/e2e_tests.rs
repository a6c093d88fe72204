//! End-to-end scenario: vault-managed keys, multi-recipient hybrid
//! encryption over a remote store, backup round trip, and recovery.

use docseal_crypto::{import_private_key_pem, import_public_key_pem, KeySize};
use docseal_share::{decrypt_payload, encrypt_for_recipients, MemoryRemoteStore, ShareClient};
use docseal_vault::{KeyVault, StorageTier, StoreOptions};

const MASTER_PASSWORD: &str = "CorrectHorseBattery9!";

#[test]
fn full_backup_and_recovery_scenario() {
    // Two recipients, each with their own vault-managed keypair
    let vault_a = KeyVault::in_memory();
    let vault_b = KeyVault::in_memory();
    let record_a = vault_a
        .generate_user_keys(MASTER_PASSWORD, KeySize::Rsa2048)
        .unwrap();
    let record_b = vault_b
        .generate_user_keys("AnotherStrong8#Pass", KeySize::Rsa2048)
        .unwrap();
    vault_a.store(&record_a, StoreOptions::default()).unwrap();

    // Encrypt a 10 KB file for both recipients' public keys
    let file: Vec<u8> = (0..10 * 1024).map(|i| (i * 7 % 256) as u8).collect();
    let recipients = vec![
        (
            record_a.fingerprint.clone(),
            import_public_key_pem(&record_a.public_key_pem).unwrap(),
        ),
        (
            record_b.fingerprint.clone(),
            import_public_key_pem(&record_b.public_key_pem).unwrap(),
        ),
    ];
    let payload = encrypt_for_recipients(&file, &recipients, |_| {}).unwrap();

    // Export recipient A's vault, clear it, and restore from the backup
    let backup = vault_a.export_backup(&record_a).unwrap();
    vault_a.clear().unwrap();
    assert!(vault_a.load(StorageTier::Persistent).unwrap().is_none());

    let restored = vault_a.import_backup(&backup).unwrap();
    vault_a.store(&restored, StoreOptions::default()).unwrap();
    let reloaded = vault_a.load(StorageTier::Persistent).unwrap().unwrap();
    assert_eq!(reloaded.fingerprint, record_a.fingerprint);

    // Unlock the restored private key with the original password
    let pem_a = vault_a
        .decrypt_user_private_key(&reloaded, MASTER_PASSWORD)
        .unwrap();
    let private_a = import_private_key_pem(&pem_a).unwrap();

    // Both recipients can decrypt; bytes match the original input
    let out_a = decrypt_payload(&payload, &reloaded.fingerprint, &private_a).unwrap();
    assert_eq!(out_a, file);

    let pem_b = vault_b
        .decrypt_user_private_key(&record_b, "AnotherStrong8#Pass")
        .unwrap();
    let private_b = import_private_key_pem(&pem_b).unwrap();
    let out_b = decrypt_payload(&payload, &record_b.fingerprint, &private_b).unwrap();
    assert_eq!(out_b, file);
}

#[tokio::test]
async fn full_scenario_through_the_remote_store() {
    let vault = KeyVault::in_memory();
    let record = vault
        .generate_user_keys(MASTER_PASSWORD, KeySize::Rsa2048)
        .unwrap();

    let client = ShareClient::new(MemoryRemoteStore::new());
    let file: Vec<u8> = (0..10 * 1024).map(|i| (i % 253) as u8).collect();

    let receipt = client
        .upload_encrypted(
            file.clone(),
            vec![(
                record.fingerprint.clone(),
                import_public_key_pem(&record.public_key_pem).unwrap(),
            )],
            |_| {},
        )
        .await
        .unwrap();

    let pem = vault
        .decrypt_user_private_key(&record, MASTER_PASSWORD)
        .unwrap();
    let private = import_private_key_pem(&pem).unwrap();
    let wrapped = receipt.wrapped_keys.get(&record.fingerprint).unwrap().clone();

    let decrypted = client
        .download_decrypt(&receipt.path, receipt.nonce, wrapped, private)
        .await
        .unwrap();

    assert_eq!(decrypted, file);
}
