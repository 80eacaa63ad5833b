//! End-to-end envelope scenarios across the secrets crate.

use std::sync::Arc;

use lockbox_secrets::{
    decrypt, encrypt, CredentialStore, CredentialVault, EncryptedEnvelope, EnvelopeCipher,
    MemoryCredentialStore, NewCredential, SecretError,
};

#[test]
fn test_encrypt_decrypt_scenario() {
    let envelope = encrypt("p@ssw0rd!", "secret123").unwrap().to_string();

    let fields: Vec<&str> = envelope.split(':').collect();
    assert_eq!(fields.len(), 4);
    assert_eq!(
        fields.iter().map(|f| f.len()).collect::<Vec<_>>(),
        vec![24, 32, 32, 18]
    );
    assert!(fields
        .iter()
        .all(|f| f.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))));

    assert_eq!(decrypt(&envelope, "secret123").unwrap(), "p@ssw0rd!");
    assert!(matches!(
        decrypt(&envelope, "wrongpass"),
        Err(SecretError::Authentication)
    ));
}

#[test]
fn test_envelope_survives_reparse() {
    let cipher = EnvelopeCipher::new("secret123").unwrap();
    let sealed = cipher.encrypt("hunter2").unwrap();

    let parsed: EncryptedEnvelope = sealed.to_string().parse().unwrap();
    assert_eq!(parsed, sealed);
    assert_eq!(cipher.open(&parsed).unwrap(), "hunter2");
}

#[test]
fn test_truncated_envelope_is_format_error() {
    let envelope = encrypt("p@ssw0rd!", "secret123").unwrap().to_string();
    let truncated = &envelope[..envelope.rfind(':').unwrap()];
    assert!(matches!(
        decrypt(truncated, "secret123"),
        Err(SecretError::Format(_))
    ));
}

#[tokio::test]
async fn test_vault_stores_only_envelopes() {
    let store = Arc::new(MemoryCredentialStore::new());
    let vault = CredentialVault::new(store.clone(), EnvelopeCipher::new("secret123").unwrap());

    let created = vault
        .create(
            "owner-1",
            NewCredential {
                website: "https://github.com".to_string(),
                website_name: "GitHub".to_string(),
                username: "octocat".to_string(),
                password: "p@ssw0rd!".into(),
            },
        )
        .await
        .unwrap();

    let record = store.find("owner-1", created.id).await.unwrap();
    assert_ne!(record.password, "p@ssw0rd!");
    assert_eq!(decrypt(&record.password, "secret123").unwrap(), "p@ssw0rd!");

    let other_key = CredentialVault::new(store, EnvelopeCipher::new("wrongpass").unwrap());
    assert!(matches!(
        other_key.get("owner-1", created.id).await,
        Err(SecretError::Authentication)
    ));
}
