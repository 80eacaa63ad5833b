//! Encrypt-on-write, decrypt-on-read credential service.
//!
//! Key derivation costs 100 000 PBKDF2 rounds per envelope, so every
//! encrypt and decrypt runs on the blocking pool rather than on a runtime
//! worker thread.

use std::sync::Arc;

use chrono::Utc;
use lockbox_core::SecretString;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cipher::EnvelopeCipher;
use crate::error::{Result, SecretError};
use crate::store::CredentialStore;
use crate::types::{Credential, CredentialChanges, CredentialRecord, NewCredential};

/// Pairs a [`CredentialStore`] with an [`EnvelopeCipher`].
///
/// The store only ever receives envelope strings; callers only ever receive
/// decrypted [`Credential`]s.
pub struct CredentialVault {
    store: Arc<dyn CredentialStore>,
    cipher: EnvelopeCipher,
}

impl CredentialVault {
    pub fn new(store: Arc<dyn CredentialStore>, cipher: EnvelopeCipher) -> Self {
        Self { store, cipher }
    }

    /// Encrypt and store a new credential for `owner_id`.
    pub async fn create(&self, owner_id: &str, input: NewCredential) -> Result<Credential> {
        input.validate()?;

        let envelope = self.seal(input.password.clone()).await?;
        let now = Utc::now();
        let record = CredentialRecord {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            website: input.website,
            website_name: input.website_name,
            username: input.username,
            password: envelope,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.create(record).await?;
        debug!(id = %stored.id, owner = owner_id, "created credential");
        Ok(Credential::from_record(stored, input.password))
    }

    /// Fetch and decrypt one credential.
    pub async fn get(&self, owner_id: &str, id: Uuid) -> Result<Credential> {
        let record = self.store.find(owner_id, id).await?;
        self.reveal(record).await
    }

    /// Fetch and decrypt every credential of `owner_id`.
    ///
    /// Fails as a whole if any record cannot be decrypted.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<Credential>> {
        let records = self.store.list(owner_id).await?;
        self.with_cipher(move |cipher| {
            records
                .into_iter()
                .map(|record| open(cipher, record))
                .collect()
        })
        .await
    }

    /// Apply `changes`; a new password is encrypted under a fresh envelope.
    ///
    /// Present fields must not be blank.
    pub async fn update(
        &self,
        owner_id: &str,
        id: Uuid,
        changes: CredentialChanges,
    ) -> Result<Credential> {
        changes.validate()?;
        let mut record = self.store.find(owner_id, id).await?;

        if let Some(website) = changes.website {
            record.website = website;
        }
        if let Some(website_name) = changes.website_name {
            record.website_name = website_name;
        }
        if let Some(username) = changes.username {
            record.username = username;
        }
        if let Some(password) = changes.password {
            record.password = self.seal(password).await?;
        }
        record.updated_at = Utc::now();

        let stored = self.store.update(owner_id, record).await?;
        self.reveal(stored).await
    }

    /// Delete a credential and, with it, its envelope.
    pub async fn delete(&self, owner_id: &str, id: Uuid) -> Result<()> {
        self.store.delete(owner_id, id).await
    }

    async fn seal(&self, plaintext: SecretString) -> Result<String> {
        self.with_cipher(move |cipher| {
            cipher
                .encrypt(plaintext.expose_secret())
                .map(|envelope| envelope.to_string())
        })
        .await
    }

    async fn reveal(&self, record: CredentialRecord) -> Result<Credential> {
        self.with_cipher(move |cipher| open(cipher, record)).await
    }

    /// Run `f` against a clone of the cipher on the blocking pool.
    async fn with_cipher<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&EnvelopeCipher) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let cipher = self.cipher.clone();
        tokio::task::spawn_blocking(move || f(&cipher))
            .await
            .map_err(|e| SecretError::Storage(format!("cipher task failed: {e}")))?
    }
}

fn open(cipher: &EnvelopeCipher, record: CredentialRecord) -> Result<Credential> {
    match cipher.decrypt(&record.password) {
        Ok(password) => Ok(Credential::from_record(record, SecretString::new(password))),
        Err(e) => {
            warn!(id = %record.id, error = %e, "credential envelope is unreadable");
            Err(e)
        }
    }
}
