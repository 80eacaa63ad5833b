//! Credential storage backends.
//!
//! Defines the [`CredentialStore`] trait and provides [`MemoryCredentialStore`].
//! Stores only ever see envelope strings; encryption happens in
//! [`crate::vault::CredentialVault`] before a record reaches them.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, SecretError};
use crate::types::CredentialRecord;

/// Async trait for credential persistence, scoped by owner.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new record.
    async fn create(&self, record: CredentialRecord) -> Result<CredentialRecord>;

    /// Fetch one record belonging to `owner_id`.
    async fn find(&self, owner_id: &str, id: Uuid) -> Result<CredentialRecord>;

    /// All records of `owner_id`, by website name ascending then most
    /// recently updated first.
    async fn list(&self, owner_id: &str) -> Result<Vec<CredentialRecord>>;

    /// Replace an existing record of `owner_id`.
    async fn update(&self, owner_id: &str, record: CredentialRecord) -> Result<CredentialRecord>;

    /// Remove a record of `owner_id`.
    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<()>;
}

/// In-process store keyed by record id.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    records: RwLock<HashMap<Uuid, CredentialRecord>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: Uuid) -> SecretError {
    SecretError::NotFound(id.to_string())
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, record: CredentialRecord) -> Result<CredentialRecord> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(SecretError::Storage(format!(
                "record {} already exists",
                record.id
            )));
        }
        debug!(id = %record.id, owner = %record.owner_id, "storing credential");
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find(&self, owner_id: &str, id: Uuid) -> Result<CredentialRecord> {
        let records = self.records.read().await;
        records
            .get(&id)
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<CredentialRecord>> {
        let records = self.records.read().await;
        let mut owned: Vec<CredentialRecord> = records
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            a.website_name
                .cmp(&b.website_name)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        Ok(owned)
    }

    async fn update(&self, owner_id: &str, record: CredentialRecord) -> Result<CredentialRecord> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.id) {
            Some(existing) if existing.owner_id == owner_id && record.owner_id == owner_id => {
                *existing = record.clone();
                debug!(id = %record.id, "updated credential");
                Ok(record)
            }
            _ => Err(not_found(record.id)),
        }
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<()> {
        let mut records = self.records.write().await;
        match records.get(&id) {
            Some(existing) if existing.owner_id == owner_id => {
                records.remove(&id);
                debug!(%id, "deleted credential");
                Ok(())
            }
            _ => Err(not_found(id)),
        }
    }
}
