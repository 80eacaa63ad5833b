//! Credential record types.
//!
//! [`CredentialRecord`] is what a store persists: the password field only ever
//! holds an envelope string. [`Credential`] is the decrypted view handed back
//! to callers.

use chrono::{DateTime, Utc};
use lockbox_core::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SecretError};

/// A stored credential. `password` is an envelope, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: Uuid,

    /// Verified identifier of the owning user.
    pub owner_id: String,

    /// Site URL.
    pub website: String,

    /// Display name; primary sort key when listing.
    pub website_name: String,

    pub username: String,

    /// Envelope string (`iv:salt:tag:ciphertext`).
    pub password: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a credential.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub website: String,
    pub website_name: String,
    pub username: String,
    pub password: SecretString,
}

impl NewCredential {
    /// All fields are required.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("website", self.website.trim().is_empty()),
            ("website_name", self.website_name.trim().is_empty()),
            ("username", self.username.trim().is_empty()),
            ("password", self.password.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, empty)| empty.then_some(name))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SecretError::InvalidCredential(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CredentialChanges {
    pub website: Option<String>,
    pub website_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl CredentialChanges {
    pub fn is_empty(&self) -> bool {
        self.website.is_none()
            && self.website_name.is_none()
            && self.username.is_none()
            && self.password.is_none()
    }

    /// A field that is present must not be blank, the same rule
    /// [`NewCredential::validate`] applies on create.
    pub fn validate(&self) -> Result<()> {
        let blank =
            |field: &Option<String>| field.as_deref().is_some_and(|v| v.trim().is_empty());
        let blanked: Vec<&str> = [
            ("website", blank(&self.website)),
            ("website_name", blank(&self.website_name)),
            ("username", blank(&self.username)),
            ("password", self.password.as_ref().is_some_and(SecretString::is_empty)),
        ]
        .into_iter()
        .filter_map(|(name, empty)| empty.then_some(name))
        .collect();

        if blanked.is_empty() {
            Ok(())
        } else {
            Err(SecretError::InvalidCredential(format!(
                "fields must not be blank: {}",
                blanked.join(", ")
            )))
        }
    }
}

/// A credential with its password decrypted.
///
/// The password is a [`SecretString`], so `Debug` output stays redacted.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: Uuid,
    pub owner_id: String,
    pub website: String,
    pub website_name: String,
    pub username: String,
    pub password: SecretString,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    pub(crate) fn from_record(record: CredentialRecord, password: SecretString) -> Self {
        Self {
            id: record.id,
            owner_id: record.owner_id,
            website: record.website,
            website_name: record.website_name,
            username: record.username,
            password,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
