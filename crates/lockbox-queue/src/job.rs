//! Queue job payloads.

use serde::{Deserialize, Serialize};

use crate::error::{QueueError, Result};

/// A background job. Serialized as a JSON object tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueueJob {
    /// Send an email-address verification link.
    VerifyEmail { email: String, token: String },

    /// Tell an owner that a credential was stored.
    SecretCreated {
        owner_id: String,
        email: String,
        website_name: String,
    },
}

impl QueueJob {
    /// Stable name of the job kind, as written in the `kind` field.
    pub fn kind(&self) -> &'static str {
        match self {
            QueueJob::VerifyEmail { .. } => "verify_email",
            QueueJob::SecretCreated { .. } => "secret_created",
        }
    }

    /// Address the resulting notification goes to.
    pub fn recipient(&self) -> &str {
        match self {
            QueueJob::VerifyEmail { email, .. } | QueueJob::SecretCreated { email, .. } => email,
        }
    }

    pub(crate) fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(QueueError::Encode)
    }

    pub(crate) fn decode(key: &str, payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|source| QueueError::Decode {
            key: key.to_string(),
            source,
        })
    }
}
