//! Error types for envelope encryption and credential storage.

use thiserror::Error;

/// Errors that can occur during secret operations.
///
/// None of the variants carry plaintext.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The envelope string is structurally invalid.
    #[error("Malformed envelope: {0}")]
    Format(String),

    /// Tag verification failed: the envelope was tampered with or the
    /// passphrase is wrong.
    #[error("Envelope authentication failed")]
    Authentication,

    /// The passphrase or salt violates the derivation preconditions.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Credential not found: {0}")]
    NotFound(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl SecretError {
    /// Whether the stored value itself is unusable (corrupt or unreadable with
    /// this passphrase). Such records are never retried.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, SecretError::Format(_) | SecretError::Authentication)
    }
}

/// Convenience result alias for secret operations.
pub type Result<T> = std::result::Result<T, SecretError>;
