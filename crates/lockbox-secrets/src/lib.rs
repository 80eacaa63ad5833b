//! Envelope encryption for Lockbox credential records.
//!
//! Each secret is encrypted with AES-256-GCM under a key derived from a
//! passphrase and a per-envelope random salt (PBKDF2-HMAC-SHA256), and stored
//! as an `iv:salt:tag:ciphertext` hex string.

pub mod cipher;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod store;
pub mod types;
pub mod vault;

pub use cipher::{decrypt, encrypt, EnvelopeCipher};
pub use envelope::EncryptedEnvelope;
pub use error::{Result, SecretError};
pub use store::{CredentialStore, MemoryCredentialStore};
pub use types::{Credential, CredentialChanges, CredentialRecord, NewCredential};
pub use vault::CredentialVault;
