//! AES-256-GCM envelope encryption with PBKDF2-SHA256 key derivation.
//!
//! Every call to [`EnvelopeCipher::encrypt`] draws a fresh IV and salt, so the
//! key itself is per-envelope. The tag is kept detached so it can be stored
//! in its own envelope field, and it is verified before any plaintext is
//! produced.

use aes_gcm::aead::AeadInPlace;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce, Tag};
use lockbox_core::SecretString;
use rand::RngCore;
use zeroize::Zeroize;

use crate::envelope::{EncryptedEnvelope, IV_LEN, TAG_LEN};
use crate::error::{Result, SecretError};
use crate::kdf::{self, DerivedKey, SALT_LEN};

/// Encrypts and decrypts single string values under one passphrase.
#[derive(Clone)]
pub struct EnvelopeCipher {
    passphrase: SecretString,
}

impl EnvelopeCipher {
    /// Create a cipher bound to `passphrase`.
    pub fn new(passphrase: impl Into<SecretString>) -> Result<Self> {
        let passphrase = passphrase.into();
        if passphrase.is_empty() {
            return Err(SecretError::KeyDerivation(
                "passphrase must not be empty".to_string(),
            ));
        }
        Ok(Self { passphrase })
    }

    /// Encrypt `plaintext` into a new envelope.
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedEnvelope> {
        let mut iv = [0u8; IV_LEN];
        let mut salt = [0u8; SALT_LEN];
        let mut rng = rand::thread_rng();
        rng.fill_bytes(&mut iv);
        rng.fill_bytes(&mut salt);

        let key = kdf::derive(self.passphrase.as_bytes(), &salt)?;
        let cipher = aead(&key)?;

        let mut buffer = plaintext.as_bytes().to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&iv), b"", &mut buffer)
            .map_err(|e| SecretError::EncryptionFailed(e.to_string()))?;

        let mut tag_bytes = [0u8; TAG_LEN];
        tag_bytes.copy_from_slice(&tag);

        Ok(EncryptedEnvelope::new(iv, salt, tag_bytes, buffer))
    }

    /// Parse and decrypt an envelope string.
    pub fn decrypt(&self, envelope: &str) -> Result<String> {
        let envelope = EncryptedEnvelope::parse(envelope)?;
        self.open(&envelope)
    }

    /// Decrypt an already parsed envelope.
    pub fn open(&self, envelope: &EncryptedEnvelope) -> Result<String> {
        let key = kdf::derive(self.passphrase.as_bytes(), envelope.salt())?;
        let cipher = aead(&key)?;

        let mut buffer = envelope.ciphertext().to_vec();
        cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(envelope.iv()),
                b"",
                &mut buffer,
                Tag::from_slice(envelope.tag()),
            )
            .map_err(|_| SecretError::Authentication)?;

        String::from_utf8(buffer).map_err(|e| {
            e.into_bytes().zeroize();
            SecretError::Format("decrypted value is not valid UTF-8".to_string())
        })
    }
}

impl std::fmt::Debug for EnvelopeCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeCipher").finish_non_exhaustive()
    }
}

fn aead(key: &DerivedKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SecretError::KeyDerivation(e.to_string()))
}

/// Encrypt `plaintext` under `passphrase` and return the envelope.
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<EncryptedEnvelope> {
    EnvelopeCipher::new(passphrase)?.encrypt(plaintext)
}

/// Decrypt an envelope string produced by [`encrypt`].
pub fn decrypt(envelope: &str, passphrase: &str) -> Result<String> {
    EnvelopeCipher::new(passphrase)?.decrypt(envelope)
}
