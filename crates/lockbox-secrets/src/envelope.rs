//! The `iv:salt:tag:ciphertext` envelope wire format.

use std::fmt;
use std::str::FromStr;

use crate::error::SecretError;
use crate::kdf::SALT_LEN;

/// AES-GCM nonce length in bytes.
pub const IV_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

const SEPARATOR: char = ':';

/// One encrypted value: IV, salt, authentication tag, and ciphertext.
///
/// Serialized as four lowercase-hex fields joined by `:`. Immutable once
/// produced; a new envelope is created on every encryption.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedEnvelope {
    iv: [u8; IV_LEN],
    salt: [u8; SALT_LEN],
    tag: [u8; TAG_LEN],
    ciphertext: Vec<u8>,
}

impl EncryptedEnvelope {
    pub(crate) fn new(
        iv: [u8; IV_LEN],
        salt: [u8; SALT_LEN],
        tag: [u8; TAG_LEN],
        ciphertext: Vec<u8>,
    ) -> Self {
        Self {
            iv,
            salt,
            tag,
            ciphertext,
        }
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn tag(&self) -> &[u8; TAG_LEN] {
        &self.tag
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Parse an envelope string, validating field count and lengths.
    pub fn parse(s: &str) -> Result<Self, SecretError> {
        let fields: Vec<&str> = s.split(SEPARATOR).collect();
        let [iv, salt, tag, ciphertext] = fields.as_slice() else {
            return Err(SecretError::Format(format!(
                "expected 4 ':'-separated fields, found {}",
                fields.len()
            )));
        };

        Ok(Self {
            iv: decode_fixed("iv", iv)?,
            salt: decode_fixed("salt", salt)?,
            tag: decode_fixed("tag", tag)?,
            ciphertext: decode_field("ciphertext", ciphertext)?,
        })
    }
}

fn decode_field(name: &str, field: &str) -> Result<Vec<u8>, SecretError> {
    hex::decode(field).map_err(|e| SecretError::Format(format!("{name} is not valid hex: {e}")))
}

fn decode_fixed<const N: usize>(name: &str, field: &str) -> Result<[u8; N], SecretError> {
    let bytes = decode_field(name, field)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
        SecretError::Format(format!(
            "{name} must be {N} bytes, got {}",
            bytes.len()
        ))
    })
}

impl FromStr for EncryptedEnvelope {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EncryptedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            hex::encode(self.iv),
            hex::encode(self.salt),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext)
        )
    }
}

// Ciphertext length is the only thing worth showing.
impl fmt::Debug for EncryptedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedEnvelope")
            .field("iv", &hex::encode(self.iv))
            .field("ciphertext_len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}
