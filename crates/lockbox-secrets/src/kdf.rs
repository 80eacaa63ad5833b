//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! The round count is fixed: envelopes do not record it, so changing it would
//! make every stored envelope undecryptable.

use std::num::NonZeroU32;

use ring::pbkdf2;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, SecretError};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const PBKDF2_ROUNDS: u32 = 100_000;

const ROUNDS: NonZeroU32 = match NonZeroU32::new(PBKDF2_ROUNDS) {
    Some(n) => n,
    None => panic!("PBKDF2_ROUNDS must be non-zero"),
};

/// A 256-bit symmetric key, wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive a key from `passphrase` and a 16-byte `salt`.
///
/// Deterministic for a given input pair, which is what lets the salt stored in
/// an envelope re-derive the key at decrypt time.
pub fn derive(passphrase: &[u8], salt: &[u8]) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(SecretError::KeyDerivation(
            "passphrase must not be empty".to_string(),
        ));
    }
    if salt.len() != SALT_LEN {
        return Err(SecretError::KeyDerivation(format!(
            "salt must be {SALT_LEN} bytes, got {}",
            salt.len()
        )));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2::derive(pbkdf2::PBKDF2_HMAC_SHA256, ROUNDS, salt, passphrase, &mut key);
    let derived = DerivedKey(key);
    key.zeroize();
    Ok(derived)
}
