//! Envelope encryption commands.
//!
//! `lockbox encrypt` prints the `iv:salt:tag:ciphertext` envelope for a value;
//! `lockbox decrypt` reverses it. Both read the passphrase from `--passphrase`,
//! `LOCKBOX_PASSPHRASE`, or a hidden prompt, in that order.

use clap::Args;
use lockbox_core::env::vars;
use lockbox_core::SecretString;
use lockbox_secrets::EnvelopeCipher;

/// Passphrase source shared by the crypto commands.
#[derive(Args)]
pub struct PassphraseArgs {
    /// Passphrase the key is derived from (prompts when omitted)
    #[arg(long, env = vars::LOCKBOX_PASSPHRASE, hide_env_values = true)]
    pub passphrase: Option<String>,
}

/// Encrypt command arguments.
#[derive(Args)]
pub struct EncryptArgs {
    /// Value to encrypt (if omitted, prompts for hidden input)
    #[arg(long)]
    pub value: Option<String>,

    #[command(flatten)]
    pub key: PassphraseArgs,
}

/// Decrypt command arguments.
#[derive(Args)]
pub struct DecryptArgs {
    /// Envelope in `iv:salt:tag:ciphertext` form
    pub envelope: String,

    #[command(flatten)]
    pub key: PassphraseArgs,
}

/// Run the encrypt command.
pub fn encrypt(args: EncryptArgs) -> anyhow::Result<()> {
    let cipher = cipher(args.key)?;
    let value = match args.value {
        Some(v) => SecretString::new(v),
        None => prompt("Value to encrypt: ")?,
    };

    let envelope = cipher.encrypt(value.expose_secret())?;
    println!("{envelope}");
    Ok(())
}

/// Run the decrypt command.
pub fn decrypt(args: DecryptArgs) -> anyhow::Result<()> {
    let cipher = cipher(args.key)?;
    let plaintext = SecretString::new(cipher.decrypt(args.envelope.trim())?);
    println!("{}", plaintext.expose_secret());
    Ok(())
}

fn cipher(args: PassphraseArgs) -> anyhow::Result<EnvelopeCipher> {
    let passphrase = match args.passphrase {
        Some(p) => SecretString::new(p),
        None => prompt("Passphrase: ")?,
    };
    if passphrase.is_empty() {
        anyhow::bail!("Passphrase must not be empty");
    }
    Ok(EnvelopeCipher::new(passphrase)?)
}

fn prompt(label: &str) -> anyhow::Result<SecretString> {
    let value = rpassword::prompt_password(label)
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))?;
    Ok(SecretString::new(value))
}
