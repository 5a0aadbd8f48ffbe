use std::io::{Read, Write};

use age::secrecy::{ExposeSecret, Secret};
use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::{KeyVaultError, Result};
use crate::vault::VaultKey;

/// Seal `plaintext` for whoever holds `key`: scrypt for a passphrase, an
/// X25519 recipient for a keyfile.
pub fn encrypt(plaintext: &[u8], key: &VaultKey) -> Result<Vec<u8>> {
    let encryptor = match key {
        VaultKey::Passphrase(pass) => {
            age::Encryptor::with_user_passphrase(Secret::new(pass.expose_secret().clone()))
        }
        VaultKey::Keyfile { pubkey, .. } => {
            let recipient: age::x25519::Recipient = pubkey
                .parse()
                .map_err(|e: &str| KeyVaultError::Encryption(e.to_string()))?;
            age::Encryptor::with_recipients(vec![Box::new(recipient)])
                .ok_or_else(|| KeyVaultError::Encryption("No recipients for vault".into()))?
        }
    };

    seal(encryptor, plaintext).map_err(|e| KeyVaultError::Encryption(e.to_string()))
}

/// Open ciphertext produced by [`encrypt`]. The vault's encryption mode must
/// match the kind of key offered.
pub fn decrypt(ciphertext: &[u8], key: &VaultKey) -> Result<Vec<u8>> {
    let decryptor =
        age::Decryptor::new(ciphertext).map_err(|e| KeyVaultError::Decryption(e.to_string()))?;

    let reader = match (decryptor, key) {
        (age::Decryptor::Passphrase(d), VaultKey::Passphrase(pass)) => {
            d.decrypt(&Secret::new(pass.expose_secret().clone()), None)
        }
        (age::Decryptor::Recipients(d), VaultKey::Keyfile { identity, .. }) => {
            let identity: age::x25519::Identity = identity
                .parse()
                .map_err(|e: &str| KeyVaultError::InvalidKeyfile(e.to_string()))?;
            d.decrypt(std::iter::once(&identity as &dyn age::Identity))
        }
        (age::Decryptor::Passphrase(_), _) => {
            return Err(KeyVaultError::Decryption(
                "Vault is passphrase-encrypted; a keyfile cannot open it".into(),
            ))
        }
        _ => {
            return Err(KeyVaultError::Decryption(
                "Vault is keyfile-encrypted; a passphrase cannot open it".into(),
            ))
        }
    }
    .map_err(|e| KeyVaultError::Decryption(e.to_string()))?;

    drain(reader).map_err(|e| KeyVaultError::Decryption(e.to_string()))
}

fn seal(encryptor: age::Encryptor, plaintext: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut sealed = vec![];
    let mut writer = encryptor
        .wrap_output(&mut sealed)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    writer.write_all(plaintext)?;
    writer.finish()?;
    Ok(sealed)
}

fn drain(mut reader: impl Read) -> std::io::Result<Vec<u8>> {
    let mut opened = vec![];
    reader.read_to_end(&mut opened)?;
    Ok(opened)
}

/// Derive a sub-key using HKDF-SHA256.
pub fn derive_key(master: &[u8], info: &[u8], output_len: usize) -> Result<Vec<u8>> {
    let hk = Hkdf::<Sha256>::new(None, master);
    let mut okm = vec![0u8; output_len];
    hk.expand(info, &mut okm)
        .map_err(|_| KeyVaultError::Other(format!("HKDF output length {output_len} too large")))?;
    Ok(okm)
}

/// Generate a new age keypair. Returns (secret_key_string, public_key_string).
pub fn generate_keypair() -> (String, String) {
    let identity = age::x25519::Identity::generate();
    let public_key = identity.to_public().to_string();
    (identity.to_string().expose_secret().clone(), public_key)
}
