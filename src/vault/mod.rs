pub mod crypto;
pub mod secret;

use std::env;
use std::fs;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{KeyVaultError, Result};
use crate::types::*;
use crate::vault::secret::SecretEntry;

/// Name of the secret a client resolves when none is configured.
pub const DEFAULT_SECRET_NAME: &str = "default";

/// Value the development vault seeds its default secret with.
pub const DEV_SECRET_VALUE: &str = "password";

const KEYVAULT_DIR_ENV: &str = "KEYVAULT_DIR";

/// The in-memory representation of the entire vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vault {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub secrets: BTreeMap<String, SecretEntry>,
}

impl Vault {
    /// Create a new empty vault.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            version: 1,
            created_at: now,
            modified_at: now,
            secrets: BTreeMap::new(),
        }
    }

    /// A vault holding only the well-known development credential.
    pub fn development() -> Self {
        let mut vault = Self::new();
        vault.secrets.insert(
            DEFAULT_SECRET_NAME.to_string(),
            SecretEntry::new(DEV_SECRET_VALUE.to_string()),
        );
        vault
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

/// Key material that opens the on-disk vault.
#[derive(Debug)]
pub enum VaultKey {
    Passphrase(SecretString),
    Keyfile { identity: String, pubkey: String },
}

impl VaultKey {
    pub fn passphrase(passphrase: impl Into<String>) -> Self {
        VaultKey::Passphrase(SecretString::new(passphrase.into()))
    }

    /// Raw bytes used as HKDF input for sub-keys such as the audit key.
    pub fn material(&self) -> Vec<u8> {
        match self {
            VaultKey::Passphrase(p) => p.expose_secret().as_bytes().to_vec(),
            VaultKey::Keyfile { identity, .. } => identity.as_bytes().to_vec(),
        }
    }
}

/// Vault directory: `$KEYVAULT_DIR`, or `~/.keyvault`.
pub fn vault_dir() -> PathBuf {
    if let Ok(dir) = env::var(KEYVAULT_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".keyvault")
}

/// Get the vault file path.
pub fn vault_path() -> PathBuf {
    vault_dir().join("vault.age")
}

/// Get the config file path.
pub fn config_path() -> PathBuf {
    vault_dir().join("keyvault.toml")
}

/// Get the audit log path.
pub fn audit_path() -> PathBuf {
    vault_dir().join("audit.log")
}

/// Check if the vault is initialized.
pub fn is_initialized() -> bool {
    vault_path().exists()
}

/// Reject names that would be ambiguous on the command line or in logs.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(KeyVaultError::InvalidSecretName(name.to_string()));
    }
    Ok(())
}

/// Load and decrypt the vault from disk.
pub fn load_vault(key: &VaultKey) -> Result<Vault> {
    let path = vault_path();
    if !path.exists() {
        return Err(KeyVaultError::VaultNotInitialized);
    }

    let ciphertext = fs::read(&path)?;
    let plaintext = crypto::decrypt(&ciphertext, key)?;

    let vault: Vault = rmp_serde::from_slice(&plaintext)
        .map_err(|e| KeyVaultError::Serialization(e.to_string()))?;

    tracing::debug!(path = %path.display(), secrets = vault.secrets.len(), "vault loaded");
    Ok(vault)
}

/// Encrypt and save the vault to disk with atomic rename.
pub fn save_vault(vault: &Vault, key: &VaultKey) -> Result<()> {
    let path = vault_path();
    fs::create_dir_all(vault_dir())?;

    let plaintext =
        rmp_serde::to_vec(vault).map_err(|e| KeyVaultError::Serialization(e.to_string()))?;

    let ciphertext = crypto::encrypt(&plaintext, key)?;

    // Atomic write: write to temp file, then rename
    let tmp_path = path.with_extension("age.tmp");
    fs::write(&tmp_path, &ciphertext)?;
    fs::rename(&tmp_path, &path)?;

    tracing::debug!(path = %path.display(), "vault saved");
    Ok(())
}
