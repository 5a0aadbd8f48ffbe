//! High-level programmatic API for the key vault.
//!
//! [`KeyVaultClient`] is a facade over one of two backends:
//!
//! * the **development vault**, an in-memory vault seeded with the default
//!   secret set to `"password"`; this is what [`KeyVaultClient::new`] gives you
//! * the **encrypted file vault** under the vault directory, opened with a
//!   passphrase or an age keyfile, where every call does
//!   load → operate → save → audit

use std::fmt;
use std::sync::RwLock;

use crate::audit;
use crate::auth::{self, context::AuthMethod};
use crate::config::Config;
use crate::error::{KeyVaultError, Result};
use crate::vault::secret::{SecretEntry, SecretMetadata};
use crate::vault::{self, Vault, VaultKey, DEFAULT_SECRET_NAME};

enum Backend {
    Memory(RwLock<Vault>),
    File {
        key: VaultKey,
        /// HMAC key derived from the master material, used for audit chain.
        audit_key: Vec<u8>,
        audit_enabled: bool,
    },
}

/// Client for reading and managing vault secrets.
pub struct KeyVaultClient {
    backend: Backend,
    /// Secret returned by [`KeyVaultClient::get_secret_value`].
    secret_name: String,
    /// Human-readable actor label for audit entries.
    actor: String,
    /// Keyfile the client was opened with, recorded in the config by `init_vault`.
    keyfile_path: Option<String>,
}

impl KeyVaultClient {
    /// Client over a fresh development vault.
    ///
    /// ```
    /// let client = keyvault::KeyVaultClient::new();
    /// assert_eq!(client.get_secret_value().unwrap(), "password");
    /// ```
    pub fn new() -> Self {
        Self {
            backend: Backend::Memory(RwLock::new(Vault::development())),
            secret_name: DEFAULT_SECRET_NAME.to_string(),
            actor: "api(dev)".to_string(),
            keyfile_path: None,
        }
    }

    /// Authenticate against the file vault with a passphrase.
    pub fn with_passphrase(passphrase: &str) -> Result<Self> {
        Self::file(VaultKey::passphrase(passphrase), "api(passphrase)")
    }

    /// Authenticate against the file vault with an age keyfile on disk.
    pub fn with_keyfile(keyfile_path: &str) -> Result<Self> {
        let (identity, pubkey) = auth::read_keyfile(keyfile_path)?;
        let mut client = Self::file(VaultKey::Keyfile { identity, pubkey }, "api(keyfile)")?;
        client.keyfile_path = Some(keyfile_path.to_string());
        Ok(client)
    }

    /// Authenticate from environment variables (`KEYVAULT_KEYFILE` or `KEYVAULT_PASSPHRASE`).
    ///
    /// This does **not** fall through to interactive prompts.
    pub fn from_env() -> Result<Self> {
        match auth::resolve_env_auth() {
            Some(resolved) => {
                let (key, ctx) = resolved?;
                let actor = match ctx.method {
                    AuthMethod::Passphrase => "api(passphrase)",
                    AuthMethod::Keyfile => "api(keyfile)",
                };
                Self::file(key, actor)
            }
            None => Err(KeyVaultError::AuthFailed(
                "No credentials found. Set KEYVAULT_KEYFILE or KEYVAULT_PASSPHRASE.".into(),
            )),
        }
    }

    /// Client over the file vault with an already-resolved key.
    pub fn from_key(key: VaultKey, actor: impl Into<String>) -> Result<Self> {
        Self::file(key, &actor.into())
    }

    fn file(key: VaultKey, actor: &str) -> Result<Self> {
        let config = Config::load(&vault::config_path())?;
        let audit_key = audit::derive_audit_key(&key)?;
        Ok(Self {
            backend: Backend::File {
                key,
                audit_key,
                audit_enabled: config.audit.enabled,
            },
            secret_name: config.vault.default_secret,
            actor: actor.to_string(),
            keyfile_path: None,
        })
    }

    /// Override the secret that [`get_secret_value`](Self::get_secret_value) resolves.
    pub fn with_secret_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        vault::validate_secret_name(&name)?;
        self.secret_name = name;
        Ok(self)
    }

    /// Override the actor label used in audit entries.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Name of the secret [`get_secret_value`](Self::get_secret_value) resolves.
    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    /// Whether this client is backed by the in-memory development vault.
    pub fn is_development(&self) -> bool {
        matches!(self.backend, Backend::Memory(_))
    }

    /// Check whether the file vault has been initialized.
    pub fn is_initialized() -> bool {
        vault::is_initialized()
    }

    /// Value of the client's default secret.
    pub fn get_secret_value(&self) -> Result<String> {
        self.get_or_err(&self.secret_name)
    }

    /// Retrieve a secret by name. Returns `None` if not found.
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self.entry(name)?.map(|(value, _)| value))
    }

    /// Value and metadata of a secret from a single vault read.
    pub fn entry(&self, name: &str) -> Result<Option<(String, SecretMetadata)>> {
        let result = self.read(|v| {
            Ok(v.secrets
                .get(name)
                .map(|e| (e.value.clone(), e.metadata.clone())))
        })?;
        let outcome = if result.is_some() { "success" } else { "not_found" };

        self.audit("get", Some(name), outcome, None);
        Ok(result)
    }

    /// Retrieve a secret by name, returning an error if it does not exist.
    pub fn get_or_err(&self, name: &str) -> Result<String> {
        self.get(name)?
            .ok_or_else(|| KeyVaultError::SecretNotFound(name.to_string()))
    }

    /// Store a secret. If `force` is false and the secret already exists,
    /// returns [`KeyVaultError::SecretAlreadyExists`]. Returns `true` when an
    /// existing secret was overwritten.
    pub fn store(&self, name: &str, value: &str, force: bool) -> Result<bool> {
        vault::validate_secret_name(name)?;

        let stored = self.write(|v| {
            let exists = v.secrets.contains_key(name);
            if exists && !force {
                return Ok((Err(KeyVaultError::SecretAlreadyExists(name.to_string())), false));
            }
            v.secrets
                .insert(name.to_string(), SecretEntry::new(value.to_string()));
            Ok((Ok(exists), true))
        })?;

        match stored {
            Ok(is_update) => {
                let op = if is_update { "update" } else { "store" };
                self.audit(op, Some(name), "success", None);
                Ok(is_update)
            }
            Err(e) => {
                self.audit("store", Some(name), "denied", Some("already exists"));
                Err(e)
            }
        }
    }

    /// Remove a secret. Returns `true` if the secret existed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let existed = self.write(|v| {
            let existed = v.secrets.remove(name).is_some();
            Ok((existed, existed))
        })?;

        let outcome = if existed { "success" } else { "not_found" };
        self.audit("remove", Some(name), outcome, None);
        Ok(existed)
    }

    /// Rotate a secret to a new value. Returns the new version number.
    /// The secret must already exist.
    pub fn rotate(&self, name: &str, new_value: &str) -> Result<u32> {
        let version = self.write(|v| match v.secrets.get_mut(name) {
            Some(entry) => Ok((Some(entry.rotate(new_value.to_string())), true)),
            None => Ok((None, false)),
        })?;

        match version {
            Some(version) => {
                self.audit(
                    "rotate",
                    Some(name),
                    "success",
                    Some(&format!("version={version}")),
                );
                Ok(version)
            }
            None => {
                self.audit("rotate", Some(name), "not_found", None);
                Err(KeyVaultError::SecretNotFound(name.to_string()))
            }
        }
    }

    /// Metadata of a secret, without its value.
    pub fn metadata(&self, name: &str) -> Result<Option<SecretMetadata>> {
        self.read(|v| Ok(v.secrets.get(name).map(|e| e.metadata.clone())))
    }

    /// Secret names with their metadata, sorted by name.
    pub fn list_entries(&self) -> Result<Vec<(String, SecretMetadata)>> {
        let entries: Vec<(String, SecretMetadata)> = self.read(|v| {
            Ok(v.secrets
                .iter()
                .map(|(name, e)| (name.clone(), e.metadata.clone()))
                .collect())
        })?;
        self.audit("list", None, "success", None);
        Ok(entries)
    }

    /// List secret names in sorted order.
    pub fn list(&self) -> Result<Vec<String>> {
        let names: Vec<String> = self.read(|v| Ok(v.secrets.keys().cloned().collect()))?;
        self.audit("list", None, "success", None);
        Ok(names)
    }

    /// Initialize a new file vault. The vault must not already exist.
    ///
    /// Settings already in `keyvault.toml` are kept; the default secret and
    /// the auth method (plus the keyfile path, when known) are written over them.
    /// A development client has nothing to initialize and returns `Ok`.
    pub fn init_vault(&self) -> Result<()> {
        let Backend::File { key, .. } = &self.backend else {
            return Ok(());
        };

        if vault::is_initialized() {
            return Err(KeyVaultError::VaultAlreadyExists(
                vault::vault_path().display().to_string(),
            ));
        }

        let config_path = vault::config_path();
        let mut config = Config::load(&config_path)?;
        config.vault.default_secret = self.secret_name.clone();
        match key {
            VaultKey::Passphrase(_) => {
                config.vault.auth_method = "passphrase".to_string();
                config.vault.keyfile = None;
            }
            VaultKey::Keyfile { .. } => {
                config.vault.auth_method = "keyfile".to_string();
                if let Some(path) = &self.keyfile_path {
                    config.vault.keyfile = Some(path.clone());
                }
            }
        }

        vault::save_vault(&Vault::new(), key)?;
        config.save(&config_path)?;

        self.audit("init", None, "success", None);
        Ok(())
    }

    /// Read all audit entries from the log.
    pub fn audit_entries(&self) -> Result<Vec<audit::AuditEntry>> {
        audit::read_entries(&vault::audit_path())
    }

    /// Verify the integrity of the audit chain.
    /// Returns `(entry_count, valid)`.
    pub fn verify_audit_chain(&self) -> Result<(usize, bool)> {
        match &self.backend {
            Backend::File { audit_key, .. } => {
                audit::verify_chain(&vault::audit_path(), audit_key)
            }
            Backend::Memory(_) => Ok((0, true)),
        }
    }

    // ── internal helpers ─────────────────────────────────────────

    fn read<T>(&self, f: impl FnOnce(&Vault) -> Result<T>) -> Result<T> {
        match &self.backend {
            Backend::Memory(lock) => {
                let v = lock
                    .read()
                    .map_err(|_| KeyVaultError::Other("development vault lock poisoned".into()))?;
                f(&*v)
            }
            Backend::File { key, .. } => f(&vault::load_vault(key)?),
        }
    }

    /// Run a mutation. The closure returns its result and whether the vault changed.
    fn write<T>(&self, f: impl FnOnce(&mut Vault) -> Result<(T, bool)>) -> Result<T> {
        match &self.backend {
            Backend::Memory(lock) => {
                let mut v = lock
                    .write()
                    .map_err(|_| KeyVaultError::Other("development vault lock poisoned".into()))?;
                let (out, dirty) = f(&mut *v)?;
                if dirty {
                    v.touch();
                }
                Ok(out)
            }
            Backend::File { key, .. } => {
                let mut v = vault::load_vault(key)?;
                let (out, dirty) = f(&mut v)?;
                if dirty {
                    v.touch();
                    vault::save_vault(&v, key)?;
                }
                Ok(out)
            }
        }
    }

    fn audit(&self, operation: &str, secret: Option<&str>, outcome: &str, detail: Option<&str>) {
        let Backend::File {
            audit_key,
            audit_enabled: true,
            ..
        } = &self.backend
        else {
            return;
        };

        if let Err(e) = audit::log_event(
            &vault::audit_path(),
            operation,
            secret,
            &self.actor,
            outcome,
            detail,
            audit_key,
        ) {
            tracing::warn!(error = %e, operation, "failed to append audit entry");
        }
    }
}

impl Default for KeyVaultClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyVaultClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backend = match self.backend {
            Backend::Memory(_) => "development",
            Backend::File { .. } => "file",
        };
        f.debug_struct("KeyVaultClient")
            .field("backend", &backend)
            .field("secret_name", &self.secret_name)
            .field("actor", &self.actor)
            .finish()
    }
}
