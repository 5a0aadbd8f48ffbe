use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyVaultError {
    #[error("Vault not initialized. Run `keyvault init` first.")]
    VaultNotInitialized,

    #[error("Vault already initialized at {0}")]
    VaultAlreadyExists(String),

    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    #[error("Secret already exists: {0} (use --force to overwrite)")]
    SecretAlreadyExists(String),

    #[error("Invalid secret name '{0}': names must be non-empty and contain no whitespace")]
    InvalidSecretName(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Audit chain integrity violation at entry {0}")]
    AuditChainBroken(usize),

    #[error("Invalid keyfile: {0}")]
    InvalidKeyfile(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl KeyVaultError {
    /// Return a typed exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            KeyVaultError::VaultNotInitialized => 7,
            KeyVaultError::VaultAlreadyExists(_) => 5,
            KeyVaultError::SecretNotFound(_) => 3,
            KeyVaultError::SecretAlreadyExists(_) => 5,
            KeyVaultError::InvalidSecretName(_) => 1,
            KeyVaultError::AuthFailed(_) => 2,
            KeyVaultError::Encryption(_) => 1,
            KeyVaultError::Decryption(_) => 2,
            KeyVaultError::Serialization(_) => 1,
            KeyVaultError::AuditChainBroken(_) => 1,
            KeyVaultError::InvalidKeyfile(_) => 2,
            KeyVaultError::Config(_) => 1,
            KeyVaultError::Io(_) => 1,
            KeyVaultError::Other(_) => 1,
        }
    }

    /// Return a string error code identifier.
    pub fn error_code(&self) -> &'static str {
        match self {
            KeyVaultError::VaultNotInitialized => "vault_not_initialized",
            KeyVaultError::VaultAlreadyExists(_) => "already_exists",
            KeyVaultError::SecretNotFound(_) => "not_found",
            KeyVaultError::SecretAlreadyExists(_) => "already_exists",
            KeyVaultError::InvalidSecretName(_) => "invalid_name",
            KeyVaultError::AuthFailed(_) => "auth_failed",
            KeyVaultError::Encryption(_) => "encryption_error",
            KeyVaultError::Decryption(_) => "decryption_error",
            KeyVaultError::Serialization(_) => "serialization_error",
            KeyVaultError::AuditChainBroken(_) => "audit_chain_broken",
            KeyVaultError::InvalidKeyfile(_) => "invalid_keyfile",
            KeyVaultError::Config(_) => "config_error",
            KeyVaultError::Io(_) => "io_error",
            KeyVaultError::Other(_) => "error",
        }
    }
}

/// JSON error response for --json mode.
#[derive(Serialize)]
pub struct JsonError {
    pub error: JsonErrorDetail,
}

#[derive(Serialize)]
pub struct JsonErrorDetail {
    pub code: String,
    pub message: String,
    pub exit_code: i32,
}

impl JsonError {
    pub fn from_error(e: &KeyVaultError) -> Self {
        Self {
            error: JsonErrorDetail {
                code: e.error_code().to_string(),
                message: e.to_string(),
                exit_code: e.exit_code(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, KeyVaultError>;
