use crate::types::*;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single secret entry in the vault.
#[derive(Debug, Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SecretEntry {
    /// The secret value (plaintext once the vault is decrypted).
    pub value: String,
    #[zeroize(skip)]
    pub metadata: SecretMetadata,
}

/// Non-sensitive bookkeeping for a secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretMetadata {
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub version: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SecretMetadata {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            modified_at: now,
            version: 1,
            tags: Vec::new(),
            description: None,
        }
    }

    pub fn bump_version(&mut self) {
        self.version += 1;
        self.modified_at = Utc::now();
    }
}

impl Default for SecretMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretEntry {
    pub fn new(value: String) -> Self {
        Self {
            value,
            metadata: SecretMetadata::new(),
        }
    }

    /// Replace the value and advance the version. Returns the new version.
    pub fn rotate(&mut self, value: String) -> u32 {
        self.value.zeroize();
        self.value = value;
        self.metadata.bump_version();
        self.metadata.version
    }
}
