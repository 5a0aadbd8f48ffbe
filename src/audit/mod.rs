use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{KeyVaultError, Result};
use crate::types::*;
use crate::vault::VaultKey;

type HmacSha256 = Hmac<Sha256>;

/// A single audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub secret: Option<String>,
    pub actor: String,
    pub outcome: String,
    pub detail: Option<String>,
    pub chain_hmac: String,
}

impl AuditEntry {
    fn chain_data(&self, prev_hmac: &str) -> String {
        format!(
            "{}|{}|{}|{:?}|{}|{}|{:?}",
            prev_hmac,
            self.timestamp.to_rfc3339(),
            self.operation,
            self.secret,
            self.actor,
            self.outcome,
            self.detail,
        )
    }
}

/// Append an audit entry to the log file.
pub fn log_event(
    audit_path: &Path,
    operation: &str,
    secret: Option<&str>,
    actor: &str,
    outcome: &str,
    detail: Option<&str>,
    hmac_key: &[u8],
) -> Result<()> {
    let prev_hmac = read_last_hmac(audit_path);

    let mut entry = AuditEntry {
        timestamp: Utc::now(),
        operation: operation.to_string(),
        secret: secret.map(|s| s.to_string()),
        actor: actor.to_string(),
        outcome: outcome.to_string(),
        detail: detail.map(|s| s.to_string()),
        chain_hmac: String::new(),
    };
    entry.chain_hmac = compute_chain_hmac(&entry.chain_data(&prev_hmac), hmac_key)?;

    let json_line =
        serde_json::to_string(&entry).map_err(|e| KeyVaultError::Serialization(e.to_string()))?;

    if let Some(dir) = audit_path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(audit_path)?;
    writeln!(file, "{}", json_line)?;

    Ok(())
}

/// Read all audit entries from the log file.
pub fn read_entries(audit_path: &Path) -> Result<Vec<AuditEntry>> {
    if !audit_path.exists() {
        return Ok(Vec::new());
    }

    let file = fs::File::open(audit_path)?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: AuditEntry = serde_json::from_str(&line)
            .map_err(|e| KeyVaultError::Serialization(e.to_string()))?;
        entries.push(entry);
    }

    Ok(entries)
}

/// Verify the HMAC chain integrity of the audit log.
pub fn verify_chain(audit_path: &Path, hmac_key: &[u8]) -> Result<(usize, bool)> {
    let entries = read_entries(audit_path)?;
    let mut prev_hmac = String::new();

    for (i, entry) in entries.iter().enumerate() {
        let expected_hmac = compute_chain_hmac(&entry.chain_data(&prev_hmac), hmac_key)?;
        if expected_hmac != entry.chain_hmac {
            return Err(KeyVaultError::AuditChainBroken(i));
        }
        prev_hmac = entry.chain_hmac.clone();
    }

    Ok((entries.len(), true))
}

fn read_last_hmac(audit_path: &Path) -> String {
    let Ok(content) = fs::read_to_string(audit_path) else {
        return String::new();
    };

    content
        .lines()
        .rev()
        .filter(|line| !line.trim().is_empty())
        .find_map(|line| serde_json::from_str::<AuditEntry>(line).ok())
        .map(|entry| entry.chain_hmac)
        .unwrap_or_default()
}

fn compute_chain_hmac(data: &str, hmac_key: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(hmac_key)
        .map_err(|e| KeyVaultError::Other(format!("Invalid audit key: {e}")))?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Derive the audit HMAC key from the vault key.
pub fn derive_audit_key(key: &VaultKey) -> Result<Vec<u8>> {
    crate::vault::crypto::derive_key(&key.material(), b"audit-hmac", 32)
}
