use crate::cli::common;
use crate::cli::json_output::{AuditEntryItem, AuditShowResponse, AuditVerifyResponse};
use crate::cli::AuditCommands;
use keyvault::audit as audit_mod;
use keyvault::error::{KeyVaultError, Result};
use keyvault::vault;

pub fn run(cmd: &AuditCommands, json: bool) -> Result<()> {
    match cmd {
        AuditCommands::Show { count } => show(*count, json),
        AuditCommands::Verify => verify(json),
        AuditCommands::Export => export(),
    }
}

fn show(count: usize, json: bool) -> Result<()> {
    let entries = audit_mod::read_entries(&vault::audit_path())?;

    let display = if count == 0 {
        &entries[..]
    } else {
        let start = entries.len().saturating_sub(count);
        &entries[start..]
    };

    if json {
        let items: Vec<AuditEntryItem> = display
            .iter()
            .map(|e| AuditEntryItem {
                timestamp: e.timestamp.to_rfc3339(),
                operation: e.operation.clone(),
                secret: e.secret.clone(),
                actor: e.actor.clone(),
                outcome: e.outcome.clone(),
                detail: e.detail.clone(),
            })
            .collect();
        return common::print_json(&AuditShowResponse {
            shown: items.len(),
            total: entries.len(),
            entries: items,
        });
    }

    if entries.is_empty() {
        eprintln!("No audit log entries.");
        return Ok(());
    }

    for entry in display {
        let secret_str = entry.secret.as_deref().unwrap_or("-");
        let detail_str = entry.detail.as_deref().unwrap_or("");
        println!(
            "{} | {:<10} | {:<10} | {:<20} | {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.operation,
            entry.outcome,
            entry.actor,
            secret_str,
            detail_str,
        );
    }

    eprintln!("\n({} entries shown of {} total)", display.len(), entries.len());
    Ok(())
}

fn verify(json: bool) -> Result<()> {
    let client = common::open_client()?;

    match client.verify_audit_chain() {
        Ok((count, valid)) => {
            if json {
                common::print_json(&AuditVerifyResponse {
                    entries: count,
                    valid,
                })?;
            } else {
                println!("Audit log integrity verified. {} entries, chain intact.", count);
            }
            Ok(())
        }
        Err(e @ KeyVaultError::AuditChainBroken(_)) => {
            tracing::error!(error = %e, "audit chain verification failed");
            Err(e)
        }
        Err(e) => Err(e),
    }
}

fn export() -> Result<()> {
    let entries = audit_mod::read_entries(&vault::audit_path())?;
    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| KeyVaultError::Serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
