use crate::cli::common;
use crate::cli::json_output::GetResponse;
use keyvault::error::{KeyVaultError, Result};

pub fn run(name: Option<&str>, json: bool) -> Result<()> {
    let client = common::open_client()?;
    let name = name.unwrap_or(client.secret_name()).to_string();

    let (value, meta) = client
        .entry(&name)?
        .ok_or_else(|| KeyVaultError::SecretNotFound(name.clone()))?;

    if json {
        common::print_json(&GetResponse {
            name,
            value,
            version: meta.version,
            created: meta.created_at.to_rfc3339(),
            modified: meta.modified_at.to_rfc3339(),
        })?;
    } else {
        print!("{}", value);
    }

    Ok(())
}
