use crate::cli::common;
use crate::cli::json_output::WriteResponse;
use keyvault::error::{KeyVaultError, Result};

pub fn run(name: &str, json: bool) -> Result<()> {
    let client = common::open_client()?;

    if !client.remove(name)? {
        return Err(KeyVaultError::SecretNotFound(name.to_string()));
    }

    if json {
        common::print_json(&WriteResponse {
            name: name.to_string(),
            operation: "removed",
            version: None,
        })?;
    } else {
        eprintln!("Secret '{}' removed.", name);
    }
    Ok(())
}
