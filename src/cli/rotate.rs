use crate::cli::common;
use crate::cli::json_output::WriteResponse;
use keyvault::error::{KeyVaultError, Result};

pub fn run(name: &str, json: bool) -> Result<()> {
    let client = common::open_client()?;

    // Fail before blocking on stdin
    if client.metadata(name)?.is_none() {
        return Err(KeyVaultError::SecretNotFound(name.to_string()));
    }

    let value = common::read_value_from_stdin()?;
    let version = client.rotate(name, &value)?;

    if json {
        common::print_json(&WriteResponse {
            name: name.to_string(),
            operation: "rotated",
            version: Some(version),
        })?;
    } else {
        eprintln!("Secret '{}' rotated to version {}.", name, version);
    }
    Ok(())
}
