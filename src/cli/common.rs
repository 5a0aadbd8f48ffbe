use std::io::{self, Read};

use keyvault::auth;
use keyvault::error::{KeyVaultError, Result};
use keyvault::KeyVaultClient;
use serde::Serialize;

/// Resolve credentials and open a client over the file vault.
pub fn open_client() -> Result<KeyVaultClient> {
    let (key, auth_ctx) = auth::resolve_auth()?;
    KeyVaultClient::from_key(key, auth_ctx.actor_name())
}

/// Read a secret value from stdin, trimming the trailing newline `echo` adds.
pub fn read_value_from_stdin() -> Result<String> {
    let mut value = String::new();
    io::stdin()
        .read_to_string(&mut value)
        .map_err(|e| KeyVaultError::Other(format!("Failed to read from stdin: {}", e)))?;
    Ok(value.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out =
        serde_json::to_string(value).map_err(|e| KeyVaultError::Serialization(e.to_string()))?;
    println!("{}", out);
    Ok(())
}
