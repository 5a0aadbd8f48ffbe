use keyvault::auth;
use keyvault::error::{KeyVaultError, Result};
use keyvault::vault;
use keyvault::KeyVaultClient;

pub fn run(
    passphrase: Option<String>,
    generate_keyfile: Option<String>,
    default_secret: Option<String>,
) -> Result<()> {
    if vault::is_initialized() {
        return Err(KeyVaultError::VaultAlreadyExists(
            vault::vault_path().display().to_string(),
        ));
    }

    let (key, generated) = auth::resolve_auth_for_init(passphrase, generate_keyfile)?;

    // A generated keyfile is reopened by path so init records it in keyvault.toml
    let mut client = match &generated {
        Some(keyfile_path) => KeyVaultClient::with_keyfile(keyfile_path)?.with_actor("master"),
        None => KeyVaultClient::from_key(key, "master")?,
    };
    if let Some(name) = default_secret {
        client = client.with_secret_name(name)?;
    }
    client.init_vault()?;

    if let Some(keyfile_path) = generated {
        eprintln!("Generated keyfile: {}", keyfile_path);
        eprintln!("Public key: {}.pub", keyfile_path);
    }
    eprintln!("Vault initialized at {}", vault::vault_dir().display());
    Ok(())
}
