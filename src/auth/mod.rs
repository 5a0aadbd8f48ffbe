pub mod context;

use std::env;
use std::fs;
use std::io::IsTerminal;

use crate::config::Config;
use crate::error::{KeyVaultError, Result};
use crate::vault::{self, VaultKey};
use context::AuthContext;

pub const KEYVAULT_PASSPHRASE_ENV: &str = "KEYVAULT_PASSPHRASE";
pub const KEYVAULT_KEYFILE_ENV: &str = "KEYVAULT_KEYFILE";
const KEYVAULT_NON_INTERACTIVE_ENV: &str = "KEYVAULT_NON_INTERACTIVE";

/// Check if we are in non-interactive mode.
/// Returns true if stdin is not a TTY or KEYVAULT_NON_INTERACTIVE=1 is set.
pub fn is_non_interactive() -> bool {
    if env::var(KEYVAULT_NON_INTERACTIVE_ENV)
        .map(|v| v == "1")
        .unwrap_or(false)
    {
        return true;
    }
    !std::io::stdin().is_terminal()
}

/// Resolve credentials from the environment only. Tries in order:
/// 1. KEYVAULT_KEYFILE env var
/// 2. KEYVAULT_PASSPHRASE env var
pub fn resolve_env_auth() -> Option<Result<(VaultKey, AuthContext)>> {
    if let Ok(keyfile_path) = env::var(KEYVAULT_KEYFILE_ENV) {
        return Some(read_keyfile(&keyfile_path).map(|(identity, pubkey)| {
            (
                VaultKey::Keyfile { identity, pubkey },
                AuthContext::master_keyfile(),
            )
        }));
    }

    if let Ok(passphrase) = env::var(KEYVAULT_PASSPHRASE_ENV) {
        return Some(Ok((
            VaultKey::passphrase(passphrase),
            AuthContext::master_passphrase(),
        )));
    }

    None
}

/// Resolve authentication. Tries in order:
/// 1. Environment (see [`resolve_env_auth`])
/// 2. Keyfile named in `keyvault.toml` when `auth_method = "keyfile"`
/// 3. Interactive passphrase prompt (only if a TTY is available)
pub fn resolve_auth() -> Result<(VaultKey, AuthContext)> {
    if let Some(resolved) = resolve_env_auth() {
        return resolved;
    }

    let config = Config::load(&vault::config_path())?;
    if config.vault.auth_method == "keyfile" {
        if let Some(ref keyfile_path) = config.vault.keyfile {
            tracing::debug!(keyfile = %keyfile_path, "using keyfile from config");
            let (identity, pubkey) = read_keyfile(keyfile_path)?;
            return Ok((
                VaultKey::Keyfile { identity, pubkey },
                AuthContext::master_keyfile(),
            ));
        }
    }

    if is_non_interactive() {
        return Err(KeyVaultError::AuthFailed(
            "No credentials provided. Set KEYVAULT_KEYFILE or KEYVAULT_PASSPHRASE environment variable.".into(),
        ));
    }

    let passphrase = prompt_passphrase("Enter vault passphrase", false)?;
    Ok((
        VaultKey::passphrase(passphrase),
        AuthContext::master_passphrase(),
    ))
}

/// Resolve auth for init (no vault exists yet, just get the key).
///
/// Returns the key and, when a keyfile was generated, its path.
pub fn resolve_auth_for_init(
    passphrase: Option<String>,
    generate_keyfile: Option<String>,
) -> Result<(VaultKey, Option<String>)> {
    if let Some(keyfile_path) = generate_keyfile {
        let (secret_key, public_key) = vault::crypto::generate_keypair();
        fs::write(&keyfile_path, &secret_key)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&keyfile_path, fs::Permissions::from_mode(0o600))?;
        }
        let pubkey_path = format!("{}.pub", keyfile_path);
        fs::write(&pubkey_path, &public_key)?;

        tracing::info!(keyfile = %keyfile_path, pubkey = %pubkey_path, "generated keyfile");

        return Ok((
            VaultKey::Keyfile {
                identity: secret_key,
                pubkey: public_key,
            },
            Some(keyfile_path),
        ));
    }

    if let Some(pass) = passphrase {
        return Ok((VaultKey::passphrase(pass), None));
    }

    if let Ok(pass) = env::var(KEYVAULT_PASSPHRASE_ENV) {
        return Ok((VaultKey::passphrase(pass), None));
    }

    if is_non_interactive() {
        return Err(KeyVaultError::AuthFailed(
            "No passphrase provided. Use --passphrase, --generate-keyfile, or KEYVAULT_PASSPHRASE.".into(),
        ));
    }

    let pass = prompt_passphrase("Create vault passphrase", true)?;
    Ok((VaultKey::passphrase(pass), None))
}

#[cfg(feature = "cli")]
fn prompt_passphrase(prompt: &str, confirm: bool) -> Result<String> {
    let mut input = dialoguer::Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm passphrase", "Passphrases don't match");
    }
    input
        .interact()
        .map_err(|e| KeyVaultError::AuthFailed(format!("Failed to read passphrase: {}", e)))
}

#[cfg(not(feature = "cli"))]
fn prompt_passphrase(_prompt: &str, _confirm: bool) -> Result<String> {
    Err(KeyVaultError::AuthFailed(
        "Interactive passphrase entry requires the `cli` feature".into(),
    ))
}

/// Read an age keyfile from disk. Returns (identity_string, public_key_string).
pub fn read_keyfile(path: &str) -> Result<(String, String)> {
    let content = fs::read_to_string(path)
        .map_err(|e| KeyVaultError::InvalidKeyfile(format!("Cannot read {}: {}", path, e)))?;

    let identity: age::x25519::Identity = content
        .trim()
        .parse()
        .map_err(|e: &str| KeyVaultError::InvalidKeyfile(e.to_string()))?;

    let pubkey = identity.to_public().to_string();
    Ok((content.trim().to_string(), pubkey))
}
