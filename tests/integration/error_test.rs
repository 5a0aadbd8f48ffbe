use tempfile::TempDir;

use super::{bare_cmd, init_vault, keyvault_cmd};

#[test]
fn test_exit_code_vault_not_initialized() {
    let dir = TempDir::new().unwrap();
    let output = keyvault_cmd(&dir).arg("list").output().unwrap();
    assert_eq!(output.status.code(), Some(7)); // VaultNotInitialized
}

#[test]
fn test_exit_code_secret_not_found() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    let output = keyvault_cmd(&dir).args(["get", "nonexistent"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3)); // SecretNotFound
}

#[test]
fn test_exit_code_rotate_missing_does_not_read_stdin() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    let output = keyvault_cmd(&dir).args(["rotate", "ghost"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_exit_code_already_exists() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    let output = bare_cmd(&dir)
        .args(["init", "--passphrase", "testpass"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5)); // VaultAlreadyExists
}

#[test]
fn test_exit_code_no_credentials() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    let output = bare_cmd(&dir).args(["get", "anything"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2)); // AuthFailed
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("KEYVAULT_PASSPHRASE"));
}

#[test]
fn test_exit_code_invalid_name() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    let output = keyvault_cmd(&dir)
        .args(["store", "bad name"])
        .write_stdin("v")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid secret name"));
}
