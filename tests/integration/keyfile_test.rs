use predicates::prelude::*;
use tempfile::TempDir;

use super::bare_cmd;

#[test]
fn test_keyfile_init_and_use() {
    let dir = TempDir::new().unwrap();
    let keyfile = dir.path().join("vault.key");
    let keyfile = keyfile.to_str().unwrap();

    bare_cmd(&dir)
        .args(["init", "--generate-keyfile", keyfile])
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated keyfile"));

    assert!(dir.path().join("vault.key.pub").exists());

    bare_cmd(&dir)
        .env("KEYVAULT_KEYFILE", keyfile)
        .args(["store", "default"])
        .write_stdin("from-keyfile")
        .assert()
        .success();

    bare_cmd(&dir)
        .env("KEYVAULT_KEYFILE", keyfile)
        .arg("get")
        .assert()
        .success()
        .stdout("from-keyfile");
}

#[cfg(unix)]
#[test]
fn test_generated_keyfile_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let keyfile = dir.path().join("vault.key");

    bare_cmd(&dir)
        .args(["init", "--generate-keyfile", keyfile.to_str().unwrap()])
        .assert()
        .success();

    let mode = std::fs::metadata(&keyfile).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_keyfile_from_config() {
    let dir = TempDir::new().unwrap();
    let keyfile = dir.path().join("vault.key");
    let keyfile = keyfile.to_str().unwrap().to_string();

    bare_cmd(&dir)
        .args(["init", "--generate-keyfile", &keyfile])
        .assert()
        .success();

    let config = std::fs::read_to_string(dir.path().join("keyvault.toml")).unwrap();
    assert!(config.contains("auth_method = \"keyfile\""));
    assert!(config.contains(&keyfile));

    // No KEYVAULT_KEYFILE: the keyfile comes from what init recorded
    bare_cmd(&dir)
        .args(["store", "default"])
        .write_stdin("configured")
        .assert()
        .success();

    bare_cmd(&dir)
        .arg("get")
        .assert()
        .success()
        .stdout("configured");
}

#[test]
fn test_keyfile_init_shown_in_config() {
    let dir = TempDir::new().unwrap();
    let keyfile = dir.path().join("vault.key");
    let keyfile = keyfile.to_str().unwrap();

    bare_cmd(&dir)
        .args(["init", "--generate-keyfile", keyfile])
        .assert()
        .success();

    bare_cmd(&dir)
        .env("KEYVAULT_KEYFILE", keyfile)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auth_method = \"keyfile\""))
        .stdout(predicate::str::contains(keyfile));
}
