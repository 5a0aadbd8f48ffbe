use predicates::prelude::*;
use tempfile::TempDir;

use super::{bare_cmd, init_vault, keyvault_cmd};

#[test]
fn test_init_creates_vault() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);
    assert!(dir.path().join("vault.age").exists());
    assert!(dir.path().join("keyvault.toml").exists());
    assert!(dir.path().join("audit.log").exists());
}

#[test]
fn test_init_twice_fails() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);
    bare_cmd(&dir)
        .args(["init", "--passphrase", "testpass"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_store_and_get() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    keyvault_cmd(&dir)
        .args(["store", "my-secret"])
        .write_stdin("secret123\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("stored"));

    keyvault_cmd(&dir)
        .args(["get", "my-secret"])
        .assert()
        .success()
        .stdout("secret123");
}

#[test]
fn test_get_without_name_reads_default_secret() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    keyvault_cmd(&dir)
        .args(["store", "default"])
        .write_stdin("password")
        .assert()
        .success();

    keyvault_cmd(&dir)
        .arg("get")
        .assert()
        .success()
        .stdout("password");
}

#[test]
fn test_init_custom_default_secret() {
    let dir = TempDir::new().unwrap();
    bare_cmd(&dir)
        .args(["init", "--passphrase", "testpass", "--default-secret", "db-password"])
        .assert()
        .success();

    keyvault_cmd(&dir)
        .args(["store", "db-password"])
        .write_stdin("pg-secret")
        .assert()
        .success();

    keyvault_cmd(&dir)
        .arg("get")
        .assert()
        .success()
        .stdout("pg-secret");

    keyvault_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_secret = \"db-password\""));
}

#[test]
fn test_list_rotate_remove() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    for (name, value) in [("beta", "v1"), ("alpha", "v1")] {
        keyvault_cmd(&dir)
            .args(["store", name])
            .write_stdin(value)
            .assert()
            .success();
    }

    keyvault_cmd(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("alpha\nbeta\n");

    keyvault_cmd(&dir)
        .args(["rotate", "alpha"])
        .write_stdin("v2")
        .assert()
        .success()
        .stderr(predicate::str::contains("version 2"));

    keyvault_cmd(&dir)
        .args(["get", "alpha"])
        .assert()
        .success()
        .stdout("v2");

    keyvault_cmd(&dir)
        .args(["remove", "beta"])
        .assert()
        .success();

    keyvault_cmd(&dir)
        .args(["get", "beta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_store_force_overwrite() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    keyvault_cmd(&dir)
        .args(["store", "dup"])
        .write_stdin("v1")
        .assert()
        .success();

    keyvault_cmd(&dir)
        .args(["store", "dup"])
        .write_stdin("v2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    keyvault_cmd(&dir)
        .args(["store", "dup", "--force"])
        .write_stdin("v2")
        .assert()
        .success()
        .stderr(predicate::str::contains("updated"));

    keyvault_cmd(&dir)
        .args(["get", "dup"])
        .assert()
        .success()
        .stdout("v2");
}

#[test]
fn test_audit_show_and_verify() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    keyvault_cmd(&dir)
        .args(["store", "tracked"])
        .write_stdin("v")
        .assert()
        .success();

    keyvault_cmd(&dir)
        .args(["audit", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("tracked"));

    keyvault_cmd(&dir)
        .args(["audit", "verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries, chain intact"));
}

#[test]
fn test_audit_verify_detects_tampering() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    keyvault_cmd(&dir)
        .args(["store", "tracked"])
        .write_stdin("v")
        .assert()
        .success();

    let log = dir.path().join("audit.log");
    let content = std::fs::read_to_string(&log).unwrap();
    std::fs::write(&log, content.replace("\"tracked\"", "\"renamed\"")).unwrap();

    keyvault_cmd(&dir)
        .args(["audit", "verify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("integrity violation at entry 1"));
}

#[test]
fn test_wrong_passphrase_fails() {
    let dir = TempDir::new().unwrap();
    init_vault(&dir);

    keyvault_cmd(&dir)
        .env("KEYVAULT_PASSPHRASE", "wrongpass")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption error"));
}
