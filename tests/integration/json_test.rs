use tempfile::TempDir;

use super::{init_vault, keyvault_cmd};

fn setup(dir: &TempDir) {
    init_vault(dir);

    keyvault_cmd(dir)
        .args(["store", "api-key"])
        .write_stdin("sk-test-123")
        .assert()
        .success();
}

#[test]
fn test_get_json() {
    let dir = TempDir::new().unwrap();
    setup(&dir);

    let output = keyvault_cmd(&dir)
        .args(["get", "api-key", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "api-key");
    assert_eq!(json["value"], "sk-test-123");
    assert_eq!(json["version"], 1);
    assert!(json["created"].is_string());
    assert!(json["modified"].is_string());
}

#[test]
fn test_list_json() {
    let dir = TempDir::new().unwrap();
    setup(&dir);

    let output = keyvault_cmd(&dir).args(["list", "--json"]).output().unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let secrets = json["secrets"].as_array().unwrap();
    assert_eq!(secrets.len(), 1);
    assert_eq!(secrets[0]["name"], "api-key");
    assert!(secrets[0].get("value").is_none());
}

#[test]
fn test_rotate_json() {
    let dir = TempDir::new().unwrap();
    setup(&dir);

    let output = keyvault_cmd(&dir)
        .args(["rotate", "api-key", "--json"])
        .write_stdin("sk-test-456")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "rotated");
    assert_eq!(json["version"], 2);
}

#[test]
fn test_remove_json() {
    let dir = TempDir::new().unwrap();
    setup(&dir);

    let output = keyvault_cmd(&dir)
        .args(["remove", "api-key", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "api-key");
    assert_eq!(json["operation"], "removed");
    assert!(json.get("version").is_none());
}

#[test]
fn test_error_json() {
    let dir = TempDir::new().unwrap();
    setup(&dir);

    let output = keyvault_cmd(&dir)
        .args(["get", "missing", "--json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["exit_code"], 3);
}

#[test]
fn test_audit_show_json() {
    let dir = TempDir::new().unwrap();
    setup(&dir);

    let output = keyvault_cmd(&dir)
        .args(["audit", "show", "--json", "--count", "1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["shown"], 1);
    assert_eq!(json["total"], 2);
    assert_eq!(json["entries"][0]["operation"], "store");
}
