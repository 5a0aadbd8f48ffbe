mod cli_test;
mod error_test;
mod json_test;
mod keyfile_test;

use assert_cmd::Command;
use tempfile::TempDir;

/// A `keyvault` command isolated to `dir`, authenticated with the test passphrase.
pub fn keyvault_cmd(dir: &TempDir) -> Command {
    let mut cmd = bare_cmd(dir);
    cmd.env("KEYVAULT_PASSPHRASE", "testpass");
    cmd
}

/// A `keyvault` command isolated to `dir` with no credentials in the environment.
pub fn bare_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("keyvault").unwrap();
    cmd.env("KEYVAULT_DIR", dir.path());
    cmd.env("KEYVAULT_NON_INTERACTIVE", "1");
    cmd.env_remove("KEYVAULT_PASSPHRASE");
    cmd.env_remove("KEYVAULT_KEYFILE");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn init_vault(dir: &TempDir) {
    bare_cmd(dir)
        .args(["init", "--passphrase", "testpass"])
        .assert()
        .success();
}
