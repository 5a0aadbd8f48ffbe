use crate::cli::ConfigCommands;
use keyvault::config::Config;
use keyvault::error::{KeyVaultError, Result};
use keyvault::vault;

pub fn run(cmd: &ConfigCommands, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(json),
    }
}

fn show(json: bool) -> Result<()> {
    let config = Config::load(&vault::config_path())?;
    if json {
        return crate::cli::common::print_json(&config);
    }
    let toml_str =
        toml::to_string_pretty(&config).map_err(|e| KeyVaultError::Config(e.to_string()))?;
    println!("{}", toml_str);
    Ok(())
}
