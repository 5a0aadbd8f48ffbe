use crate::cli::common;
use crate::cli::json_output::WriteResponse;
use keyvault::error::Result;

pub fn run(name: &str, force: bool, json: bool) -> Result<()> {
    let client = common::open_client()?;

    let value = common::read_value_from_stdin()?;
    let is_update = client.store(name, &value, force)?;

    let operation = if is_update { "updated" } else { "stored" };
    if json {
        common::print_json(&WriteResponse {
            name: name.to_string(),
            operation,
            version: None,
        })?;
    } else {
        eprintln!("Secret '{}' {}.", name, operation);
    }
    Ok(())
}
