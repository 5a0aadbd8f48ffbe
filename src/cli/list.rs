use crate::cli::common;
use crate::cli::json_output::{ListResponse, SecretListItem};
use keyvault::error::Result;

pub fn run(json: bool) -> Result<()> {
    let client = common::open_client()?;
    let entries = client.list_entries()?;

    if json {
        let secrets = entries
            .into_iter()
            .map(|(name, meta)| SecretListItem {
                name,
                version: meta.version,
                created: meta.created_at.to_rfc3339(),
                modified: meta.modified_at.to_rfc3339(),
            })
            .collect();
        common::print_json(&ListResponse { secrets })?;
    } else {
        for (name, _) in &entries {
            println!("{}", name);
        }
    }

    Ok(())
}
