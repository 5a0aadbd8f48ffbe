mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use keyvault::error::JsonError;

fn main() {
    let cli = Cli::parse();
    cli::logger::init_cli_logger(cli.verbose);

    let json = cli.json;
    let result = match &cli.command {
        Commands::Init {
            generate_keyfile,
            passphrase,
            default_secret,
        } => cli::init::run(
            passphrase.clone(),
            generate_keyfile.clone(),
            default_secret.clone(),
        ),

        Commands::Get { name } => cli::get::run(name.as_deref(), json),

        Commands::Store { name, force } => cli::store::run(name, *force, json),

        Commands::List => cli::list::run(json),

        Commands::Remove { name } => cli::remove::run(name, json),

        Commands::Rotate { name } => cli::rotate::run(name, json),

        Commands::Audit { command } => cli::audit::run(command, json),

        Commands::Config { command } => cli::config::run(command, json),
    };

    if let Err(e) = result {
        tracing::debug!(code = e.error_code(), "command failed");
        if json {
            match serde_json::to_string(&JsonError::from_error(&e)) {
                Ok(out) => eprintln!("{}", out),
                Err(_) => eprintln!("Error: {}", e),
            }
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}
