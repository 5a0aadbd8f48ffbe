pub mod audit;
pub mod common;
pub mod config;
pub mod get;
pub mod init;
pub mod json_output;
pub mod list;
pub mod logger;
pub mod remove;
pub mod rotate;
pub mod store;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "keyvault", version, about = "Secret vault client")]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug diagnostics on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new vault
    Init {
        /// Generate a keyfile at this path instead of using a passphrase
        #[arg(long)]
        generate_keyfile: Option<String>,
        /// Set vault passphrase non-interactively
        #[arg(long, env = "KEYVAULT_PASSPHRASE")]
        passphrase: Option<String>,
        /// Name of the default secret (defaults to "default")
        #[arg(long)]
        default_secret: Option<String>,
    },

    /// Get a secret value (the default secret when NAME is omitted)
    Get {
        /// Secret name
        name: Option<String>,
    },

    /// Store a secret (reads value from stdin)
    Store {
        /// Secret name
        name: String,
        /// Overwrite if exists
        #[arg(long)]
        force: bool,
    },

    /// List secret names
    List,

    /// Remove a secret
    Remove {
        /// Secret name
        name: String,
    },

    /// Rotate a secret (reads new value from stdin)
    Rotate {
        /// Secret name
        name: String,
    },

    /// View and verify audit logs
    Audit {
        #[command(subcommand)]
        command: AuditCommands,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum AuditCommands {
    /// Show recent audit log entries
    Show {
        /// Number of entries to show (0 = all)
        #[arg(long, short, default_value = "20")]
        count: usize,
    },
    /// Verify audit log integrity
    Verify,
    /// Export audit log as JSON array
    Export,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
}
