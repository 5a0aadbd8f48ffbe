//! keyvault — secret vault client with an encrypted local vault and audit logging.
//!
//! The central type is [`KeyVaultClient`]. A client built with no arguments
//! talks to an in-memory development vault whose default secret is the
//! well-known `"password"`; clients built from a passphrase or keyfile open the
//! age-encrypted vault on disk. The CLI is gated behind the `cli` feature and
//! is private to the binary.
//!
//! # Quick start
//!
//! ```
//! use keyvault::KeyVaultClient;
//!
//! let client = KeyVaultClient::new();
//! assert_eq!(client.get_secret_value()?, "password");
//! # Ok::<(), keyvault::error::KeyVaultError>(())
//! ```
//!
//! ```no_run
//! use keyvault::KeyVaultClient;
//!
//! let client = KeyVaultClient::with_passphrase("my-vault-passphrase")?;
//! client.store("api-key", "sk-secret-value", false)?;
//! let value = client.get("api-key")?;
//! # Ok::<(), keyvault::error::KeyVaultError>(())
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod types;
pub mod vault;

pub use api::KeyVaultClient;
