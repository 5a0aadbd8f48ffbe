//! Common re-exports shared by the vault, audit and config modules.

pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use std::collections::BTreeMap;
pub use std::path::PathBuf;
