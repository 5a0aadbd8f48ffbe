use serde::Serialize;

/// JSON response for `keyvault get --json`.
#[derive(Serialize)]
pub struct GetResponse {
    pub name: String,
    pub value: String,
    pub version: u32,
    pub created: String,
    pub modified: String,
}

/// JSON response for `keyvault list --json`.
#[derive(Serialize)]
pub struct ListResponse {
    pub secrets: Vec<SecretListItem>,
}

#[derive(Serialize)]
pub struct SecretListItem {
    pub name: String,
    pub version: u32,
    pub created: String,
    pub modified: String,
}

/// JSON response for `keyvault store --json` and `keyvault rotate --json`.
#[derive(Serialize)]
pub struct WriteResponse {
    pub name: String,
    pub operation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

/// JSON response for `keyvault audit show --json`.
#[derive(Serialize)]
pub struct AuditShowResponse {
    pub entries: Vec<AuditEntryItem>,
    pub shown: usize,
    pub total: usize,
}

#[derive(Serialize)]
pub struct AuditEntryItem {
    pub timestamp: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub actor: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// JSON response for `keyvault audit verify --json`.
#[derive(Serialize)]
pub struct AuditVerifyResponse {
    pub entries: usize,
    pub valid: bool,
}
