use serde::{Deserialize, Serialize};

/// Persisted user (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
}

/// Incoming user payload. All fields are optional on the wire; a missing
/// `id` means the store assigns one on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDraft {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
}
