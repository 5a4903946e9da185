use serde::{Deserialize, Serialize};

use crate::users::models::{Permission, Role};

/// Point-in-time view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<Permission>,
    pub logged_in: bool,
}

/// Untrusted form fields as submitted; any of them may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct RawUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Form fields after sanitizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: String,
}
