use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gateward_core::{FederatedIdentity, User, UserId};

/// Wire view of a user record. Credential material (salt, password
/// digest) never appears here; the api token does, because callers need
/// it to authenticate.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub version: u64,
    pub api_token: String,
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub federated: Vec<FederatedIdentity>,
    pub created_at: DateTime<Utc>,
    pub last_logged_in: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            version: user.version(),
            api_token: user.api_token().as_str().to_owned(),
            blocked: user.is_blocked(),
            username: user.local().map(|l| l.username().as_str().to_owned()),
            email: user.local().map(|l| l.email().as_str().to_owned()),
            federated: user.federated_identities().to_vec(),
            created_at: user.created_at(),
            last_logged_in: user.last_logged_in(),
        }
    }
}

/// The `{id, token}` pair returned by the login paths.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: UserId,
    pub token: String,
}

impl From<&User> for LoginResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            token: user.api_token().as_str().to_owned(),
        }
    }
}
