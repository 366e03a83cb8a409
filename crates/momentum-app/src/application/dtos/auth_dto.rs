use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use momentum_domain::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            created_at: user.created_at(),
        }
    }
}

/// Returned by register and login. The token is also set as a cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub user: UserDto,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
