use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    #[serde(skip_serializing)]
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl User {
    pub const MIN_USERNAME_LEN: usize = 3;
    pub const MAX_USERNAME_LEN: usize = 32;
    pub const MIN_PASSWORD_LEN: usize = 8;
    pub const MAX_PASSWORD_LEN: usize = 128;

    /// `password_hash` must already be a PHC string; hashing lives in the
    /// infrastructure layer.
    pub fn new(username: &str, password_hash: String) -> Result<Self, DomainError> {
        Ok(Self {
            id: UserId::new(),
            username: Self::validate_username(username)?,
            password_hash,
            created_at: Utc::now(),
        })
    }

    pub fn restore(
        id: UserId,
        username: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            created_at,
        }
    }

    pub fn validate_username(username: &str) -> Result<String, DomainError> {
        let trimmed = username.trim();
        let len = trimmed.chars().count();
        if len < Self::MIN_USERNAME_LEN || len > Self::MAX_USERNAME_LEN {
            return Err(DomainError::Validation(format!(
                "Username must be {}-{} characters",
                Self::MIN_USERNAME_LEN,
                Self::MAX_USERNAME_LEN
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(DomainError::Validation(
                "Username may only contain letters, digits, '_', '.' and '-'".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    /// Checks a plaintext password before it is hashed.
    pub fn validate_password(password: &str) -> Result<(), DomainError> {
        let len = password.chars().count();
        if len < Self::MIN_PASSWORD_LEN || len > Self::MAX_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be {}-{} characters",
                Self::MIN_PASSWORD_LEN,
                Self::MAX_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert_eq!(User::validate_username("  alice_01 ").unwrap(), "alice_01");
        assert!(User::validate_username("ab").is_err());
        assert!(User::validate_username(&"a".repeat(33)).is_err());
        assert!(User::validate_username("bob smith").is_err());
        assert!(User::validate_username("j.doe-2").is_ok());
    }

    #[test]
    fn test_password_rules() {
        assert!(User::validate_password("short").is_err());
        assert!(User::validate_password("long enough").is_ok());
    }

    #[test]
    fn test_hash_is_not_serialized() {
        let user = User::new("alice", "$argon2id$v=19$secret".to_string()).unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("argon2id"));
    }
}
