//! HS256 session tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use momentum_domain::shared::{DomainError, UserId};
use serde::{Deserialize, Serialize};

use crate::config::MIN_JWT_SECRET_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::from_string(&self.sub)
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService").field("ttl", &self.ttl).finish()
    }
}

impl JwtService {
    pub fn new(secret: &str, ttl_hours: i64) -> Result<Self, DomainError> {
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(DomainError::Validation(format!(
                "JWT secret must be at least {} characters",
                MIN_JWT_SECRET_LEN
            )));
        }
        if ttl_hours <= 0 {
            return Err(DomainError::Validation(
                "Token lifetime must be positive".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: &UserId, username: &str) -> Result<IssuedToken, DomainError> {
        self.issue_at(user_id, username, Utc::now())
    }

    fn issue_at(
        &self,
        user_id: &UserId,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::Infrastructure(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| {
                let reason = match err.kind() {
                    ErrorKind::ExpiredSignature => "Token expired",
                    ErrorKind::InvalidSignature => "Invalid signature",
                    _ => "Invalid token",
                };
                DomainError::Unauthorized(reason.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_issue_and_verify() {
        let service = JwtService::new(SECRET, 1).unwrap();
        let user_id = UserId::new();

        let issued = service.issue(&user_id, "alice").unwrap();
        let claims = service.verify(&issued.token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_rejects_short_secret() {
        assert!(JwtService::new("short", 1).is_err());
        assert!(JwtService::new(SECRET, 0).is_err());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = JwtService::new(SECRET, 1).unwrap();
        let other = JwtService::new("fedcba9876543210fedcba9876543210", 1).unwrap();

        let issued = issuer.issue(&UserId::new(), "alice").unwrap();
        let err = other.verify(&issued.token).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(ref m) if m == "Invalid signature"));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::new(SECRET, 1).unwrap();
        let issued = service
            .issue_at(&UserId::new(), "alice", Utc::now() - Duration::hours(3))
            .unwrap();

        let err = service.verify(&issued.token).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(ref m) if m == "Token expired"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let service = JwtService::new(SECRET, 1).unwrap();
        assert!(matches!(
            service.verify("not.a.jwt"),
            Err(DomainError::Unauthorized(_))
        ));
    }
}
