//! Cookie and bearer-token authentication for the HTTP API.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::presentation::error::ApiError;
use crate::presentation::state::{AuthCookie, SharedState};
use momentum_domain::shared::UserId;

/// The caller, as established by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Reject the request with 401 unless it carries a valid token, read from the
/// auth cookie first and the `Authorization: Bearer` header second.
pub async fn require_auth(
    State(state): State<SharedState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(&state.runtime.auth_cookie.name)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(request.headers()))
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    let claims = state.runtime.jwt.verify(&token)?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id(),
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// HttpOnly, SameSite=Lax cookie carrying the session token.
pub fn session_cookie(settings: &AuthCookie, token: String) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .build()
}

pub fn removal_cookie(settings: &AuthCookie) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), String::new()))
        .path("/")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let settings = AuthCookie {
            name: "momentum_token".to_string(),
            secure: false,
        };
        let cookie = session_cookie(&settings, "tok".to_string());

        assert_eq!(cookie.name(), "momentum_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));

        let header = cookie.to_string();
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(!header.contains("Secure"));
    }
}
