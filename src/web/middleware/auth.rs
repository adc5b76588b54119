//! Session token authentication.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Extract the session token from request headers.
///
/// Accepts the token either bare or with a `Bearer ` prefix.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTH_TOKEN_HEADER)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Extractor for authenticated users.
///
/// Use this extractor to require authentication for a handler. Resolves
/// the `auth-token` header against the live session table and loads the
/// current user; any failure rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Authenticated user id.
    pub id: i64,
    /// Authenticated user login.
    pub login: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 AppState,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = extract_token(&parts.headers)
                .ok_or_else(|| ApiError::unauthorized("missing auth-token header"))?;

            let user = state
                .auth
                .authenticate(token)
                .await
                .map_err(|_| ApiError::unauthorized("invalid or expired token"))?;

            Ok(AuthUser {
                id: user.id,
                login: user.login,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bare_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("tok-123"));
        assert_eq!(extract_token(&headers), Some("tok-123"));
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTH_TOKEN_HEADER,
            HeaderValue::from_static("Bearer tok-123"),
        );
        assert_eq!(extract_token(&headers), Some("tok-123"));
    }

    #[test]
    fn test_extract_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_extract_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static(""));
        assert_eq!(extract_token(&headers), None);

        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_token(&headers), None);
    }
}
