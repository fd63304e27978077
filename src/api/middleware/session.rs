//! Session extraction
//!
//! The portal never validates sessions itself. Whatever the browser sent is
//! forwarded to the core API, which answers 401 when it is no good.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::api::types::ApiError;
use crate::infrastructure::lscs::{SessionCredentials, SESSION_COOKIE};

/// Extractor that requires a session cookie or a bearer token
#[derive(Debug, Clone)]
pub struct RequireSession(pub SessionCredentials);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_credentials(&parts.headers).map(RequireSession)
    }
}

/// Collect the session cookie and bearer token, if present
pub fn extract_credentials(headers: &HeaderMap) -> Result<SessionCredentials, ApiError> {
    let mut credentials = SessionCredentials::new();

    if let Some(session_id) = session_cookie(headers) {
        credentials = credentials.with_session(session_id);
    }

    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            credentials = credentials.with_bearer(token.trim());
        }
    }

    if credentials.is_empty() {
        return Err(ApiError::unauthorized(
            "Authentication required. Sign in to the portal or provide 'Authorization: Bearer <token>'",
        )
        .with_code("missing_session"));
    }

    Ok(credentials)
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}
