//! Key request and management endpoints

use axum::extract::{Path, State};
use chrono::Utc;
use tracing::debug;

use super::middleware::RequireSession;
use super::state::AppState;
use super::types::{ApiError, Json, KeyListResponse, KeyListing, MessageResponse, PermissionsResponse};
use crate::domain::api_key::{ApiKeyId, IssuedKey, KeyRequest};

/// GET /me/permissions
pub async fn permissions(
    State(state): State<AppState>,
    RequireSession(credentials): RequireSession,
) -> Result<Json<PermissionsResponse>, ApiError> {
    let session = state.session(credentials).await?;
    Ok(Json(PermissionsResponse::from(&session.requester)))
}

/// POST /request-key
///
/// The response body is the only place the secret is ever shown.
pub async fn request_key(
    State(state): State<AppState>,
    RequireSession(credentials): RequireSession,
    Json(request): Json<KeyRequest>,
) -> Result<Json<IssuedKey>, ApiError> {
    let session = state.session(credentials).await?;
    let issued = session.keys.submit(&session.requester, request).await?;
    Ok(Json(issued))
}

/// GET /api-keys
pub async fn list_api_keys(
    State(state): State<AppState>,
    RequireSession(credentials): RequireSession,
) -> Result<Json<KeyListResponse>, ApiError> {
    let session = state.session(credentials).await?;
    let keys = session.keys.list(&session.requester).await?;

    let now = Utc::now();
    debug!(count = keys.len(), "Listing API keys");

    Ok(Json(KeyListResponse {
        api_keys: keys.iter().map(|k| KeyListing::from_summary(k, now)).collect(),
    }))
}

/// DELETE /api-keys/{id}
pub async fn revoke_api_key(
    State(state): State<AppState>,
    RequireSession(credentials): RequireSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: ApiKeyId = id
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid API key id: {}", id)).with_param("id"))?;

    let session = state.session(credentials).await?;
    session.keys.revoke(&session.requester, id).await?;

    Ok(Json(MessageResponse::new("API key revoked")))
}
