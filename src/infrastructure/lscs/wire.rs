//! JSON bodies exchanged with the LSCS core API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::api_key::{
    ApiKeyId, ApiKeySecret, ApiKeySummary, IssuedKey, NormalizedKeyRequest,
};
use crate::domain::Committee;

/// Body of `POST /request-key`
#[derive(Debug, Serialize)]
pub(super) struct RequestKeyBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    pub project: &'a str,
    pub allowed_origin: &'a str,
    pub is_dev: bool,
    pub is_admin: bool,
}

impl<'a> From<&'a NormalizedKeyRequest> for RequestKeyBody<'a> {
    fn from(request: &'a NormalizedKeyRequest) -> Self {
        Self {
            email: request.email.as_deref(),
            project: request.project.as_deref().unwrap_or_default(),
            allowed_origin: request.allowed_origin.as_deref().unwrap_or_default(),
            is_dev: request.is_dev(),
            is_admin: request.is_admin(),
        }
    }
}

/// Response of `POST /request-key`
#[derive(Deserialize)]
pub(super) struct RequestKeyResponse {
    #[serde(default)]
    pub email: Option<String>,
    pub api_key: ApiKeySecret,
    #[serde(default)]
    pub api_key_id: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl RequestKeyResponse {
    /// Combine the upstream answer with what was asked for. The core API
    /// only echoes the email and secret back.
    pub fn into_issued(self, request: &NormalizedKeyRequest) -> IssuedKey {
        IssuedKey {
            api_key_id: ApiKeyId::new(self.api_key_id),
            secret: self.api_key,
            email: self.email.or_else(|| request.email.clone()),
            project: request.project.clone(),
            allowed_origin: request.allowed_origin.clone(),
            is_dev: request.is_dev(),
            is_admin: request.is_admin(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
            expires_at: self.expires_at,
        }
    }
}

/// `GET /api-keys` answers either a bare array or a wrapped one
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum KeyListResponse {
    Bare(Vec<ApiKeySummary>),
    Wrapped { api_keys: Vec<ApiKeySummary> },
}

impl KeyListResponse {
    pub fn into_keys(self) -> Vec<ApiKeySummary> {
        match self {
            Self::Bare(keys) => keys,
            Self::Wrapped { api_keys } => api_keys,
        }
    }
}

#[derive(Deserialize)]
pub(super) struct CommitteesResponse {
    pub committees: Vec<Committee>,
}

#[derive(Serialize)]
pub(super) struct EmailLookup<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub(super) struct IdLookup {
    pub id: i64,
}

/// Error body used by every core API endpoint
#[derive(Deserialize)]
pub(super) struct ErrorBody {
    pub error: String,
}
