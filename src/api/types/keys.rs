//! Portal response bodies for key management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::api_key::{ApiKeyId, ApiKeySummary};
use crate::domain::authorization::{MANAGE_DENIED_MESSAGE, REQUEST_DENIED_MESSAGE};
use crate::domain::{KeyCapabilities, Requester};

/// What the current session may do with keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsResponse {
    pub can_request_key: bool,
    pub can_manage_keys: bool,
    pub committee_id: Option<String>,
    pub position_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_denied_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_denied_reason: Option<String>,
}

impl From<&Requester> for PermissionsResponse {
    fn from(requester: &Requester) -> Self {
        let capabilities = KeyCapabilities::of(requester);

        Self {
            can_request_key: capabilities.can_request_key,
            can_manage_keys: capabilities.can_manage_keys,
            committee_id: requester.committee_id.clone(),
            position_id: requester.position_id.clone(),
            request_denied_reason: (!capabilities.can_request_key)
                .then(|| REQUEST_DENIED_MESSAGE.to_string()),
            manage_denied_reason: (!capabilities.can_manage_keys)
                .then(|| MANAGE_DENIED_MESSAGE.to_string()),
        }
    }
}

/// One row of the key management table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyListing {
    pub api_key_id: ApiKeyId,
    pub name: String,
    pub key_type: String,
    pub member_email: String,
    pub allowed_origin: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub expired: bool,
}

impl KeyListing {
    pub fn from_summary(summary: &ApiKeySummary, now: DateTime<Utc>) -> Self {
        Self {
            api_key_id: summary.api_key_id,
            name: summary.display_name().to_string(),
            key_type: summary.key_class().label().to_string(),
            member_email: summary.member_email.clone(),
            allowed_origin: summary.allowed_origin.clone(),
            created_at: summary.created_at,
            expires_at: summary.expires_at,
            expired: summary.is_expired_at(now),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyListResponse {
    pub api_keys: Vec<KeyListing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
