//! Rejections produced by the key request workflow

use thiserror::Error;

use crate::domain::api_key::{ApiKeyId, KeyPolicyError};
use crate::domain::DomainError;

/// Why a key submission, listing or revocation did not go through
#[derive(Debug, Error)]
pub enum KeyRequestError {
    /// Requester lacks the committee or position for this operation
    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    /// Request failed classification or origin policy
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] KeyPolicyError),

    /// Revocation target does not exist (or was already revoked)
    #[error("API key {0} not found")]
    NotFound(ApiKeyId),

    /// The upstream issuer failed; never retried locally
    #[error("Upstream error: {0}")]
    Upstream(#[source] DomainError),
}

impl KeyRequestError {
    /// User-facing reason, specific enough to render an actionable message
    pub fn reason(&self) -> String {
        match self {
            Self::Forbidden(message) => (*message).to_string(),
            Self::InvalidRequest(policy) => policy.to_string(),
            Self::NotFound(id) => format!("API key {} not found", id),
            Self::Upstream(DomainError::Upstream { message, .. }) => message.clone(),
            Self::Upstream(err) => err.to_string(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "forbidden",
            Self::InvalidRequest(policy) => policy.code(),
            Self::NotFound(_) => "not_found",
            Self::Upstream(_) => "upstream_error",
        }
    }
}
