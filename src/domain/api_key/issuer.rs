//! Upstream key issuer trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::entity::{ApiKeyId, ApiKeySummary, IssuedKey, NormalizedKeyRequest};
use crate::domain::DomainError;

/// Service that mints, lists and deletes API keys
///
/// Issuance is not idempotent: callers must not retry `issue_key`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyIssuer: Send + Sync {
    /// Mint a new key. The returned secret is only ever shown once.
    async fn issue_key(&self, request: &NormalizedKeyRequest) -> Result<IssuedKey, DomainError>;

    /// Delete a key. Returns `false` when no such key exists.
    async fn delete_key(&self, id: ApiKeyId) -> Result<bool, DomainError>;

    /// List issued keys without their secrets
    async fn list_keys(&self) -> Result<Vec<ApiKeySummary>, DomainError>;
}
