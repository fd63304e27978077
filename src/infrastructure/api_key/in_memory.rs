//! In-memory key issuer used by the service tests
//!
//! Only summaries are stored; secrets are handed out and forgotten.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::api_key::{
    ApiKeyId, ApiKeySecret, ApiKeySummary, IssuedKey, KeyClass, KeyIssuer, NormalizedKeyRequest,
};
use crate::domain::DomainError;

const SECRET_PREFIX: &str = "lscs_local_";

/// In-memory implementation of [`KeyIssuer`]
#[derive(Debug)]
pub struct InMemoryKeyIssuer {
    keys: Arc<RwLock<BTreeMap<ApiKeyId, ApiKeySummary>>>,
    next_id: AtomicI64,
}

impl InMemoryKeyIssuer {
    /// Create an empty issuer
    pub fn new() -> Self {
        Self {
            keys: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    fn generate_secret() -> ApiKeySecret {
        ApiKeySecret::new(format!("{}{}", SECRET_PREFIX, uuid::Uuid::new_v4().simple()))
    }
}

impl Default for InMemoryKeyIssuer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyIssuer for InMemoryKeyIssuer {
    async fn issue_key(&self, request: &NormalizedKeyRequest) -> Result<IssuedKey, DomainError> {
        let mut keys = self.keys.write().await;

        // Production origins are unique across keys, as on the core API.
        if request.key_class == KeyClass::Production {
            if let Some(origin) = &request.allowed_origin {
                let taken = keys
                    .values()
                    .any(|k| k.key_class() == KeyClass::Production && k.allowed_origin.as_ref() == Some(origin));
                if taken {
                    return Err(DomainError::upstream_status(
                        409,
                        format!("API key for origin {} already exists", origin),
                    ));
                }
            }
        }

        let id = ApiKeyId::new(self.next_id.fetch_add(1, Ordering::SeqCst));

        let issued = IssuedKey {
            api_key_id: id,
            secret: Self::generate_secret(),
            email: request.email.clone(),
            project: request.project.clone(),
            allowed_origin: request.allowed_origin.clone(),
            is_dev: request.is_dev(),
            is_admin: request.is_admin(),
            created_at: Utc::now(),
            expires_at: None,
        };

        keys.insert(id, summarize(&issued));

        Ok(issued)
    }

    async fn delete_key(&self, id: ApiKeyId) -> Result<bool, DomainError> {
        let mut keys = self.keys.write().await;
        Ok(keys.remove(&id).is_some())
    }

    async fn list_keys(&self) -> Result<Vec<ApiKeySummary>, DomainError> {
        let keys = self.keys.read().await;
        Ok(keys.values().cloned().collect())
    }
}

fn summarize(issued: &IssuedKey) -> ApiKeySummary {
    ApiKeySummary {
        api_key_id: issued.api_key_id,
        member_email: issued.email.clone().unwrap_or_default(),
        project: issued.project.clone(),
        allowed_origin: issued.allowed_origin.clone(),
        is_dev: issued.is_dev,
        is_admin: issued.is_admin,
        created_at: issued.created_at,
        expires_at: issued.expires_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::KeyRequest;

    fn production(origin: &str) -> NormalizedKeyRequest {
        NormalizedKeyRequest::new(KeyClass::Production, &KeyRequest::production(origin), None)
    }

    #[tokio::test]
    async fn test_issue_and_list() {
        let issuer = InMemoryKeyIssuer::new();

        let first = issuer.issue_key(&production("https://a.example.com")).await.unwrap();
        let second = issuer.issue_key(&production("https://b.example.com")).await.unwrap();

        assert_ne!(first.api_key_id, second.api_key_id);
        assert!(first.secret.expose().starts_with(SECRET_PREFIX));
        assert_ne!(first.secret, second.secret);

        let listed = issuer.list_keys().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].api_key_id, first.api_key_id);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let issuer = InMemoryKeyIssuer::new();
        let issued = issuer.issue_key(&production("https://a.example.com")).await.unwrap();

        assert!(issuer.delete_key(issued.api_key_id).await.unwrap());
        assert!(!issuer.delete_key(issued.api_key_id).await.unwrap());
        assert!(issuer.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_production_origin_conflicts() {
        let issuer = InMemoryKeyIssuer::new();
        issuer.issue_key(&production("https://a.example.com")).await.unwrap();

        let err = issuer
            .issue_key(&production("https://a.example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Upstream { status: Some(409), .. }));
    }
}
