//! Key request service
//!
//! Runs a submission through the authorization gate, the classifier and the
//! origin policy before the single upstream call. Revocation and listing go
//! through the management gate first.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::api_key::{
    evaluate, ApiKeyId, ApiKeySummary, IssuedKey, KeyIssuer, KeyRequest,
    NormalizedKeyRequest,
};
use crate::domain::authorization::{
    can_manage_keys, can_request_key, MANAGE_DENIED_MESSAGE, REQUEST_DENIED_MESSAGE,
};
use crate::domain::Requester;

use super::error::KeyRequestError;

/// Key request service backed by a [`KeyIssuer`]
#[derive(Debug)]
pub struct KeyRequestService<I>
where
    I: KeyIssuer + ?Sized,
{
    issuer: Arc<I>,
}

impl<I: KeyIssuer + ?Sized> Clone for KeyRequestService<I> {
    fn clone(&self) -> Self {
        Self {
            issuer: Arc::clone(&self.issuer),
        }
    }
}

impl<I: KeyIssuer + ?Sized> KeyRequestService<I> {
    /// Create a new key request service
    pub fn new(issuer: Arc<I>) -> Self {
        Self { issuer }
    }

    /// Submit a key request on behalf of `requester`.
    ///
    /// The returned key holds the only copy of its secret.
    pub async fn submit(
        &self,
        requester: &Requester,
        request: KeyRequest,
    ) -> Result<IssuedKey, KeyRequestError> {
        if !can_request_key(requester) {
            warn!(
                committee = ?requester.committee_id,
                position = ?requester.position_id,
                "Key request denied: requester is not RND AVP or higher"
            );
            return Err(KeyRequestError::Forbidden(REQUEST_DENIED_MESSAGE));
        }

        let key_class = evaluate(&request)?;

        let normalized = NormalizedKeyRequest::new(key_class, &request, requester.email.clone());

        info!(
            key_class = %key_class,
            project = ?normalized.project,
            allowed_origin = ?normalized.allowed_origin,
            "Submitting API key request"
        );

        let issued = self
            .issuer
            .issue_key(&normalized)
            .await
            .map_err(|e| {
                warn!(error = %e, "Upstream key issuance failed");
                KeyRequestError::Upstream(e)
            })?;

        info!(
            api_key_id = %issued.api_key_id,
            key_class = %issued.key_class(),
            "API key issued"
        );

        Ok(issued)
    }

    /// Revoke a key. Callers must drop any cached key listing on success.
    pub async fn revoke(&self, requester: &Requester, id: ApiKeyId) -> Result<(), KeyRequestError> {
        if !can_manage_keys(requester) {
            warn!(
                committee = ?requester.committee_id,
                api_key_id = %id,
                "Key revocation denied: requester is not RND"
            );
            return Err(KeyRequestError::Forbidden(MANAGE_DENIED_MESSAGE));
        }

        info!(api_key_id = %id, "Revoking API key");

        match self.issuer.delete_key(id).await {
            Ok(true) => {
                info!(api_key_id = %id, "API key revoked");
                Ok(())
            }
            Ok(false) => {
                debug!(api_key_id = %id, "API key already gone");
                Err(KeyRequestError::NotFound(id))
            }
            Err(e) if e.is_not_found() => Err(KeyRequestError::NotFound(id)),
            Err(e) => {
                warn!(api_key_id = %id, error = %e, "Upstream key revocation failed");
                Err(KeyRequestError::Upstream(e))
            }
        }
    }

    /// List issued keys, secrets omitted
    pub async fn list(&self, requester: &Requester) -> Result<Vec<ApiKeySummary>, KeyRequestError> {
        if !can_manage_keys(requester) {
            return Err(KeyRequestError::Forbidden(MANAGE_DENIED_MESSAGE));
        }

        self.issuer
            .list_keys()
            .await
            .map_err(KeyRequestError::Upstream)
    }
}
