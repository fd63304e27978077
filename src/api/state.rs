//! Application state shared by the portal handlers

use std::sync::Arc;

use crate::domain::{DomainError, Requester, RequesterContext};
use crate::infrastructure::api_key::KeyRequestService;
use crate::infrastructure::lscs::{LscsClient, SessionCredentials};

/// Application state. Holds no per-user data; every handler derives a
/// session-bound client from the caller's credentials.
#[derive(Debug, Clone)]
pub struct AppState {
    pub lscs: LscsClient,
}

impl AppState {
    pub fn new(lscs: LscsClient) -> Self {
        Self { lscs }
    }

    /// Everything a handler needs to act for one caller
    pub async fn session(&self, credentials: SessionCredentials) -> Result<SessionContext, DomainError> {
        let client = self.lscs.with_credentials(credentials);
        let requester = client.get_requester_context().await?;

        Ok(SessionContext {
            requester,
            keys: KeyRequestService::new(Arc::new(client)),
        })
    }
}

/// Caller snapshot plus a key service talking to the core API as that caller
pub struct SessionContext {
    pub requester: Requester,
    pub keys: KeyRequestService<LscsClient>,
}
