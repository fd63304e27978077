//! Member lookups served by the core API

use async_trait::async_trait;

use super::entity::{Committee, Member, Requester};
use crate::domain::DomainError;

/// Source of the current caller's role snapshot
#[async_trait]
pub trait RequesterContext: Send + Sync {
    async fn get_requester_context(&self) -> Result<Requester, DomainError>;
}

/// Read-only member directory
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn find_member_by_email(&self, email: &str) -> Result<Member, DomainError>;

    /// Lookup by DLSU ID number
    async fn find_member_by_id(&self, member_id: i64) -> Result<Member, DomainError>;

    async fn get_committees(&self) -> Result<Vec<Committee>, DomainError>;
}
