//! Domain layer - Key request policy and member types

pub mod api_key;
pub mod authorization;
pub mod error;
pub mod member;

pub use api_key::{
    ApiKeyId, ApiKeySecret, ApiKeySummary, IssuedKey, KeyClass, KeyIssuer, KeyPolicyError,
    KeyRequest, NormalizedKeyRequest,
};
pub use authorization::{can_manage_keys, can_request_key, KeyCapabilities};
pub use error::DomainError;
pub use member::{Committee, Member, MemberDirectory, Position, Requester, RequesterContext};
