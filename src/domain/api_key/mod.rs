//! API Key domain
//!
//! Request classification, origin policy and the issuer seam. Keys are
//! minted and stored by the upstream service; this module only decides
//! whether a request is well formed.

mod entity;
mod issuer;
mod validation;

pub use entity::{
    ApiKeyId, ApiKeySecret, ApiKeySummary, IssuedKey, KeyClass, KeyRequest, NormalizedKeyRequest,
};
#[cfg(test)]
pub use issuer::MockKeyIssuer;
pub use issuer::KeyIssuer;
pub use validation::{evaluate, KeyPolicyError};
