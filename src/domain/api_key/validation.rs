//! Key classification and origin policy
//!
//! Both checks are pure functions over the request. They run before any
//! upstream call so a malformed request never costs a round-trip.

use thiserror::Error;
use url::Url;

use super::entity::{KeyClass, KeyRequest};

/// Prefix every development origin must start with
const DEV_ORIGIN_PREFIX: &str = "http://localhost";

const LOCALHOST: &str = "localhost";

/// Reasons a key request is rejected by policy
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicyError {
    #[error("A key cannot be both a development key and an admin key")]
    ConflictingFlags,

    #[error("allowed_origin must be empty for admin keys")]
    AdminOriginNotAllowed,

    #[error("For dev keys, allowed_origin must start with http://localhost")]
    InvalidDevOrigin,

    #[error("allowed_origin is required for production keys")]
    MissingOrigin,

    #[error("localhost is not a valid origin for production keys")]
    LocalhostNotAllowed,

    #[error("Invalid URL for allowed_origin")]
    MalformedOrigin,
}

impl KeyPolicyError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConflictingFlags => "conflicting_flags",
            Self::AdminOriginNotAllowed => "admin_origin_not_allowed",
            Self::InvalidDevOrigin => "invalid_dev_origin",
            Self::MissingOrigin => "missing_origin",
            Self::LocalhostNotAllowed => "localhost_not_allowed",
            Self::MalformedOrigin => "malformed_origin",
        }
    }
}

/// Classify a request into exactly one key class.
///
/// No flags means Production, the strictest origin policy.
pub fn classify(request: &KeyRequest) -> Result<KeyClass, KeyPolicyError> {
    match (request.is_dev, request.is_admin) {
        (true, true) => Err(KeyPolicyError::ConflictingFlags),
        (false, true) => Ok(KeyClass::Admin),
        (true, false) => Ok(KeyClass::Development),
        (false, false) => Ok(KeyClass::Production),
    }
}

/// Check the requested origin against the policy for `key_class`.
///
/// Empty strings count as no origin.
pub fn validate_origin(key_class: KeyClass, allowed_origin: Option<&str>) -> Result<(), KeyPolicyError> {
    let origin = allowed_origin.filter(|o| !o.is_empty());

    match key_class {
        KeyClass::Admin => match origin {
            Some(_) => Err(KeyPolicyError::AdminOriginNotAllowed),
            None => Ok(()),
        },
        KeyClass::Development => match origin {
            Some(o) if !o.starts_with(DEV_ORIGIN_PREFIX) => Err(KeyPolicyError::InvalidDevOrigin),
            _ => Ok(()),
        },
        KeyClass::Production => {
            let origin = origin.ok_or(KeyPolicyError::MissingOrigin)?;

            // Must run before parsing: localhost URLs parse fine.
            if origin.to_ascii_lowercase().contains(LOCALHOST) {
                return Err(KeyPolicyError::LocalhostNotAllowed);
            }

            let url = Url::parse(origin).map_err(|_| KeyPolicyError::MalformedOrigin)?;
            if url.scheme().is_empty() || !url.has_host() {
                return Err(KeyPolicyError::MalformedOrigin);
            }

            Ok(())
        }
    }
}

/// Classify and validate in one step
pub fn evaluate(request: &KeyRequest) -> Result<KeyClass, KeyPolicyError> {
    let key_class = classify(request)?;
    validate_origin(key_class, request.allowed_origin.as_deref())?;
    Ok(key_class)
}
