//! API key request and issued key types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upstream identifier of an issued API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(i64);

impl ApiKeyId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for ApiKeyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a key, derived from the request flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyClass {
    /// Localhost-scoped key for local development
    Development,
    /// Origin-scoped key for a deployed project
    Production,
    /// Unscoped key with no origin restriction
    Admin,
}

impl KeyClass {
    /// Class of an already issued key. Admin wins over dev when both flags are set.
    pub fn from_flags(is_dev: bool, is_admin: bool) -> Self {
        if is_admin {
            Self::Admin
        } else if is_dev {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Human readable label used by key listings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Production => "Production",
            Self::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for KeyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// A key request as submitted by a member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRequest {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub allowed_origin: Option<String>,
    #[serde(default)]
    pub is_dev: bool,
    #[serde(default)]
    pub is_admin: bool,
}

impl KeyRequest {
    /// Origin with empty strings treated as absent
    pub fn origin(&self) -> Option<&str> {
        non_empty(self.allowed_origin.as_deref())
    }
}

#[cfg(test)]
impl KeyRequest {
    pub fn production(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: Some(allowed_origin.into()),
            ..Self::default()
        }
    }

    pub fn development(allowed_origin: Option<String>) -> Self {
        Self {
            allowed_origin,
            is_dev: true,
            ..Self::default()
        }
    }

    pub fn admin() -> Self {
        Self {
            is_admin: true,
            ..Self::default()
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

/// A classified and validated request, ready to be sent upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedKeyRequest {
    pub key_class: KeyClass,
    pub project: Option<String>,
    pub allowed_origin: Option<String>,
    /// Member the key is issued to
    pub email: Option<String>,
}

impl NormalizedKeyRequest {
    /// Build the upstream request. Admin keys never carry an origin and
    /// empty strings are dropped.
    pub fn new(key_class: KeyClass, request: &KeyRequest, email: Option<String>) -> Self {
        let allowed_origin = match key_class {
            KeyClass::Admin => None,
            KeyClass::Development | KeyClass::Production => request.origin().map(String::from),
        };

        Self {
            key_class,
            project: non_empty(request.project.as_deref()).map(String::from),
            allowed_origin,
            email,
        }
    }

    pub fn is_dev(&self) -> bool {
        self.key_class.is_dev()
    }

    pub fn is_admin(&self) -> bool {
        self.key_class.is_admin()
    }
}

/// Secret value of a freshly issued key
///
/// Serializes as the plain string so it reaches the caller once, but never
/// shows up in `Debug` output.
#[derive(PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeySecret(String);

impl ApiKeySecret {
    #[cfg(test)]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret. Only for handing it to the member who requested it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKeySecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKeySecret([REDACTED])")
    }
}

impl std::fmt::Display for ApiKeySecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// A key returned by the upstream issuer, including its one-time secret
#[derive(Debug, PartialEq, Serialize)]
pub struct IssuedKey {
    pub api_key_id: ApiKeyId,
    #[serde(rename = "api_key")]
    pub secret: ApiKeySecret,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub project: Option<String>,
    pub allowed_origin: Option<String>,
    pub is_dev: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl IssuedKey {
    pub fn key_class(&self) -> KeyClass {
        KeyClass::from_flags(self.is_dev, self.is_admin)
    }
}

/// An issued key as listed by the upstream service. Has no secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeySummary {
    pub api_key_id: ApiKeyId,
    #[serde(default)]
    pub member_email: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub allowed_origin: Option<String>,
    #[serde(default)]
    pub is_dev: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiKeySummary {
    pub fn key_class(&self) -> KeyClass {
        KeyClass::from_flags(self.is_dev, self.is_admin)
    }

    pub fn display_name(&self) -> &str {
        non_empty(self.project.as_deref()).unwrap_or("Unnamed Project")
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
