//! HTTP client for the LSCS core API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::wire::{
    CommitteesResponse, EmailLookup, ErrorBody, IdLookup, KeyListResponse, RequestKeyBody,
    RequestKeyResponse,
};
use crate::config::UpstreamConfig;
use crate::domain::api_key::{ApiKeyId, ApiKeySummary, IssuedKey, KeyIssuer, NormalizedKeyRequest};
use crate::domain::{Committee, DomainError, Member, MemberDirectory, Requester, RequesterContext};

/// Name of the core API session cookie
pub const SESSION_COOKIE: &str = "session_id";

/// Credentials forwarded to the core API on every call
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionCredentials {
    session_id: Option<String>,
    bearer_token: Option<String>,
}

impl SessionCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into()).filter(|t: &String| !t.is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.session_id.is_none() && self.bearer_token.is_none()
    }

    fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(session_id) = &self.session_id {
            request = request.header(header::COOKIE, format!("{}={}", SESSION_COOKIE, session_id));
        }
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        request
    }
}

impl std::fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("session_id", &self.session_id.as_ref().map(|_| "[REDACTED]"))
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// LSCS core API client
///
/// Cheap to clone; [`LscsClient::with_credentials`] derives a client bound to
/// one caller's session.
#[derive(Debug, Clone)]
pub struct LscsClient {
    client: reqwest::Client,
    base_url: String,
    credentials: SessionCredentials,
}

impl LscsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_parts(reqwest::Client::new(), base_url.into())
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::from_parts(client, base_url.into()))
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, DomainError> {
        let client = Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))?;

        Ok(match &config.api_token {
            Some(token) => client.with_credentials(SessionCredentials::new().with_bearer(token)),
            None => client,
        })
    }

    fn from_parts(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: SessionCredentials::default(),
        }
    }

    /// Same connection pool, different caller
    pub fn with_credentials(&self, credentials: SessionCredentials) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.credentials.apply(self.client.request(method, url))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        request
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Request failed: {}", e)))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DomainError> {
        let response = self.send(request).await?;
        let response = error_for_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Failed to parse response: {}", e)))
    }

    /// Profile of the member behind the current session
    pub async fn get_me(&self) -> Result<Member, DomainError> {
        debug!("Fetching current member");
        self.send_json(self.request(Method::GET, "/auth/me")).await
    }
}

/// Turn a non-success response into a [`DomainError`], keeping the
/// upstream `{"error": ...}` message when there is one.
async fn error_for_status(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("API request failed").to_string()
            } else {
                body
            }
        });

    Err(match status {
        StatusCode::UNAUTHORIZED => DomainError::unauthorized(message),
        StatusCode::NOT_FOUND => DomainError::not_found(message),
        _ => DomainError::upstream_status(status.as_u16(), message),
    })
}

#[async_trait]
impl RequesterContext for LscsClient {
    async fn get_requester_context(&self) -> Result<Requester, DomainError> {
        Ok(self.get_me().await?.requester())
    }
}

#[async_trait]
impl KeyIssuer for LscsClient {
    async fn issue_key(&self, request: &NormalizedKeyRequest) -> Result<IssuedKey, DomainError> {
        let body = RequestKeyBody::from(request);
        let response: RequestKeyResponse = self
            .send_json(self.request(Method::POST, "/request-key").json(&body))
            .await?;

        Ok(response.into_issued(request))
    }

    async fn delete_key(&self, id: ApiKeyId) -> Result<bool, DomainError> {
        let response = self
            .send(self.request(Method::DELETE, &format!("/api-keys/{}", id)))
            .await?;

        match error_for_status(response).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_keys(&self) -> Result<Vec<ApiKeySummary>, DomainError> {
        let response: KeyListResponse = self.send_json(self.request(Method::GET, "/api-keys")).await?;
        Ok(response.into_keys())
    }
}

#[async_trait]
impl MemberDirectory for LscsClient {
    async fn find_member_by_email(&self, email: &str) -> Result<Member, DomainError> {
        let request = self
            .request(Method::POST, "/member")
            .json(&EmailLookup { email });

        self.send_json(request).await.map_err(lookup_error)
    }

    async fn find_member_by_id(&self, member_id: i64) -> Result<Member, DomainError> {
        let request = self
            .request(Method::POST, "/member-id")
            .json(&IdLookup { id: member_id });

        self.send_json(request).await.map_err(lookup_error)
    }

    async fn get_committees(&self) -> Result<Vec<Committee>, DomainError> {
        let response: CommitteesResponse =
            self.send_json(self.request(Method::GET, "/committees")).await?;
        Ok(response.committees)
    }
}

/// Lookups answer 400 for malformed identifiers; both mean "no such member"
fn lookup_error(err: DomainError) -> DomainError {
    match err {
        DomainError::Upstream {
            status: Some(400),
            message,
        } => DomainError::not_found(message),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::{KeyClass, KeyRequest};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn member_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "email": "rnd@dlsu.edu.ph",
            "full_name": "R and D",
            "committee_id": "RND",
            "position_id": "AVP"
        })
    }

    async fn client_for(server: &MockServer) -> LscsClient {
        LscsClient::new(server.uri())
            .with_credentials(SessionCredentials::new().with_session("sess-123"))
    }

    #[tokio::test]
    async fn test_get_requester_context_forwards_session_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("cookie", "session_id=sess-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(member_json()))
            .expect(1)
            .mount(&server)
            .await;

        let requester = client_for(&server).await.get_requester_context().await.unwrap();

        assert_eq!(requester, Requester::new("RND", "AVP").with_email("rnd@dlsu.edu.ph"));
    }

    #[tokio::test]
    async fn test_expired_session_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "Session expired or invalid"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_me().await.unwrap_err();

        assert!(matches!(err, DomainError::Unauthorized { ref message } if message == "Session expired or invalid"));
    }

    #[tokio::test]
    async fn test_issue_key_posts_wire_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/request-key"))
            .and(header("authorization", "Bearer google-id-token"))
            .and(body_json(serde_json::json!({
                "email": "rnd@dlsu.edu.ph",
                "project": "",
                "allowed_origin": "http://localhost:5173",
                "is_dev": true,
                "is_admin": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "email": "rnd@dlsu.edu.ph",
                "api_key": "eyJ.secret",
                "api_key_id": 15
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LscsClient::new(server.uri())
            .with_credentials(SessionCredentials::new().with_bearer("google-id-token"));
        let normalized = NormalizedKeyRequest::new(
            KeyClass::Development,
            &KeyRequest::development(Some("http://localhost:5173".into())),
            Some("rnd@dlsu.edu.ph".into()),
        );

        let issued = client.issue_key(&normalized).await.unwrap();

        assert_eq!(issued.api_key_id, ApiKeyId::new(15));
        assert_eq!(issued.secret.expose(), "eyJ.secret");
        assert!(issued.is_dev);
    }

    #[tokio::test]
    async fn test_issue_key_conflict_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/request-key"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "error": "API key for origin https://myapp.com already exists"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let normalized = NormalizedKeyRequest::new(
            KeyClass::Production,
            &KeyRequest::production("https://myapp.com"),
            None,
        );

        let err = client_for(&server).await.issue_key(&normalized).await.unwrap_err();

        match err {
            DomainError::Upstream { status, message } => {
                assert_eq!(status, Some(409));
                assert_eq!(message, "API key for origin https://myapp.com already exists");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_key_maps_not_found_to_false() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api-keys/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "API key revoked"})))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api-keys/3"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "API key not found"})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        assert!(client.delete_key(ApiKeyId::new(3)).await.unwrap());
        assert!(!client.delete_key(ApiKeyId::new(3)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_key_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api-keys/3"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).await.delete_key(ApiKeyId::new(3)).await.unwrap_err();

        assert!(matches!(err, DomainError::Upstream { status: Some(500), .. }));
    }

    #[tokio::test]
    async fn test_list_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api-keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "api_key_id": 1,
                "member_email": "rnd@dlsu.edu.ph",
                "project": "Portal",
                "allowed_origin": "https://portal.dlsu-lscs.org",
                "is_dev": false,
                "is_admin": false,
                "created_at": "2026-03-01T08:00:00Z"
            }])))
            .mount(&server)
            .await;

        let keys = client_for(&server).await.list_keys().await.unwrap();

        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].display_name(), "Portal");
    }

    #[tokio::test]
    async fn test_member_lookup_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/member"))
            .and(body_json(serde_json::json!({"email": "nobody@dlsu.edu.ph"})))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "Not an LSCS member",
                "state": "absent",
                "email": "nobody@dlsu.edu.ph"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .find_member_by_email("nobody@dlsu.edu.ph")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_member_lookup_by_id_bad_request_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/member-id"))
            .and(body_json(serde_json::json!({"id": 0})))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "Validation failed"})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.find_member_by_id(0).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_committees() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/committees"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "committees": [
                    {"committee_id": "RND", "committee_name": "Research and Development"},
                    {"committee_id": "MTD", "committee_name": "Marketing", "division_id": "EXTERNALS"}
                ]
            })))
            .mount(&server)
            .await;

        let committees = client_for(&server).await.get_committees().await.unwrap();

        assert_eq!(committees.len(), 2);
        assert_eq!(committees[1].division_id.as_deref(), Some("EXTERNALS"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = LscsClient::new("https://auth.app.dlsu-lscs.org/");
        assert_eq!(client.base_url(), "https://auth.app.dlsu-lscs.org");
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let creds = SessionCredentials::new()
            .with_session("sess-abc")
            .with_bearer("tok-xyz");

        let debug = format!("{:?}", creds);
        assert!(!debug.contains("sess-abc"));
        assert!(!debug.contains("tok-xyz"));
        assert!(!creds.is_empty());
        assert!(SessionCredentials::new().with_session("").is_empty());
    }
}
