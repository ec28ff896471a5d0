//! Login against the platform API and hand the result to the session slots.
//!
//! The API issues `{token, user}` for valid credentials. Normal and elevated
//! logins use separate endpoints; which one is called follows the
//! [`LoginTarget`] of the page doing the login.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::error::SessionError;
use crate::session::{LoginGate, LoginTarget, SessionAccessor, SessionStore};
use crate::types::UserRecord;

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token and user issued by a successful login
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginSession {
    pub token: String,
    pub user: UserRecord,
}

#[async_trait]
pub trait LoginClient {
    async fn login(&self, target: LoginTarget, credentials: &Credentials) -> Result<LoginSession, SessionError>;
}

// Some deployments wrap the payload as {success, data}
#[derive(Deserialize)]
#[serde(untagged)]
enum LoginResponse {
    Enveloped { data: LoginSession },
    Bare(LoginSession),
}

pub struct HttpLoginClient {
    http: reqwest::Client,
    normal_url: Url,
    elevated_url: Url,
}

impl HttpLoginClient {
    pub fn new(api: &ApiConfig) -> Result<Self, SessionError> {
        let base = Url::parse(&api.base_url)
            .map_err(|e| SessionError::config(format!("invalid API base URL '{}': {}", api.base_url, e)))?;
        let normal_url = join_path(&base, &api.normal_login_path)?;
        let elevated_url = join_path(&base, &api.elevated_login_path)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .build()
            .map_err(|e| SessionError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            normal_url,
            elevated_url,
        })
    }

    pub fn endpoint(&self, target: LoginTarget) -> &Url {
        match target {
            LoginTarget::Normal => &self.normal_url,
            LoginTarget::Elevated => &self.elevated_url,
        }
    }
}

fn join_path(base: &Url, path: &str) -> Result<Url, SessionError> {
    base.join(path)
        .map_err(|e| SessionError::config(format!("invalid login path '{}': {}", path, e)))
}

/// Pulls a human-readable message out of an error body
fn rejection_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for field in ["message", "error"] {
            if let Some(message) = value.get(field).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl LoginClient for HttpLoginClient {
    async fn login(&self, target: LoginTarget, credentials: &Credentials) -> Result<LoginSession, SessionError> {
        let url = self.endpoint(target).clone();
        tracing::debug!("POST {} for {}", url, credentials.email);

        let response = self.http.post(url).json(credentials).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SessionError::LoginRejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        let session = match serde_json::from_str::<LoginResponse>(&body) {
            Ok(LoginResponse::Enveloped { data }) => data,
            Ok(LoginResponse::Bare(session)) => session,
            Err(e) => return Err(SessionError::invalid_response(e.to_string())),
        };
        if session.token.trim().is_empty() {
            return Err(SessionError::invalid_response("login response carried an empty token"));
        }
        Ok(session)
    }
}

/// Runs a login page end to end: conflict gate, API login, slot write.
///
/// A blocked gate fails with [`SessionError::Conflict`] unless
/// `resolve_conflict` confirms the warning, which clears the blocking slot.
pub async fn sign_in<S, C>(
    accessor: &mut SessionAccessor<S>,
    client: &C,
    target: LoginTarget,
    credentials: &Credentials,
    resolve_conflict: bool,
) -> Result<UserRecord, SessionError>
where
    S: SessionStore,
    C: LoginClient + ?Sized,
{
    let mut gate = LoginGate::new(target);
    gate.evaluate(accessor)?;

    if let Some(warning) = gate.warning() {
        if !resolve_conflict {
            return Err(SessionError::Conflict(warning.conflict_type));
        }
        gate.resolve(accessor)?;
    }

    let session = client.login(target, credentials).await?;

    match target {
        LoginTarget::Normal => accessor.store_normal_session(&session.token, &session.user)?,
        LoginTarget::Elevated => accessor.store_elevated_session(&session.token, &session.user)?,
    }
    Ok(session.user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::session::MemoryStore;
    use crate::testing::{elevated_store, normal_store, test_user, FailingSetStore};
    use crate::types::{Role, SessionType};
    use std::sync::Mutex;

    /// Canned login client that records which targets were called
    struct StubClient {
        role: Role,
        calls: Mutex<Vec<LoginTarget>>,
    }

    impl StubClient {
        fn new(role: Role) -> Self {
            Self {
                role,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LoginClient for StubClient {
        async fn login(&self, target: LoginTarget, _credentials: &Credentials) -> Result<LoginSession, SessionError> {
            self.calls.lock().unwrap().push(target);
            Ok(LoginSession {
                token: "issued".to_string(),
                user: test_user(self.role),
            })
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_rejection_message_prefers_message_field() {
        assert_eq!(rejection_message(r#"{"message":"Bad password"}"#), "Bad password");
        assert_eq!(rejection_message(r#"{"error":"Locked"}"#), "Locked");
        assert_eq!(rejection_message("Gateway Timeout"), "Gateway Timeout");
        assert_eq!(rejection_message(""), "no response body");
    }

    #[test]
    fn test_login_response_accepts_both_shapes() {
        let bare: LoginResponse =
            serde_json::from_str(r#"{"token":"t","user":{"role":"Student"}}"#).unwrap();
        assert!(matches!(bare, LoginResponse::Bare(_)));

        let enveloped: LoginResponse = serde_json::from_str(
            r#"{"success":true,"data":{"token":"t","user":{"role":"Super Admin"}}}"#,
        )
        .unwrap();
        assert!(matches!(enveloped, LoginResponse::Enveloped { .. }));
    }

    #[test]
    fn test_endpoints_follow_config() {
        let mut api = AppConfig::from_env().api;
        api.base_url = "http://127.0.0.1:9000".to_string();
        api.normal_login_path = "/api/auth/login".to_string();
        api.elevated_login_path = "/api/app-admin/login".to_string();

        let client = HttpLoginClient::new(&api).unwrap();
        assert_eq!(
            client.endpoint(LoginTarget::Elevated).as_str(),
            "http://127.0.0.1:9000/api/app-admin/login"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let mut api = AppConfig::from_env().api;
        api.base_url = "not a url".to_string();
        assert!(matches!(HttpLoginClient::new(&api), Err(SessionError::Config(_))));
    }

    #[tokio::test]
    async fn test_sign_in_stores_normal_session() {
        let mut accessor = SessionAccessor::new(MemoryStore::new());
        let client = StubClient::new(Role::Student);

        let user = sign_in(&mut accessor, &client, LoginTarget::Normal, &credentials(), false)
            .await
            .unwrap();

        assert_eq!(user.role, Role::Student);
        assert_eq!(accessor.current_session_type(), Some(SessionType::NormalUser));
    }

    #[tokio::test]
    async fn test_sign_in_blocked_by_conflict() {
        let mut accessor = SessionAccessor::new(elevated_store(Role::SuperAdmin));
        let client = StubClient::new(Role::Student);

        let err = sign_in(&mut accessor, &client, LoginTarget::Normal, &credentials(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Conflict(SessionType::SuperAdmin)));
        assert!(client.calls.lock().unwrap().is_empty());
        assert!(accessor.has_elevated_session());
    }

    #[tokio::test]
    async fn test_sign_in_resolves_conflict_when_confirmed() {
        let mut accessor = SessionAccessor::new(normal_store(Role::Instructor));
        let client = StubClient::new(Role::SuperModerator);

        sign_in(&mut accessor, &client, LoginTarget::Elevated, &credentials(), true)
            .await
            .unwrap();

        assert!(!accessor.has_normal_user_session());
        assert_eq!(accessor.current_session_type(), Some(SessionType::SuperModerator));
        assert_eq!(*client.calls.lock().unwrap(), vec![LoginTarget::Elevated]);
    }

    #[tokio::test]
    async fn test_elevated_sign_in_refuses_normal_role() {
        let mut accessor = SessionAccessor::new(MemoryStore::new());
        let client = StubClient::new(Role::Admin);

        let err = sign_in(&mut accessor, &client, LoginTarget::Elevated, &credentials(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::RoleNotElevated { .. }));
        assert!(accessor.store().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_storage_failure_drops_previous_session() {
        let store = FailingSetStore::new(elevated_store(Role::SuperModerator), 1);
        let mut accessor = SessionAccessor::new(store);
        let client = StubClient::new(Role::SuperAdmin);

        let err = sign_in(&mut accessor, &client, LoginTarget::Elevated, &credentials(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Storage(_)));
        assert_eq!(accessor.current_session_type(), None);
    }
}
