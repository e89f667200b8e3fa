//! Client for the platform auth endpoints.

use std::sync::Arc;

use cargoapp_http::{HttpClient, HttpError, RequestBuilder};
use serde::Deserialize;
use thiserror::Error;

use crate::config::PlatformConfig;
use crate::permission::PermissionStore;
use crate::session::{Session, SessionStore};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no active session")]
    NoSession,

    #[error("auth endpoint returned status {0}")]
    Status(u16),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("malformed auth response: {0}")]
    Malformed(String),
}

/// The authenticated user as reported by the auth endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

/// Password sign-in, refresh and sign-out against the auth endpoints.
///
/// Owns the session and permission stores so sign-in/sign-out keep both
/// consistent. Sign-out is fail-closed: local state is cleared before the
/// network call, and a failed call only produces a warning.
pub struct AuthClient {
    http: HttpClient,
    config: PlatformConfig,
    sessions: Arc<SessionStore>,
    permissions: Arc<PermissionStore>,
}

impl AuthClient {
    pub fn new(
        http: HttpClient,
        config: PlatformConfig,
        sessions: Arc<SessionStore>,
        permissions: Arc<PermissionStore>,
    ) -> Self {
        Self {
            http,
            config,
            sessions,
            permissions,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn permissions(&self) -> &Arc<PermissionStore> {
        &self.permissions
    }

    fn with_apikey(&self, req: RequestBuilder) -> RequestBuilder {
        match self.config.anon_key() {
            Some(key) => req.header("apikey", key),
            None => req,
        }
    }

    /// Exchange email + password for a session and store it.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let url = format!("{}?grant_type=password", self.config.auth_url("token"));
        let req = self
            .http
            .post(url)
            .json(&serde_json::json!({ "email": email, "password": password }));
        let resp = self.with_apikey(req).send().await?;
        self.store_token_response(resp).await
    }

    /// Exchange the stored refresh token for a fresh session.
    pub async fn refresh_session(&self) -> Result<Session, AuthError> {
        let Some(current) = self.sessions.current() else {
            return Err(AuthError::NoSession);
        };
        let url = format!("{}?grant_type=refresh_token", self.config.auth_url("token"));
        let req = self
            .http
            .post(url)
            .json(&serde_json::json!({ "refresh_token": current.refresh_token }));
        let resp = self.with_apikey(req).send().await?;
        self.store_token_response(resp).await
    }

    /// Clear local auth state, then tell the backend.
    ///
    /// The local session and permissions are gone even if the network call
    /// fails.
    pub async fn sign_out(&self) {
        let session = self.sessions.current();
        self.sessions.clear();
        self.permissions.clear();

        if let Some(session) = session {
            let req = self
                .http
                .post(self.config.auth_url("logout"))
                .bearer_auth(&session.access_token);
            match self.with_apikey(req).send().await {
                Ok(resp) if !resp.is_success() => {
                    tracing::warn!(status = %resp.status(), "sign-out rejected by backend");
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "sign-out request failed");
                }
            }
        }
    }

    /// Fetch the authenticated user for the stored session.
    pub async fn current_user(&self) -> Result<AuthUser, AuthError> {
        let Some(session) = self.sessions.current() else {
            return Err(AuthError::NoSession);
        };
        let req = self
            .http
            .get(self.config.auth_url("user"))
            .bearer_auth(&session.access_token);
        let resp = self.with_apikey(req).send().await?;
        if !resp.is_success() {
            return Err(AuthError::Status(resp.status().as_u16()));
        }
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| AuthError::Malformed(e.to_string()))
    }

    async fn store_token_response(
        &self,
        resp: cargoapp_http::HttpResponse,
    ) -> Result<Session, AuthError> {
        let status = resp.status();
        match status.as_u16() {
            400 | 401 => return Err(AuthError::InvalidCredentials),
            _ if !status.is_success() => return Err(AuthError::Status(status.as_u16())),
            _ => {}
        }
        let text = resp.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&text).map_err(|e| AuthError::Malformed(e.to_string()))?;
        let session = Session {
            user_id: token.user.id,
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token.expires_at,
        };
        self.sessions.replace(Some(session.clone()));
        Ok(session)
    }
}
