//! Hosted authentication (Supabase GoTrue REST API).
//!
//! The server never stores credentials or sessions itself: the access token handed out
//! by the provider is kept in the browser's session cookie and looked up again on every
//! gated request.

use super::ClientError;
use async_trait::async_trait;
use common::model::session::SessionUser;
use common::requests::Credentials;
use reqwest::StatusCode;
use serde::Deserialize;

/// Result of a successful sign-up or sign-in.
///
/// `access_token` is `None` when the provider created the account but still expects an
/// email confirmation before issuing a session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: SessionUser,
    pub access_token: Option<String>,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, ClientError>;
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, ClientError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), ClientError>;
    /// `Ok(None)` when the token is unknown or expired.
    async fn get_user(&self, access_token: &str) -> Result<Option<SessionUser>, ClientError>;
}

pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(http: reqwest::Client, supabase_url: &str, anon_key: String) -> Self {
        Self {
            http,
            base_url: format!("{}/auth/v1", supabase_url.trim_end_matches('/')),
            anon_key,
        }
    }

    async fn password_call(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<AuthSession, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            let body: ProviderError = response.json().await.unwrap_or_default();
            return Err(ClientError::Rejected(body.into_message()));
        }
        if !status.is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let body: TokenResponse = response.json().await?;
        body.into_session()
            .ok_or_else(|| ClientError::Rejected("Resposta de autenticação sem usuário.".to_string()))
    }
}

/// Either a full session (`access_token` + `user`) or, for sign-ups awaiting
/// confirmation, the bare user object.
#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<SessionUser>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl TokenResponse {
    fn into_session(self) -> Option<AuthSession> {
        let user = match (self.user, self.id) {
            (Some(user), _) => user,
            (None, Some(id)) => SessionUser {
                id,
                email: self.email,
            },
            (None, None) => return None,
        };
        Some(AuthSession {
            user,
            access_token: self.access_token,
        })
    }
}

/// The provider has used several error shapes across versions.
#[derive(Deserialize, Default)]
struct ProviderError {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl ProviderError {
    fn into_message(self) -> String {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .unwrap_or_else(|| "Falha na autenticação.".to_string())
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        self.password_call("/signup", credentials).await
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        self.password_call("/token?grant_type=password", credentials)
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        // An already expired token has nothing left to revoke.
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<SessionUser>, ClientError> {
        let response = self
            .http
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(ClientError::from_response(response).await),
        }
    }
}
