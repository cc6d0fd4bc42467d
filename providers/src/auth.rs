//! Identity Toolkit v1 client.
//!
//! Anonymous sign-in returns `localId` directly. Custom-token sign-in does
//! not, so the uid is read from the `user_id` (or `sub`) claim of the
//! returned ID token.

use std::fmt;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use folio_types::IdentityId;

use crate::{api_failure, parse_url};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("auth service rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("malformed auth response: {0}")]
    MalformedResponse(String),
}

/// Short-lived Firebase ID token, sent as a bearer credential to Firestore.
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken(String);

impl IdToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// The `user_id` claim, falling back to `sub`. The signature is not
    /// checked; the token came straight from the auth service.
    fn uid_claim(&self) -> Result<String, AuthError> {
        let payload = self
            .0
            .split('.')
            .nth(1)
            .ok_or_else(|| AuthError::MalformedResponse("idToken is not a JWT".to_string()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::MalformedResponse(format!("idToken payload: {e}")))?;
        let claims: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::MalformedResponse(format!("idToken claims: {e}")))?;
        ["user_id", "sub"]
            .iter()
            .find_map(|claim| claims.get(*claim).and_then(|v| v.as_str()))
            .filter(|uid| !uid.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AuthError::MalformedResponse("idToken has no uid claim".to_string()))
    }
}

impl fmt::Debug for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdToken(<redacted>)")
    }
}

/// A signed-in principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: IdentityId,
    pub id_token: IdToken,
    pub anonymous: bool,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_anonymously(&self) -> Result<AuthUser, AuthError>;
    async fn sign_in_with_custom_token(&self, token: &str) -> Result<AuthUser, AuthError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    id_token: String,
    local_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomTokenResponse {
    id_token: String,
}

#[derive(Clone)]
pub struct IdentityToolkitAuth {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for IdentityToolkitAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityToolkitAuth")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl IdentityToolkitAuth {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn method_url(&self, method: &str) -> Result<reqwest::Url, AuthError> {
        let mut url = parse_url(&format!("{}/v1/accounts:{method}", self.base_url))
            .map_err(AuthError::MalformedResponse)?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn post<T>(&self, method: &str, body: serde_json::Value) -> Result<T, AuthError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method)?)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, message) = api_failure(response).await;
            return Err(AuthError::Api { status, message });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| AuthError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl AuthProvider for IdentityToolkitAuth {
    async fn sign_in_anonymously(&self) -> Result<AuthUser, AuthError> {
        let response: SignUpResponse = self
            .post("signUp", json!({ "returnSecureToken": true }))
            .await?;
        if response.local_id.is_empty() {
            return Err(AuthError::MalformedResponse("empty localId".to_string()));
        }
        Ok(AuthUser {
            uid: IdentityId::new(response.local_id),
            id_token: IdToken::new(response.id_token),
            anonymous: true,
        })
    }

    async fn sign_in_with_custom_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        let response: CustomTokenResponse = self
            .post(
                "signInWithCustomToken",
                json!({ "token": token, "returnSecureToken": true }),
            )
            .await?;
        let id_token = IdToken::new(response.id_token);
        let uid = id_token.uid_claim()?;
        Ok(AuthUser {
            uid: IdentityId::new(uid),
            id_token,
            anonymous: false,
        })
    }
}
