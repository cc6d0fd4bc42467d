//! Firebase REST clients for the contact flow.
//!
//! # Architecture
//!
//! - [`auth`] - Identity Toolkit v1 (`accounts:signUp`, `accounts:signInWithCustomToken`)
//! - [`firestore`] - Firestore v1 `documents:commit` for append-only writes
//!
//! Both sit behind traits ([`AuthProvider`], [`DocumentStore`]) so the engine
//! can be driven by fakes in tests. [`FirebaseConnector`] turns the
//! environment-supplied web configuration into a [`Connection`] holding one
//! client of each kind.
//!
//! # Errors
//!
//! Non-2xx responses are read (capped) and the `{"error": {"message": ...}}`
//! body Firebase returns is surfaced as the error message. No request is
//! retried.

pub mod auth;
pub mod firestore;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use folio_types::FirebaseConfig;

pub use auth::{AuthError, AuthProvider, AuthUser, IdToken, IdentityToolkitAuth};
pub use firestore::{DocumentName, DocumentStore, FirestoreStore, StoreError};
pub use folio_types;

/// Canonical Identity Toolkit base URL.
pub const IDENTITY_TOOLKIT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
/// Canonical Firestore base URL.
pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Base URLs for the two Firebase services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseEndpoints {
    pub auth: String,
    pub firestore: String,
}

impl Default for FirebaseEndpoints {
    fn default() -> Self {
        Self {
            auth: IDENTITY_TOOLKIT_BASE_URL.to_string(),
            firestore: FIRESTORE_BASE_URL.to_string(),
        }
    }
}

impl FirebaseEndpoints {
    /// Canonical endpoints with optional per-service overrides.
    #[must_use]
    pub fn with_overrides(auth: Option<&str>, firestore: Option<&str>) -> Self {
        let defaults = Self::default();
        let pick = |value: Option<&str>, default: String| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map_or(default, |v| v.trim_end_matches('/').to_string())
        };
        Self {
            auth: pick(auth, defaults.auth),
            firestore: pick(firestore, defaults.firestore),
        }
    }

    /// Plain HTTP is only allowed when an endpoint asks for it (local emulators).
    #[must_use]
    pub fn requires_plain_http(&self) -> bool {
        self.auth.starts_with("http://") || self.firestore.starts_with("http://")
    }
}

fn client_builder(allow_http: bool) -> reqwest::ClientBuilder {
    use reqwest::header::{HeaderMap, HeaderValue};

    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        "X-Client-Version",
        HeaderValue::from_static(concat!("folio/", env!("CARGO_PKG_VERSION"))),
    );

    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .https_only(!allow_http)
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
        .default_headers(default_headers)
}

pub fn http_client(allow_http: bool) -> Result<reqwest::Client, reqwest::Error> {
    client_builder(allow_http).build()
}

/// Read at most 32 KiB of an error response body.
pub async fn read_capped_error_body(mut response: reqwest::Response) -> String {
    let mut body = Vec::new();
    while let Ok(Some(chunk)) = response.chunk().await {
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

/// Pull the human-readable message out of a Firebase/Google API error body.
#[must_use]
pub fn extract_error_message(body: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    payload
        .pointer("/error/message")
        .and_then(|value| value.as_str())
        .or_else(|| payload.pointer("/message").and_then(|value| value.as_str()))
        .or_else(|| payload.as_str())
        .map(ToString::to_string)
}

/// Status plus best-effort message for a failed response.
pub(crate) async fn api_failure(response: reqwest::Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = read_capped_error_body(response).await;
    let message = extract_error_message(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body.trim().to_string()
        }
    });
    (status, message)
}

pub(crate) fn parse_url(raw: &str) -> Result<reqwest::Url, String> {
    reqwest::Url::parse(raw).map_err(|e| e.to_string())
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("firebase config is missing `{0}`")]
    MissingKey(&'static str),
    #[error("invalid {service} endpoint {url:?}: {reason}")]
    InvalidEndpoint {
        service: &'static str,
        url: String,
        reason: String,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// One auth client and one store client sharing a configuration.
#[derive(Clone)]
pub struct Connection {
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<dyn DocumentStore>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

/// Builds service clients from the web configuration.
///
/// A failure here is the "initialization exception" of the bootstrap: the
/// session still becomes ready, just without identity or store.
pub trait Connector: Send + Sync {
    fn connect(&self, config: &FirebaseConfig) -> Result<Connection, ConnectError>;
}

#[derive(Debug, Clone, Default)]
pub struct FirebaseConnector {
    endpoints: FirebaseEndpoints,
}

impl FirebaseConnector {
    #[must_use]
    pub fn new(endpoints: FirebaseEndpoints) -> Self {
        Self { endpoints }
    }

    #[must_use]
    pub fn endpoints(&self) -> &FirebaseEndpoints {
        &self.endpoints
    }
}

impl Connector for FirebaseConnector {
    fn connect(&self, config: &FirebaseConfig) -> Result<Connection, ConnectError> {
        let api_key = config.api_key().ok_or(ConnectError::MissingKey("apiKey"))?;
        let project_id = config
            .project_id()
            .ok_or(ConnectError::MissingKey("projectId"))?;

        let auth_base = parse_url(&self.endpoints.auth).map_err(|reason| {
            ConnectError::InvalidEndpoint {
                service: "auth",
                url: self.endpoints.auth.clone(),
                reason,
            }
        })?;
        let firestore_base = parse_url(&self.endpoints.firestore).map_err(|reason| {
            ConnectError::InvalidEndpoint {
                service: "firestore",
                url: self.endpoints.firestore.clone(),
                reason,
            }
        })?;

        let client = http_client(self.endpoints.requires_plain_http())?;
        tracing::debug!(
            project_id,
            auth = %auth_base,
            firestore = %firestore_base,
            "Connecting to Firebase"
        );

        Ok(Connection {
            auth: Arc::new(IdentityToolkitAuth::new(
                client.clone(),
                &self.endpoints.auth,
                api_key,
            )),
            store: Arc::new(FirestoreStore::new(
                client,
                &self.endpoints.firestore,
                project_id,
            )),
        })
    }
}
