//! In-process fakes for the auth and store seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use folio_providers::{
    AuthError, AuthProvider, AuthUser, ConnectError, Connection, Connector, DocumentName,
    DocumentStore, IdToken, StoreError,
};
use folio_types::{CollectionPath, Document, FirebaseConfig, IdentityId};

pub(crate) fn firebase_config() -> FirebaseConfig {
    FirebaseConfig::from_json_str(r#"{"apiKey":"k","projectId":"demo"}"#).unwrap()
}

pub(crate) struct FakeAuth {
    custom_ok: bool,
    anonymous_ok: bool,
    custom_calls: AtomicUsize,
    anonymous_calls: AtomicUsize,
}

impl FakeAuth {
    pub(crate) fn new(custom_ok: bool, anonymous_ok: bool) -> Self {
        Self {
            custom_ok,
            anonymous_ok,
            custom_calls: AtomicUsize::new(0),
            anonymous_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn custom_calls(&self) -> usize {
        self.custom_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn anonymous_calls(&self) -> usize {
        self.anonymous_calls.load(Ordering::SeqCst)
    }

    fn user(uid: &str, anonymous: bool) -> AuthUser {
        AuthUser {
            uid: IdentityId::new(uid),
            id_token: IdToken::new(format!("{uid}-token")),
            anonymous,
        }
    }

    fn rejected() -> AuthError {
        AuthError::Api {
            status: 400,
            message: "rejected".to_string(),
        }
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_in_anonymously(&self) -> Result<AuthUser, AuthError> {
        self.anonymous_calls.fetch_add(1, Ordering::SeqCst);
        if self.anonymous_ok {
            Ok(Self::user("anon-uid", true))
        } else {
            Err(Self::rejected())
        }
    }

    async fn sign_in_with_custom_token(&self, _token: &str) -> Result<AuthUser, AuthError> {
        self.custom_calls.fetch_add(1, Ordering::SeqCst);
        if self.custom_ok {
            Ok(Self::user("token-uid", false))
        } else {
            Err(Self::rejected())
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedWrite {
    pub(crate) token: Option<String>,
    pub(crate) collection: CollectionPath,
    pub(crate) document: Document,
}

pub(crate) struct RecordingStore {
    fail: bool,
    gate: Option<Arc<Notify>>,
    writes: Mutex<Vec<RecordedWrite>>,
}

impl RecordingStore {
    pub(crate) fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            gate: None,
            writes: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            gate: None,
            writes: Mutex::new(Vec::new()),
        })
    }

    /// Writes block until `gate` is notified.
    pub(crate) fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            gate: Some(gate),
            writes: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn append(
        &self,
        credentials: Option<&IdToken>,
        collection: &CollectionPath,
        document: Document,
    ) -> Result<DocumentName, StoreError> {
        self.writes.lock().unwrap().push(RecordedWrite {
            token: credentials.map(|t| t.expose_secret().to_string()),
            collection: collection.clone(),
            document,
        });
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(StoreError::Api {
                status: 403,
                message: "Missing or insufficient permissions.".to_string(),
            });
        }
        Ok(DocumentName::new(format!(
            "projects/demo/databases/(default)/documents/{}/fake-id",
            collection.relative()
        )))
    }
}

pub(crate) struct FakeConnector {
    connection: Option<Connection>,
    calls: AtomicUsize,
}

impl FakeConnector {
    pub(crate) fn new(auth: Arc<FakeAuth>, store: Arc<RecordingStore>) -> Self {
        Self {
            connection: Some(Connection { auth, store }),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            connection: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn connect_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Connector for FakeConnector {
    fn connect(&self, _config: &FirebaseConfig) -> Result<Connection, ConnectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.connection
            .clone()
            .ok_or(ConnectError::MissingKey("apiKey"))
    }
}
