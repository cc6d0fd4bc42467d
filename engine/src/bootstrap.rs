//! Identity bootstrap: one connection and one sign-in attempt per process.
//!
//! The result is published once through a `watch` channel as an immutable
//! [`Session`]. Consumers never see a ready session go back to pending.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use folio_providers::{AuthProvider, AuthUser, Connector, DocumentStore};
use folio_types::{AppId, FirebaseConfig, IdentityId, SessionIdentity};

/// Everything the hosting environment hands to the bootstrap.
#[derive(Debug, Clone, Default)]
pub struct BootstrapInput {
    pub firebase: FirebaseConfig,
    pub initial_auth_token: Option<String>,
    pub app_id: AppId,
}

/// Outcome of the bootstrap. Read-only once published.
pub struct Session {
    identity: Option<AuthUser>,
    store: Option<Arc<dyn DocumentStore>>,
    app_id: AppId,
}

impl Session {
    /// No identity and no store: empty config or failed initialization.
    #[must_use]
    pub fn degraded(app_id: AppId) -> Self {
        Self {
            identity: None,
            store: None,
            app_id,
        }
    }

    #[must_use]
    pub fn new(
        identity: Option<AuthUser>,
        store: Option<Arc<dyn DocumentStore>>,
        app_id: AppId,
    ) -> Self {
        Self {
            identity,
            store,
            app_id,
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&AuthUser> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn identity_id(&self) -> Option<&IdentityId> {
        self.identity.as_ref().map(|user| &user.uid)
    }

    #[must_use]
    pub fn store(&self) -> Option<&Arc<dyn DocumentStore>> {
        self.store.as_ref()
    }

    #[must_use]
    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("has_store", &self.store.is_some())
            .field("app_id", &self.app_id)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Pending,
    Ready(Arc<Session>),
}

impl SessionState {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&Arc<Session>> {
        match self {
            Self::Pending => None,
            Self::Ready(session) => Some(session),
        }
    }

    /// The `{identityId, isReady}` view of this state.
    #[must_use]
    pub fn identity(&self) -> SessionIdentity {
        match self {
            Self::Pending => SessionIdentity::pending(),
            Self::Ready(session) => SessionIdentity::ready(session.identity_id().cloned()),
        }
    }
}

/// Receiving side of the bootstrap result.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// A handle that is already resolved.
    #[must_use]
    pub fn ready(session: Session) -> Self {
        let (_tx, rx) = watch::channel(SessionState::Ready(Arc::new(session)));
        Self { rx }
    }

    /// A handle with no bootstrap behind it. Stays pending forever.
    #[must_use]
    pub fn pending() -> Self {
        let (_tx, rx) = watch::channel(SessionState::Pending);
        Self { rx }
    }

    #[must_use]
    pub fn current(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    /// Wait until the bootstrap publishes. Returns `None` if the bootstrap
    /// task died without publishing.
    pub async fn wait_ready(&mut self) -> Option<Arc<Session>> {
        let state = self.rx.wait_for(SessionState::is_ready).await.ok()?;
        state.session().cloned()
    }
}

/// Consumed on use, so a process can only run it once.
pub struct IdentityBootstrap {
    input: BootstrapInput,
    connector: Arc<dyn Connector>,
}

impl IdentityBootstrap {
    #[must_use]
    pub fn new(input: BootstrapInput, connector: Arc<dyn Connector>) -> Self {
        Self { input, connector }
    }

    /// Start the bootstrap on the current tokio runtime.
    ///
    /// Empty configuration and connection failures resolve before this
    /// returns; only the sign-in itself runs in the background.
    #[must_use]
    pub fn spawn(self) -> SessionHandle {
        let Self { input, connector } = self;

        let pending = match prepare(input, connector.as_ref()) {
            Prepared::Done(session) => return SessionHandle::ready(session),
            Prepared::SignIn(pending) => pending,
        };

        let (tx, rx) = watch::channel(SessionState::Pending);
        tokio::spawn(async move {
            let session = pending.sign_in().await;
            let _ = tx.send(SessionState::Ready(Arc::new(session)));
        });
        SessionHandle { rx }
    }

    /// Run the whole bootstrap inline.
    pub async fn run(self) -> Session {
        match prepare(self.input, self.connector.as_ref()) {
            Prepared::Done(session) => session,
            Prepared::SignIn(pending) => pending.sign_in().await,
        }
    }
}

enum Prepared {
    Done(Session),
    SignIn(PendingSignIn),
}

struct PendingSignIn {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    token: Option<String>,
    app_id: AppId,
}

fn prepare(input: BootstrapInput, connector: &dyn Connector) -> Prepared {
    let BootstrapInput {
        firebase,
        initial_auth_token,
        app_id,
    } = input;

    if firebase.is_empty() {
        tracing::error!("Firebase config is missing or empty; contact form is disabled");
        return Prepared::Done(Session::degraded(app_id));
    }

    match connector.connect(&firebase) {
        Ok(connection) => Prepared::SignIn(PendingSignIn {
            auth: connection.auth,
            store: connection.store,
            token: initial_auth_token.filter(|t| !t.trim().is_empty()),
            app_id,
        }),
        Err(e) => {
            tracing::error!("Error initializing Firebase: {e}");
            Prepared::Done(Session::degraded(app_id))
        }
    }
}

impl PendingSignIn {
    async fn sign_in(self) -> Session {
        let identity = establish_identity(self.auth.as_ref(), self.token.as_deref()).await;
        match &identity {
            Some(user) => tracing::info!(
                uid = %user.uid,
                anonymous = user.anonymous,
                "Session identity established"
            ),
            None => tracing::warn!("Session is ready without an identity"),
        }
        Session::new(identity, Some(self.store), self.app_id)
    }
}

/// Custom token first when one is supplied, then exactly one anonymous attempt.
async fn establish_identity(auth: &dyn AuthProvider, token: Option<&str>) -> Option<AuthUser> {
    if let Some(token) = token {
        match auth.sign_in_with_custom_token(token).await {
            Ok(user) => return Some(user),
            Err(e) => tracing::error!("Firebase authentication failed: {e}; trying anonymous"),
        }
    }

    match auth.sign_in_anonymously().await {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::error!("Anonymous sign-in failed: {e}");
            None
        }
    }
}
