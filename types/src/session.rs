use crate::IdentityId;

/// Identity established by the bootstrap.
///
/// Starts not-ready; the only transition is to ready, with or without an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIdentity {
    identity_id: Option<IdentityId>,
    ready: bool,
}

impl SessionIdentity {
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ready(identity_id: Option<IdentityId>) -> Self {
        Self {
            identity_id,
            ready: true,
        }
    }

    #[must_use]
    pub fn identity_id(&self) -> Option<&IdentityId> {
        self.identity_id.as_ref()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}
