use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application identifier used when the hosting environment does not supply one.
pub const DEFAULT_APP_ID: &str = "default-app-id";

/// Opaque principal id issued by the auth service (Firebase `localId` / `uid`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(String);

impl IdentityId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application/tenant identifier embedded in document-store paths.
///
/// Always a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("app id {0:?} must not contain '/'")]
pub struct AppIdError(pub String);

impl AppId {
    /// Blank values fall back to [`DEFAULT_APP_ID`].
    pub fn parse(id: impl Into<String>) -> Result<Self, AppIdError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            Ok(Self::default())
        } else if trimmed.contains('/') {
            Err(AppIdError(id))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AppId {
    type Error = AppIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AppId> for String {
    fn from(value: AppId) -> Self {
        value.0
    }
}

impl Default for AppId {
    fn default() -> Self {
        Self(DEFAULT_APP_ID.to_string())
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
