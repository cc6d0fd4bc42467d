//! Document-store addressing and payloads.

use std::fmt;

use thiserror::Error;

use crate::AppId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionPathError {
    #[error("collection path is empty")]
    Empty,
    #[error("collection path {0:?} contains an empty segment")]
    EmptySegment(String),
    #[error("collection path {0:?} has an even number of segments (names a document)")]
    DocumentPath(String),
}

/// Hierarchical collection path, e.g. `/artifacts/{appId}/public/data/contact_messages`.
///
/// Collections sit at odd depths, so a valid path has an odd number of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    pub fn parse(raw: &str) -> Result<Self, CollectionPathError> {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(CollectionPathError::Empty);
        }
        let segments: Vec<String> = trimmed.split('/').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(CollectionPathError::EmptySegment(raw.to_string()));
        }
        if segments.len() % 2 == 0 {
            return Err(CollectionPathError::DocumentPath(raw.to_string()));
        }
        Ok(Self { segments })
    }

    /// The shared public collection every session writes contact messages to.
    #[must_use]
    pub fn contact_messages(app_id: &AppId) -> Self {
        Self {
            segments: vec![
                "artifacts".to_string(),
                app_id.as_str().to_string(),
                "public".to_string(),
                "data".to_string(),
                "contact_messages".to_string(),
            ],
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path without the leading slash, as used in REST resource names.
    #[must_use]
    pub fn relative(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.relative())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    /// Filled in by the store at commit time.
    ServerTimestamp,
}

/// Flat document body with fields kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fields: Vec<(String, FieldValue)>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, FieldValue::String(value.into()))
    }

    #[must_use]
    pub fn with_server_timestamp(self, name: impl Into<String>) -> Self {
        self.with(name, FieldValue::ServerTimestamp)
    }

    fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
