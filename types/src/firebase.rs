//! Firebase web configuration as supplied by the hosting environment.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FirebaseConfigError {
    #[error("firebase config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("firebase config must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// The `firebaseConfig` object (`apiKey`, `projectId`, `authDomain`, ...).
///
/// Kept as a raw JSON object: an empty object is meaningful (it disables the
/// bootstrap) and unknown keys are passed through untouched.
#[derive(Clone, Default, PartialEq)]
pub struct FirebaseConfig(Map<String, Value>);

impl FirebaseConfig {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, FirebaseConfigError> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(FirebaseConfigError::NotAnObject("null")),
            Value::Bool(_) => Err(FirebaseConfigError::NotAnObject("a boolean")),
            Value::Number(_) => Err(FirebaseConfigError::NotAnObject("a number")),
            Value::String(_) => Err(FirebaseConfigError::NotAnObject("a string")),
            Value::Array(_) => Err(FirebaseConfigError::NotAnObject("an array")),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Non-blank string value for `key`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.get_str("apiKey")
    }

    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.get_str("projectId")
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

// Manual Debug impl to prevent leaking the API key in logs.
impl fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.0 {
            if key == "apiKey" {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}
