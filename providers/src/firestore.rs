//! Firestore v1 REST writes.
//!
//! Appends use `documents:commit` with a single write: an `update` of a
//! freshly named document guarded by `currentDocument.exists = false`, plus
//! a `REQUEST_TIME` transform for every server-timestamp field. This is what
//! the web SDK's `addDoc` sends.

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use thiserror::Error;

use folio_types::{CollectionPath, Document, FieldValue};

use crate::{IdToken, api_failure, parse_url};

const AUTO_ID_LEN: usize = 20;
const AUTO_ID_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("document store rejected the write ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("invalid document store endpoint: {0}")]
    Endpoint(String),
}

/// Full resource name of a written document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentName(String);

impl DocumentName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment (the generated document id).
    #[must_use]
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a new document with a generated id under `collection`.
    async fn append(
        &self,
        credentials: Option<&IdToken>,
        collection: &CollectionPath,
        document: Document,
    ) -> Result<DocumentName, StoreError>;
}

#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
}

impl FirestoreStore {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, project_id: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
        }
    }

    fn database(&self) -> String {
        format!("projects/{}/databases/(default)", self.project_id)
    }

    fn commit_url(&self) -> Result<reqwest::Url, StoreError> {
        parse_url(&format!(
            "{}/v1/{}/documents:commit",
            self.base_url,
            self.database()
        ))
        .map_err(StoreError::Endpoint)
    }

    fn document_name(&self, collection: &CollectionPath, id: &str) -> DocumentName {
        DocumentName(format!(
            "{}/documents/{}/{id}",
            self.database(),
            collection.relative()
        ))
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn append(
        &self,
        credentials: Option<&IdToken>,
        collection: &CollectionPath,
        document: Document,
    ) -> Result<DocumentName, StoreError> {
        let name = self.document_name(collection, &auto_id());
        let body = commit_body(&name, &document);

        let mut request = self.client.post(self.commit_url()?).json(&body);
        if let Some(token) = credentials {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let (status, message) = api_failure(response).await;
            return Err(StoreError::Api { status, message });
        }

        tracing::debug!(document = %name, "Document committed");
        Ok(name)
    }
}

/// Random 20-character id, same shape as client-generated Firestore ids.
fn auto_id() -> String {
    let bytes: [u8; AUTO_ID_LEN] = rand::random();
    bytes
        .iter()
        .map(|b| AUTO_ID_ALPHABET[usize::from(*b) % AUTO_ID_ALPHABET.len()] as char)
        .collect()
}

/// Field paths that are not plain identifiers must be backtick-quoted.
fn quote_field_path(field: &str) -> String {
    let simple = field
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        field.to_string()
    } else {
        format!("`{}`", field.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

fn commit_body(name: &DocumentName, document: &Document) -> Value {
    let mut fields = Map::new();
    let mut transforms = Vec::new();
    for (field, value) in document.iter() {
        match value {
            FieldValue::String(s) => {
                fields.insert(field.to_string(), json!({ "stringValue": s }));
            }
            FieldValue::ServerTimestamp => transforms.push(json!({
                "fieldPath": quote_field_path(field),
                "setToServerValue": "REQUEST_TIME",
            })),
        }
    }

    let mut write = json!({
        "update": { "name": name.as_str(), "fields": fields },
        "currentDocument": { "exists": false },
    });
    if !transforms.is_empty() {
        write["updateTransforms"] = Value::Array(transforms);
    }
    json!({ "writes": [write] })
}
