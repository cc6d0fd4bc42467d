//! Shared test utilities and fixtures
//!
//! A wiremock server stands in for both the Identity Toolkit and Firestore
//! REST APIs.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use folio_engine::folio_config::MemoryStorage;
use folio_engine::folio_types::FirebaseConfig;
use folio_engine::{
    App, AppId, BootstrapInput, ContactField, FirebaseConnector, FirebaseEndpoints,
    IdentityBootstrap, RouteComposition, SubmissionStatus,
};

pub const API_KEY: &str = "test-key";
pub const PROJECT_ID: &str = "demo";
pub const COMMIT_PATH: &str = "/v1/projects/demo/databases/(default)/documents:commit";

pub fn firebase_config() -> FirebaseConfig {
    FirebaseConfig::from_json_str(
        &json!({
            "apiKey": API_KEY,
            "authDomain": "demo.firebaseapp.com",
            "projectId": PROJECT_ID,
        })
        .to_string(),
    )
    .unwrap()
}

pub fn connector(server: &MockServer) -> Arc<FirebaseConnector> {
    let uri = server.uri();
    Arc::new(FirebaseConnector::new(FirebaseEndpoints::with_overrides(
        Some(&uri),
        Some(&uri),
    )))
}

/// Unsigned JWT carrying `claims`; only the payload is ever read.
pub fn jwt(claims: &Value) -> String {
    let encode = |v: &Value| {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(v.to_string().as_bytes())
    };
    format!(
        "{}.{}.signature",
        encode(&json!({ "alg": "RS256", "typ": "JWT" })),
        encode(claims)
    )
}

pub async fn mount_anonymous_sign_up(server: &MockServer, uid: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idToken": format!("{uid}-token"),
            "refreshToken": "refresh",
            "expiresIn": "3600",
            "localId": uid,
        })))
        .mount(server)
        .await;
}

pub async fn mount_anonymous_failure(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "ADMIN_ONLY_OPERATION" }
        })))
        .mount(server)
        .await;
}

/// `Ok(uid)` issues an id token for `uid`; `Err(status)` rejects the token.
pub async fn mount_custom_token(server: &MockServer, outcome: Result<&str, u16>) {
    let response = match outcome {
        Ok(uid) => ResponseTemplate::new(200).set_body_json(json!({
            "idToken": jwt(&json!({ "user_id": uid, "sub": uid })),
            "refreshToken": "refresh",
            "expiresIn": "3600",
            "isNewUser": false,
        })),
        Err(status) => ResponseTemplate::new(status).set_body_json(json!({
            "error": { "code": status, "message": "INVALID_CUSTOM_TOKEN" }
        })),
    };
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithCustomToken"))
        .and(query_param("key", API_KEY))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_commit(server: &MockServer, status: u16) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({
            "writeResults": [{ "updateTime": "2026-01-01T00:00:00Z" }],
            "commitTime": "2026-01-01T00:00:00Z",
        }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({
            "error": { "code": status, "message": "Missing or insufficient permissions." }
        }))
    };
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn requests_to(server: &MockServer, request_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == request_path)
        .collect()
}

/// Run the bootstrap against `server` and build an app once it settles.
pub async fn ready_app(server: &MockServer, token: Option<&str>, app_id: &str) -> App {
    let mut handle = IdentityBootstrap::new(
        BootstrapInput {
            firebase: firebase_config(),
            initial_auth_token: token.map(str::to_string),
            app_id: AppId::parse(app_id).unwrap(),
        },
        connector(server),
    )
    .spawn();
    tokio::time::timeout(Duration::from_secs(5), handle.wait_ready())
        .await
        .expect("bootstrap timed out")
        .expect("bootstrap task died");

    App::new(
        handle,
        Arc::new(MemoryStorage::new()),
        RouteComposition::WithNotFound,
    )
}

pub fn fill_form(app: &mut App, name: &str, email: &str, message: &str) {
    app.focus_contact();
    for (field, value) in [
        (ContactField::Name, name),
        (ContactField::Email, email),
        (ContactField::Message, message),
    ] {
        while app.contact_focus() != field {
            app.focus_next_field();
        }
        app.contact_paste(value);
    }
}

/// Pump the app until the in-flight write resolves.
pub async fn settle(app: &mut App) -> SubmissionStatus {
    let wait = async {
        loop {
            app.tick();
            if app.contact().status() != SubmissionStatus::Sending {
                return app.contact().status();
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("submission did not settle")
}
