//! Config file and environment feeding the bootstrap the same way `main` does.

use std::sync::Arc;

use wiremock::MockServer;

use folio_engine::folio_config::{
    ENV_AUTH_EMULATOR_HOST, ENV_FIRESTORE_EMULATOR_HOST, FolioConfig, HostEnvironment,
};
use folio_engine::{BootstrapInput, FirebaseConnector, FirebaseEndpoints, IdentityBootstrap};

use crate::common::{API_KEY, mount_anonymous_sign_up};

fn endpoints_for(host: &HostEnvironment) -> FirebaseEndpoints {
    FirebaseEndpoints::with_overrides(
        host.endpoints.auth.as_deref(),
        host.endpoints.firestore.as_deref(),
    )
}

#[tokio::test]
async fn config_file_drives_bootstrap() {
    let server = MockServer::start().await;
    mount_anonymous_sign_up(&server, "from-config").await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        format!(
            r#"
[app]
id = "site-${{SITE}}"

[firebase]
apiKey = "${{FIREBASE_KEY}}"
projectId = "demo"

[endpoints]
auth = "{uri}/"
firestore = "{uri}"
"#,
            uri = server.uri()
        ),
    )
    .unwrap();

    let config = FolioConfig::load_from(&path).unwrap();
    let host = HostEnvironment::resolve_with(config.as_ref(), |key| match key {
        "SITE" => Some("blue".to_string()),
        "FIREBASE_KEY" => Some(API_KEY.to_string()),
        _ => None,
    });
    assert_eq!(host.app_id.as_str(), "site-blue");
    assert_eq!(host.firebase.api_key(), Some(API_KEY));

    let endpoints = endpoints_for(&host);
    assert_eq!(endpoints.auth, server.uri());
    assert!(endpoints.requires_plain_http());

    let session = IdentityBootstrap::new(
        BootstrapInput {
            firebase: host.firebase,
            initial_auth_token: host.initial_auth_token,
            app_id: host.app_id,
        },
        Arc::new(FirebaseConnector::new(endpoints)),
    )
    .run()
    .await;

    assert_eq!(session.identity_id().unwrap().as_str(), "from-config");
    assert_eq!(session.app_id().as_str(), "site-blue");
    assert!(session.store().is_some());
}

#[test]
fn emulator_hosts_override_configured_endpoints() {
    let config: FolioConfig = FolioConfig::default();
    let host = HostEnvironment::resolve_with(Some(&config), |key| match key {
        k if k == ENV_AUTH_EMULATOR_HOST => Some("127.0.0.1:9099".to_string()),
        k if k == ENV_FIRESTORE_EMULATOR_HOST => Some("127.0.0.1:8080".to_string()),
        _ => None,
    });
    let endpoints = endpoints_for(&host);
    assert_eq!(
        endpoints.auth,
        "http://127.0.0.1:9099/identitytoolkit.googleapis.com"
    );
    assert_eq!(endpoints.firestore, "http://127.0.0.1:8080");
}

#[test]
fn missing_overrides_use_production_hosts() {
    let host = HostEnvironment::resolve_with(None, |_| None);
    let endpoints = endpoints_for(&host);
    assert!(endpoints.auth.starts_with("https://"));
    assert!(endpoints.firestore.starts_with("https://"));
    assert!(!endpoints.requires_plain_http());
}
