//! End-to-end contact submissions through the real Firebase REST clients.

use serde_json::Value;
use wiremock::MockServer;

use folio_engine::{SubmissionStatus, SubmitOutcome};

use crate::common::{
    COMMIT_PATH, fill_form, mount_anonymous_failure, mount_anonymous_sign_up, mount_commit,
    mount_custom_token, ready_app, requests_to, settle,
};

#[tokio::test]
async fn anonymous_visitor_message_lands_in_app_collection() {
    let server = MockServer::start().await;
    mount_anonymous_sign_up(&server, "anon-1").await;
    mount_commit(&server, 200).await;

    let mut app = ready_app(&server, None, "portfolio").await;
    assert_eq!(
        app.session_identity().identity_id().unwrap().as_str(),
        "anon-1"
    );

    fill_form(&mut app, "Ada", "ada@example.com", "Hello there");
    assert_eq!(app.submit_contact(), SubmitOutcome::Started);
    assert_eq!(app.contact().status(), SubmissionStatus::Sending);
    assert_eq!(settle(&mut app).await, SubmissionStatus::Success);
    assert!(app.contact().draft().is_empty());

    let commits = requests_to(&server, COMMIT_PATH).await;
    assert_eq!(commits.len(), 1);
    let auth = commits[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    assert_eq!(auth, Some("Bearer anon-1-token"));

    let body: Value = commits[0].body_json().unwrap();
    let write = &body["writes"][0];
    let name = write["update"]["name"].as_str().unwrap();
    assert!(name.starts_with(
        "projects/demo/databases/(default)/documents/artifacts/portfolio/public/data/contact_messages/"
    ));
    assert_eq!(write["update"]["fields"]["name"]["stringValue"], "Ada");
    assert_eq!(
        write["update"]["fields"]["email"]["stringValue"],
        "ada@example.com"
    );
    assert_eq!(
        write["update"]["fields"]["message"]["stringValue"],
        "Hello there"
    );
    assert_eq!(
        write["updateTransforms"][0]["setToServerValue"],
        "REQUEST_TIME"
    );
}

#[tokio::test]
async fn rejected_write_keeps_the_draft() {
    let server = MockServer::start().await;
    mount_anonymous_sign_up(&server, "anon-2").await;
    mount_commit(&server, 403).await;

    let mut app = ready_app(&server, None, "default-app-id").await;
    fill_form(&mut app, "Ada", "ada@example.com", "Hello");
    app.submit_contact();

    assert_eq!(settle(&mut app).await, SubmissionStatus::Error);
    let draft = app.contact().draft();
    assert_eq!(draft.name, "Ada");
    assert_eq!(draft.email, "ada@example.com");
    assert_eq!(draft.message, "Hello");
}

#[tokio::test]
async fn custom_token_identity_signs_the_write() {
    let server = MockServer::start().await;
    mount_custom_token(&server, Ok("member-7")).await;
    mount_commit(&server, 200).await;

    let mut app = ready_app(&server, Some("custom-token"), "default-app-id").await;
    assert_eq!(
        app.session_identity().identity_id().unwrap().as_str(),
        "member-7"
    );
    assert!(requests_to(&server, "/v1/accounts:signUp").await.is_empty());

    fill_form(&mut app, "Ada", "ada@example.com", "Hi");
    app.submit_contact();
    assert_eq!(settle(&mut app).await, SubmissionStatus::Success);

    let commits = requests_to(&server, COMMIT_PATH).await;
    let auth = commits[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(auth.starts_with("Bearer ") && auth.contains('.'));
}

#[tokio::test]
async fn rejected_custom_token_falls_back_to_anonymous() {
    let server = MockServer::start().await;
    mount_custom_token(&server, Err(400)).await;
    mount_anonymous_sign_up(&server, "anon-3").await;

    let app = ready_app(&server, Some("expired"), "default-app-id").await;
    assert_eq!(
        app.session_identity().identity_id().unwrap().as_str(),
        "anon-3"
    );
    assert_eq!(
        requests_to(&server, "/v1/accounts:signInWithCustomToken")
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn failed_sign_in_is_ready_without_identity_but_can_still_write() {
    let server = MockServer::start().await;
    mount_anonymous_failure(&server).await;
    mount_commit(&server, 200).await;

    let mut app = ready_app(&server, None, "default-app-id").await;
    let identity = app.session_identity();
    assert!(identity.is_ready());
    assert!(identity.identity_id().is_none());

    // The store connection survives; the write goes out unauthenticated.
    fill_form(&mut app, "Ada", "ada@example.com", "Hi");
    assert!(app.can_submit());
    app.submit_contact();
    assert_eq!(settle(&mut app).await, SubmissionStatus::Success);

    let commits = requests_to(&server, COMMIT_PATH).await;
    assert!(commits[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn incomplete_form_never_reaches_the_store() {
    let server = MockServer::start().await;
    mount_anonymous_sign_up(&server, "anon-4").await;
    mount_commit(&server, 200).await;

    let mut app = ready_app(&server, None, "default-app-id").await;
    fill_form(&mut app, "Ada", "", "Hi");
    assert!(matches!(app.submit_contact(), SubmitOutcome::Rejected(_)));
    assert_eq!(app.contact().status(), SubmissionStatus::Error);
    assert!(requests_to(&server, COMMIT_PATH).await.is_empty());
}

#[tokio::test]
async fn whitespace_only_name_is_sent_as_typed() {
    let server = MockServer::start().await;
    mount_anonymous_sign_up(&server, "anon-5").await;
    mount_commit(&server, 200).await;

    let mut app = ready_app(&server, None, "default-app-id").await;
    fill_form(&mut app, " ", "ada@example.com", "Hi");
    assert_eq!(app.submit_contact(), SubmitOutcome::Started);
    assert_eq!(settle(&mut app).await, SubmissionStatus::Success);

    let commits = requests_to(&server, COMMIT_PATH).await;
    assert_eq!(commits.len(), 1);
    let body: Value = commits[0].body_json().unwrap();
    assert_eq!(body["writes"][0]["update"]["fields"]["name"]["stringValue"], " ");
}
