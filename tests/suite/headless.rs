//! Full app rendered into a test backend, without a terminal or network.

use std::sync::Arc;

use ratatui::{Terminal, backend::TestBackend};
use wiremock::MockServer;

use folio_engine::folio_config::{FileStorage, MemoryStorage};
use folio_engine::folio_types::FirebaseConfig;
use folio_engine::{
    App, AppId, BootstrapInput, IdentityBootstrap, PreconditionFailure, Route,
    RouteComposition, SectionId, SubmissionStatus, SubmitOutcome, Theme,
};

use crate::common::{connector, fill_form, mount_anonymous_sign_up, ready_app};

fn screen(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(110, 36)).unwrap();
    terminal.draw(|frame| folio_tui::draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[tokio::test]
async fn empty_config_renders_and_rejects_submissions() {
    // Nothing is mounted: any request would 404 and show up in the log.
    let server = MockServer::start().await;
    let handle = IdentityBootstrap::new(
        BootstrapInput {
            firebase: FirebaseConfig::default(),
            initial_auth_token: Some("ignored".to_string()),
            app_id: AppId::default(),
        },
        connector(&server),
    )
    .spawn();

    let mut app = App::new(
        handle,
        Arc::new(MemoryStorage::new()),
        RouteComposition::WithNotFound,
    );
    // Resolved synchronously: ready, but nobody is signed in.
    assert!(app.session_identity().is_ready());
    assert!(app.session_identity().identity_id().is_none());

    let first = screen(&mut app);
    assert!(first.contains("GKP Coding"));
    assert!(!first.contains("User ID:"));

    fill_form(&mut app, "Ada", "ada@example.com", "Hi");
    assert_eq!(
        app.submit_contact(),
        SubmitOutcome::Rejected(PreconditionFailure::NoStore)
    );
    assert_eq!(app.contact().status(), SubmissionStatus::Error);

    let after = screen(&mut app);
    assert!(after.contains("Failed to send message."));
    assert!(
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .is_empty()
    );
}

#[tokio::test]
async fn signed_in_footer_shows_user_id() {
    let server = MockServer::start().await;
    mount_anonymous_sign_up(&server, "anon-footer").await;

    let mut app = ready_app(&server, None, "default-app-id").await;
    assert!(screen(&mut app).contains("User ID: anon-footer"));
}

#[test]
fn theme_choice_persists_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.toml");
    let launch = || {
        App::new(
            folio_engine::SessionHandle::ready(folio_engine::Session::degraded(AppId::default())),
            Arc::new(FileStorage::new(&state)),
            RouteComposition::WithNotFound,
        )
    };

    let mut app = launch();
    assert_eq!(app.theme(), Theme::Light);
    app.toggle_theme();
    drop(app);

    let app = launch();
    assert_eq!(app.theme(), Theme::Dark);
    let stored = std::fs::read_to_string(&state).unwrap();
    assert!(stored.contains("theme = \"dark\""));
}

#[test]
fn navigation_across_every_page() {
    let mut app = App::new(
        folio_engine::SessionHandle::ready(folio_engine::Session::degraded(AppId::default())),
        Arc::new(MemoryStorage::new()),
        RouteComposition::WithNotFound,
    );
    for route in Route::PAGES {
        app.navigate_to(route);
        assert_eq!(app.route(), Some(route));
        let rendered = screen(&mut app);
        assert!(rendered.contains("GKP Coding"), "{route}");
        assert_eq!(app.scroll(), 0);
        // Section tracking only runs on the landing page.
        assert_eq!(
            app.active_section().is_some(),
            route == Route::Home,
            "{route}"
        );
    }

    app.navigate("/missing");
    assert!(screen(&mut app).contains("404"));

    app.jump_to_section(SectionId::Projects);
    assert_eq!(app.route(), Some(Route::Home));
    screen(&mut app);
    assert_eq!(app.active_section(), Some(SectionId::Projects));
}
