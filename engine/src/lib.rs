//! Core engine for Folio - session, contact flow, and navigation state.
//!
//! This crate contains the App state machine without TUI dependencies.

use std::sync::Arc;

mod bootstrap;
mod contact;
mod navigation;
mod sections;
mod theme;

#[cfg(test)]
mod testing;

pub use bootstrap::{BootstrapInput, IdentityBootstrap, Session, SessionHandle, SessionState};
pub use contact::{ContactForm, PreconditionFailure, STATUS_RESET_DELAY, SubmitOutcome};
pub use navigation::{Navigator, RouteComposition, RouteTable, nav_item_active, normalize_path};
pub use sections::{
    SectionSpan, SectionTracker, SectionVisibility, VISIBILITY_THRESHOLD, active_section,
    visibility,
};
pub use theme::ThemeState;

pub use folio_config::{self, KeyValueStorage};
pub use folio_providers::{self, Connector, FirebaseConnector, FirebaseEndpoints};
pub use folio_types::{
    self, AppId, ContactDraft, ContactField, NAV_ITEMS, NavItem, Route, SectionId,
    SessionIdentity, SubmissionStatus, Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the contact form.
    Contact,
    /// Typing a path to navigate to.
    PathPrompt,
}

#[derive(Debug)]
pub struct App {
    session: SessionHandle,
    contact: ContactForm,
    focus: ContactField,
    theme: ThemeState,
    navigator: Navigator,
    sections: SectionTracker,
    section_spans: Vec<SectionSpan>,
    pending_section: Option<SectionId>,
    viewport_rows: u16,
    mode: InputMode,
    path_prompt: String,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(
        session: SessionHandle,
        theme_storage: Arc<dyn KeyValueStorage>,
        composition: RouteComposition,
    ) -> Self {
        let mut app = Self {
            session,
            contact: ContactForm::new(),
            focus: ContactField::Name,
            theme: ThemeState::load(theme_storage),
            navigator: Navigator::new(RouteTable::new(composition)),
            sections: SectionTracker::new(),
            section_spans: Vec::new(),
            pending_section: None,
            viewport_rows: 0,
            mode: InputMode::Normal,
            path_prompt: String::new(),
            should_quit: false,
        };
        app.sync_section_tracking();
        app
    }

    /// Drain background results. Call once per frame.
    pub fn tick(&mut self) {
        if self.contact.tick() {
            tracing::debug!(status = self.contact.status().as_str(), "Contact status changed");
        }
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session.current()
    }

    #[must_use]
    pub fn session_identity(&self) -> SessionIdentity {
        self.session.current().identity()
    }

    // ------------------------------------------------------------------
    // Theme
    // ------------------------------------------------------------------

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.theme.toggle();
        tracing::debug!(theme = theme.as_str(), "Theme toggled");
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    #[must_use]
    pub fn path(&self) -> &str {
        self.navigator.path()
    }

    #[must_use]
    pub fn route(&self) -> Option<Route> {
        self.navigator.route()
    }

    #[must_use]
    pub fn scroll(&self) -> u16 {
        self.navigator.scroll()
    }

    pub fn navigate(&mut self, path: &str) {
        if self.navigator.navigate(path) {
            self.section_spans.clear();
            self.sync_section_tracking();
        }
    }

    pub fn navigate_to(&mut self, route: Route) {
        if let Some(path) = route.path() {
            self.navigate(path);
        }
    }

    /// Nav item for a hotkey (`1`..`6`).
    #[must_use]
    pub fn nav_item_for_key(c: char) -> Option<&'static NavItem> {
        let items: &'static [NavItem] = &NAV_ITEMS;
        items.iter().find(|item| item.hotkey == c)
    }

    /// On the landing page the section in view drives the highlight.
    #[must_use]
    pub fn is_nav_active(&self, item: &NavItem) -> bool {
        let active_id = match self.route() {
            Some(Route::Home) => self.active_section().map(SectionId::id),
            _ => None,
        };
        nav_item_active(item, self.navigator.path(), active_id)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.navigator.scroll_by(delta);
        self.observe_sections();
    }

    pub fn scroll_page(&mut self, pages: i32) {
        let page = i32::from(self.viewport_rows.saturating_sub(1).max(1));
        self.scroll_by(page.saturating_mul(pages));
    }

    pub fn scroll_to_top(&mut self) {
        self.navigator.scroll_to_top();
        self.observe_sections();
    }

    /// Scroll the landing page so `section` is at the top, going home first
    /// if needed. Applied on the next layout update when spans are unknown.
    pub fn jump_to_section(&mut self, section: SectionId) {
        self.navigate_to(Route::Home);
        if let Some(span) = self.span_of(section) {
            self.navigator.scroll_to(span.start);
            self.observe_sections();
        } else {
            self.pending_section = Some(section);
        }
    }

    /// Report the rendered layout of the current view.
    pub fn update_layout(&mut self, spans: &[SectionSpan], content_rows: u16, viewport_rows: u16) {
        self.viewport_rows = viewport_rows;
        self.navigator.set_content_height(content_rows, viewport_rows);
        self.section_spans.clear();
        self.section_spans.extend_from_slice(spans);
        if let Some(section) = self.pending_section
            && let Some(span) = self.span_of(section)
        {
            self.pending_section = None;
            self.navigator.scroll_to(span.start);
        }
        self.observe_sections();
    }

    #[must_use]
    pub fn active_section(&self) -> Option<SectionId> {
        self.sections.active()
    }

    fn span_of(&self, section: SectionId) -> Option<SectionSpan> {
        self.section_spans
            .iter()
            .find(|span| span.section == section)
            .copied()
    }

    fn observe_sections(&mut self) {
        self.sections.observe(
            &self.section_spans,
            self.navigator.scroll(),
            self.viewport_rows,
        );
    }

    fn sync_section_tracking(&mut self) {
        if self.navigator.route() == Some(Route::Home) {
            self.sections.mount();
        } else {
            self.sections.unmount();
            self.pending_section = None;
        }
    }

    // ------------------------------------------------------------------
    // Input modes
    // ------------------------------------------------------------------

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn enter_normal_mode(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn open_path_prompt(&mut self) {
        self.path_prompt.clear();
        self.mode = InputMode::PathPrompt;
    }

    #[must_use]
    pub fn path_prompt(&self) -> &str {
        &self.path_prompt
    }

    pub fn path_prompt_push(&mut self, c: char) {
        if !c.is_control() && !c.is_whitespace() {
            self.path_prompt.push(c);
        }
    }

    pub fn path_prompt_backspace(&mut self) {
        self.path_prompt.pop();
    }

    pub fn commit_path_prompt(&mut self) {
        let path = std::mem::take(&mut self.path_prompt);
        self.mode = InputMode::Normal;
        if !path.trim().is_empty() {
            self.navigate(&path);
        }
    }

    // ------------------------------------------------------------------
    // Contact form
    // ------------------------------------------------------------------

    #[must_use]
    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    #[must_use]
    pub fn contact_focus(&self) -> ContactField {
        self.focus
    }

    pub fn focus_contact(&mut self) {
        self.mode = InputMode::Contact;
        self.jump_to_section(SectionId::Contact);
    }

    pub fn focus_next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn contact_type(&mut self, c: char) {
        self.contact.push_char(self.focus, c);
    }

    pub fn contact_paste(&mut self, text: &str) {
        self.contact.push_str(self.focus, text);
    }

    pub fn contact_backspace(&mut self) {
        self.contact.backspace(self.focus);
    }

    /// Whether the send action is enabled in the UI.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session.current().is_ready() && self.contact.status() != SubmissionStatus::Sending
    }

    pub fn submit_contact(&mut self) -> SubmitOutcome {
        let state = self.session.current();
        let outcome = self.contact.submit(&state);
        if outcome == SubmitOutcome::Started {
            self.focus = ContactField::Name;
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAuth, FakeConnector, RecordingStore, firebase_config};
    use folio_config::MemoryStorage;
    use folio_types::FirebaseConfig;

    fn spans() -> Vec<SectionSpan> {
        [
            (SectionId::Home, 0, 20),
            (SectionId::About, 20, 20),
            (SectionId::Projects, 40, 30),
            (SectionId::Contact, 70, 20),
        ]
        .into_iter()
        .map(|(section, start, height)| SectionSpan {
            section,
            start,
            height,
        })
        .collect()
    }

    fn degraded_app() -> App {
        App::new(
            SessionHandle::ready(Session::degraded(AppId::default())),
            Arc::new(MemoryStorage::new()),
            RouteComposition::WithNotFound,
        )
    }

    #[test]
    fn starts_on_home_with_section_tracking() {
        let app = degraded_app();
        assert_eq!(app.route(), Some(Route::Home));
        assert_eq!(app.active_section(), Some(SectionId::Home));
        assert!(app.session_identity().is_ready());
    }

    #[test]
    fn leaving_home_stops_section_tracking() {
        let mut app = degraded_app();
        app.update_layout(&spans(), 90, 20);
        app.navigate("/venv");
        assert_eq!(app.active_section(), None);
        assert_eq!(app.scroll(), 0);

        app.navigate("/");
        assert_eq!(app.active_section(), Some(SectionId::Home));
    }

    #[test]
    fn scrolling_updates_active_section() {
        let mut app = degraded_app();
        app.update_layout(&spans(), 90, 20);
        app.scroll_by(40);
        assert_eq!(app.active_section(), Some(SectionId::Projects));
        app.scroll_to_top();
        assert_eq!(app.active_section(), Some(SectionId::Home));
    }

    #[test]
    fn header_highlight_follows_section_in_view() {
        let mut app = degraded_app();
        let home = App::nav_item_for_key('1').unwrap();
        let venv = App::nav_item_for_key('3').unwrap();
        assert!(app.is_nav_active(home));

        app.update_layout(&spans(), 90, 20);
        app.scroll_by(40);
        assert_eq!(app.active_section(), Some(SectionId::Projects));
        assert!(!app.is_nav_active(home));

        app.scroll_to_top();
        assert!(app.is_nav_active(home));

        app.navigate("/venv");
        assert!(app.is_nav_active(venv));
        assert!(!app.is_nav_active(home));
    }

    #[test]
    fn jump_from_other_page_applies_after_layout() {
        let mut app = degraded_app();
        app.navigate("/howto");
        app.focus_contact();
        assert_eq!(app.route(), Some(Route::Home));
        assert_eq!(app.input_mode(), InputMode::Contact);

        app.update_layout(&spans(), 90, 20);
        assert_eq!(app.scroll(), 70);
        assert_eq!(app.active_section(), Some(SectionId::Contact));
    }

    #[test]
    fn path_prompt_navigates_on_commit() {
        let mut app = degraded_app();
        app.open_path_prompt();
        for c in "/GitHub-Notes".chars() {
            app.path_prompt_push(c);
        }
        app.commit_path_prompt();
        assert_eq!(app.route(), Some(Route::GitHubNotes));
        assert_eq!(app.input_mode(), InputMode::Normal);

        app.open_path_prompt();
        app.path_prompt_push('x');
        app.commit_path_prompt();
        assert_eq!(app.route(), Some(Route::NotFound));
    }

    #[test]
    fn nav_hotkeys_map_to_routes() {
        assert_eq!(App::nav_item_for_key('4').unwrap().route, Route::GitHubNotes);
        assert!(App::nav_item_for_key('9').is_none());
    }

    #[test]
    fn theme_toggle_goes_through_storage() {
        let storage = Arc::new(MemoryStorage::new().with(Theme::STORAGE_KEY, "dark"));
        let mut app = App::new(
            SessionHandle::ready(Session::degraded(AppId::default())),
            storage.clone(),
            RouteComposition::WithNotFound,
        );
        assert_eq!(app.theme(), Theme::Dark);
        app.toggle_theme();
        assert_eq!(
            storage.get(Theme::STORAGE_KEY).unwrap().as_deref(),
            Some("light")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn empty_config_submission_errors_without_write() {
        let connector = Arc::new(FakeConnector::failing());
        let handle = IdentityBootstrap::new(
            BootstrapInput {
                firebase: FirebaseConfig::default(),
                initial_auth_token: None,
                app_id: AppId::default(),
            },
            connector.clone(),
        )
        .spawn();
        let mut app = App::new(
            handle,
            Arc::new(MemoryStorage::new()),
            RouteComposition::WithNotFound,
        );

        app.focus_contact();
        for c in "A".chars() {
            app.contact_type(c);
        }
        app.focus_next_field();
        app.contact_paste("a@a.com");
        app.focus_next_field();
        app.contact_paste("hi");

        assert!(!app.can_submit());
        assert_eq!(
            app.submit_contact(),
            SubmitOutcome::Rejected(PreconditionFailure::NoStore)
        );
        assert_eq!(app.contact().status(), SubmissionStatus::Error);
        assert_eq!(connector.connect_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn anonymous_session_submission_succeeds() {
        let store = RecordingStore::ok();
        let connector = Arc::new(FakeConnector::new(
            Arc::new(FakeAuth::new(true, true)),
            store.clone(),
        ));
        let mut handle = IdentityBootstrap::new(
            BootstrapInput {
                firebase: firebase_config(),
                initial_auth_token: None,
                app_id: AppId::default(),
            },
            connector,
        )
        .spawn();
        handle.wait_ready().await.unwrap();

        let mut app = App::new(
            handle,
            Arc::new(MemoryStorage::new()),
            RouteComposition::WithNotFound,
        );
        assert_eq!(
            app.session_identity().identity_id().unwrap().as_str(),
            "anon-uid"
        );

        app.focus_contact();
        app.contact_paste("A");
        app.focus_next_field();
        app.contact_paste("a@a.com");
        app.focus_next_field();
        app.contact_paste("hi");
        assert!(app.can_submit());
        assert_eq!(app.submit_contact(), SubmitOutcome::Started);
        assert!(!app.can_submit());

        while app.contact().status() == SubmissionStatus::Sending {
            tokio::task::yield_now().await;
            app.tick();
        }
        assert_eq!(app.contact().status(), SubmissionStatus::Success);
        assert!(app.contact().draft().is_empty());
        assert_eq!(store.writes().len(), 1);
    }
}
