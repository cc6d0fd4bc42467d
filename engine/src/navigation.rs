//! Path routing and per-page scroll state.

use folio_types::{NavItem, Route};

/// How unmatched paths are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteComposition {
    /// Unmatched paths render nothing inside the chrome.
    Primary,
    /// Unmatched paths render the not-found page.
    #[default]
    WithNotFound,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    composition: RouteComposition,
}

impl RouteTable {
    #[must_use]
    pub fn new(composition: RouteComposition) -> Self {
        Self { composition }
    }

    #[must_use]
    pub fn composition(&self) -> RouteComposition {
        self.composition
    }

    /// The page for `path`, or `None` for an empty outlet.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<Route> {
        let path = normalize_path(path);
        Route::PAGES
            .into_iter()
            .find(|route| route.path() == Some(path.as_str()))
            .or(match self.composition {
                RouteComposition::Primary => None,
                RouteComposition::WithNotFound => Some(Route::NotFound),
            })
    }
}

/// Strip query and fragment, collapse trailing slashes, lowercase.
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let trimmed = raw[..end].trim().trim_end_matches('/');
    let mut path = String::with_capacity(trimmed.len() + 1);
    if !trimmed.starts_with('/') {
        path.push('/');
    }
    path.push_str(&trimmed.to_ascii_lowercase());
    path
}

/// Header highlighting. An explicit active id wins; otherwise the root item
/// matches only `/` and other items match by prefix.
#[must_use]
pub fn nav_item_active(item: &NavItem, current_path: &str, active_id: Option<&str>) -> bool {
    if let Some(active_id) = active_id {
        return active_id == item.id;
    }
    let current = normalize_path(current_path);
    match item.path() {
        "/" => current == "/",
        path => current.starts_with(path),
    }
}

/// Current location plus a vertical scroll offset that resets on every
/// route change.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: RouteTable,
    path: String,
    route: Option<Route>,
    scroll: u16,
    max_scroll: u16,
}

impl Navigator {
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        let route = table.resolve("/");
        Self {
            table,
            path: "/".to_string(),
            route,
            scroll: 0,
            max_scroll: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn route(&self) -> Option<Route> {
        self.route
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Returns true if the location changed.
    pub fn navigate(&mut self, path: &str) -> bool {
        let path = normalize_path(path);
        if path == self.path {
            return false;
        }
        self.route = self.table.resolve(&path);
        tracing::debug!(path = %path, route = ?self.route, "Navigated");
        self.path = path;
        self.scroll_to_top();
        true
    }

    #[must_use]
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to(&mut self, offset: u16) {
        self.scroll = offset.min(self.max_scroll);
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = i32::from(self.scroll).saturating_add(delta);
        self.scroll_to(target.clamp(0, i32::from(u16::MAX)) as u16);
    }

    /// Record the rendered content height so scrolling stops at the end.
    pub fn set_content_height(&mut self, content_rows: u16, viewport_rows: u16) {
        self.max_scroll = content_rows.saturating_sub(viewport_rows);
        self.scroll = self.scroll.min(self.max_scroll);
    }
}
