//! Page routes and header navigation entries.

use std::fmt;

/// A full-page view addressable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    HowTo,
    Venv,
    GitHubNotes,
    LocalEnv,
    UnityVr,
    NotFound,
}

impl Route {
    /// Routes reachable by an exact path, in header order.
    pub const PAGES: [Route; 6] = [
        Self::Home,
        Self::HowTo,
        Self::Venv,
        Self::GitHubNotes,
        Self::LocalEnv,
        Self::UnityVr,
    ];

    /// Canonical path. `NotFound` has no path of its own.
    #[must_use]
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::Home => Some("/"),
            Self::HowTo => Some("/howto"),
            Self::Venv => Some("/venv"),
            Self::GitHubNotes => Some("/github-notes"),
            Self::LocalEnv => Some("/local-env"),
            Self::UnityVr => Some("/unity-vr"),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::HowTo => "How To",
            Self::Venv => "Venv",
            Self::GitHubNotes => "GitHub Notes",
            Self::LocalEnv => "Local Env",
            Self::UnityVr => "Unity VR",
            Self::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Header navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub route: Route,
    /// Key that activates the item from the keyboard.
    pub hotkey: char,
}

impl NavItem {
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self.route.path() {
            Some(path) => path,
            None => "/",
        }
    }
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem {
        id: "home",
        label: "Home",
        route: Route::Home,
        hotkey: '1',
    },
    NavItem {
        id: "howto",
        label: "How To",
        route: Route::HowTo,
        hotkey: '2',
    },
    NavItem {
        id: "venv",
        label: "Venv",
        route: Route::Venv,
        hotkey: '3',
    },
    NavItem {
        id: "git-notes",
        label: "GitHub Notes",
        route: Route::GitHubNotes,
        hotkey: '4',
    },
    NavItem {
        id: "local-env",
        label: "Local Env",
        route: Route::LocalEnv,
        hotkey: '5',
    },
    NavItem {
        id: "unity-vr",
        label: "Unity VR",
        route: Route::UnityVr,
        hotkey: '6',
    },
];
