//! Dark/light preference backed by durable storage.

use std::sync::Arc;

use folio_config::KeyValueStorage;
use folio_types::Theme;

pub struct ThemeState {
    theme: Theme,
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl ThemeState {
    /// Read the stored preference. Anything other than `"dark"` is light.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let stored = match storage.get(Theme::STORAGE_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {e}");
                None
            }
        };
        Self {
            theme: Theme::from_stored(stored.as_deref()),
            storage,
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Flip the theme and persist it. A failed write keeps the in-memory
    /// change.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.storage.set(Theme::STORAGE_KEY, self.theme.as_str()) {
            tracing::warn!("Failed to persist theme preference: {e}");
        }
        self.theme
    }
}
