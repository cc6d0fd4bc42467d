//! Core domain types for Folio.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

#![allow(clippy::missing_errors_doc)]

mod contact;
mod firebase;
mod ids;
mod route;
mod section;
mod session;
mod store;
mod theme;

pub use contact::{
    ContactDraft, ContactField, ContactMessage, ContactValidationError, SUBMITTED_AT_FIELD,
    SubmissionStatus,
};
pub use firebase::{FirebaseConfig, FirebaseConfigError};
pub use ids::{AppId, AppIdError, DEFAULT_APP_ID, IdentityId};
pub use route::{NAV_ITEMS, NavItem, Route};
pub use section::SectionId;
pub use session::SessionIdentity;
pub use store::{CollectionPath, CollectionPathError, Document, FieldValue};
pub use theme::Theme;

/// Drop control characters from user-entered text, keeping newlines and tabs.
///
/// Form input arrives from key and paste events and ends up both on screen and
/// in the document store.
#[must_use]
pub fn strip_control_chars(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}
