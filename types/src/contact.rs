//! Contact form data: the editable draft, the validated message, and the
//! submission lifecycle.

use std::fmt;

use thiserror::Error;

use crate::Document;

/// Field name of the server-assigned submission timestamp.
pub const SUBMITTED_AT_FIELD: &str = "submittedAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [Self::Name, Self::Email, Self::Message];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "Email Address",
            Self::Message => "Message",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Name,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        ContactField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Fields that are empty, in form order. Whitespace counts as content.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field(s): {}", .missing.iter().map(|f| f.key()).collect::<Vec<_>>().join(", "))]
pub struct ContactValidationError {
    pub missing: Vec<ContactField>,
}

/// A draft that passed presence checks. The only validation performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    name: String,
    email: String,
    message: String,
}

impl ContactMessage {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Document body for the store: the three fields plus a server timestamp.
    #[must_use]
    pub fn to_document(&self) -> Document {
        Document::new()
            .with_string(ContactField::Name.key(), &self.name)
            .with_string(ContactField::Email.key(), &self.email)
            .with_string(ContactField::Message.key(), &self.message)
            .with_server_timestamp(SUBMITTED_AT_FIELD)
    }
}

impl TryFrom<&ContactDraft> for ContactMessage {
    type Error = ContactValidationError;

    fn try_from(draft: &ContactDraft) -> Result<Self, Self::Error> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(ContactValidationError { missing });
        }
        Ok(Self {
            name: draft.name.clone(),
            email: draft.email.clone(),
            message: draft.message.clone(),
        })
    }
}

/// Lifecycle of a contact submission.
///
/// `Idle -> Sending -> {Success, Error} -> Idle`. Precondition failures go
/// straight from `Idle` to `Error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

impl SubmissionStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    /// User-facing banner text. Error details only go to the log.
    #[must_use]
    pub const fn banner(self) -> Option<&'static str> {
        match self {
            Self::Success => Some("Message sent successfully! I will respond shortly."),
            Self::Error => Some("Failed to send message. Please check the log for details."),
            Self::Idle | Self::Sending => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sending => "sending",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}
