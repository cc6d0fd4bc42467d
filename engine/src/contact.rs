//! Contact form state machine.
//!
//! `Idle -> Sending -> {Success, Error} -> Idle`. Precondition failures go
//! straight to `Error`. Writes and the auto-reset timer run as spawned tasks
//! and report back over a channel drained by [`ContactForm::tick`]. Every
//! event carries the submission generation it belongs to; events from an
//! older generation are dropped.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable};
use thiserror::Error;
use tokio::sync::mpsc;

use folio_providers::{DocumentName, DocumentStore, StoreError};
use folio_types::{
    CollectionPath, ContactDraft, ContactField, ContactMessage, ContactValidationError,
    SubmissionStatus, strip_control_chars,
};

use crate::bootstrap::{Session, SessionState};

/// How long a terminal status stays on screen.
pub const STATUS_RESET_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionFailure {
    #[error("Firestore not ready or not initialized")]
    NotReady,
    #[error("no document store connection")]
    NoStore,
    #[error(transparent)]
    Invalid(#[from] ContactValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The write was issued.
    Started,
    /// Failed a precondition; status is now `Error` and nothing was sent.
    Rejected(PreconditionFailure),
    /// A write is already in flight.
    Ignored,
}

#[derive(Debug)]
enum FormEvent {
    WriteFinished {
        generation: u64,
        result: Result<DocumentName, StoreError>,
    },
    ResetElapsed {
        generation: u64,
    },
}

#[derive(Debug)]
pub struct ContactForm {
    draft: ContactDraft,
    status: SubmissionStatus,
    generation: u64,
    reset_delay: Duration,
    reset_timer: Option<AbortHandle>,
    tx: mpsc::UnboundedSender<FormEvent>,
    rx: mpsc::UnboundedReceiver<FormEvent>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::with_reset_delay(STATUS_RESET_DELAY)
    }

    #[must_use]
    pub fn with_reset_delay(reset_delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            draft: ContactDraft::default(),
            status: SubmissionStatus::Idle,
            generation: 0,
            reset_delay,
            reset_timer: None,
            tx,
            rx,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn set_field(&mut self, field: ContactField, value: &str) {
        *self.draft.get_mut(field) = strip_control_chars(value);
    }

    pub fn push_char(&mut self, field: ContactField, c: char) {
        if !c.is_control() || (c == '\n' && field == ContactField::Message) {
            self.draft.get_mut(field).push(c);
        }
    }

    pub fn push_str(&mut self, field: ContactField, text: &str) {
        let mut text = strip_control_chars(text);
        if field != ContactField::Message {
            text = text.replace(['\n', '\t'], " ");
        }
        self.draft.get_mut(field).push_str(&text);
    }

    pub fn backspace(&mut self, field: ContactField) {
        self.draft.get_mut(field).pop();
    }

    /// Validate and, if everything holds, issue the write.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, session: &SessionState) -> SubmitOutcome {
        if self.status == SubmissionStatus::Sending {
            tracing::debug!("Contact submission ignored: a write is already in flight");
            return SubmitOutcome::Ignored;
        }

        self.cancel_reset();
        self.generation = self.generation.wrapping_add(1);

        let (session, store, message) = match check_preconditions(session, &self.draft) {
            Ok(checked) => checked,
            Err(failure) => {
                tracing::error!("Contact submission rejected: {failure}");
                self.status = SubmissionStatus::Error;
                self.schedule_reset();
                return SubmitOutcome::Rejected(failure);
            }
        };

        self.status = SubmissionStatus::Sending;

        let collection = CollectionPath::contact_messages(session.app_id());
        let credentials = session.identity().map(|user| user.id_token.clone());
        let document = message.to_document();
        let generation = self.generation;
        let tx = self.tx.clone();

        tracing::info!(collection = %collection, "Submitting contact message");
        tokio::spawn(async move {
            let result = store
                .append(credentials.as_ref(), &collection, document)
                .await;
            let _ = tx.send(FormEvent::WriteFinished { generation, result });
        });

        SubmitOutcome::Started
    }

    /// Apply every pending event. Returns true if the status changed.
    pub fn tick(&mut self) -> bool {
        let before = self.status;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
        }
        self.status != before
    }

    /// Wait for the next event and apply it.
    pub async fn recv_update(&mut self) -> SubmissionStatus {
        if let Some(event) = self.rx.recv().await {
            self.apply(event);
        }
        self.status
    }

    fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::WriteFinished { generation, result } => {
                if generation != self.generation || self.status != SubmissionStatus::Sending {
                    return;
                }
                match result {
                    Ok(name) => {
                        tracing::info!(document = %name.id(), "Contact message stored");
                        self.status = SubmissionStatus::Success;
                        self.draft.clear();
                    }
                    Err(e) => {
                        tracing::error!("Error submitting contact message: {e}");
                        self.status = SubmissionStatus::Error;
                    }
                }
                self.schedule_reset();
            }
            FormEvent::ResetElapsed { generation } => {
                if generation == self.generation && self.status.is_terminal() {
                    self.status = SubmissionStatus::Idle;
                    self.reset_timer = None;
                }
            }
        }
    }

    fn schedule_reset(&mut self) {
        self.cancel_reset();
        let (handle, registration) = AbortHandle::new_pair();
        let tx = self.tx.clone();
        let generation = self.generation;
        let deadline = tokio::time::Instant::now() + self.reset_delay;
        tokio::spawn(Abortable::new(
            async move {
                tokio::time::sleep_until(deadline).await;
                let _ = tx.send(FormEvent::ResetElapsed { generation });
            },
            registration,
        ));
        self.reset_timer = Some(handle);
    }

    fn cancel_reset(&mut self) {
        if let Some(handle) = self.reset_timer.take() {
            handle.abort();
        }
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}

fn check_preconditions<'a>(
    state: &'a SessionState,
    draft: &ContactDraft,
) -> Result<(&'a Session, Arc<dyn DocumentStore>, ContactMessage), PreconditionFailure> {
    let session = state.session().ok_or(PreconditionFailure::NotReady)?;
    let store = session
        .store()
        .cloned()
        .ok_or(PreconditionFailure::NoStore)?;
    let message = ContactMessage::try_from(draft)?;
    Ok((session, store, message))
}
